//! Endpoint paths and query shapes of the nutrition catalog REST API.
//!
//! Paths are kept as segment lists so they can be appended to a base URL that
//! itself carries a path prefix, with every segment percent-encoded.

use serde::{Deserialize, Serialize};

pub const CATEGORIES_PATH: [&str; 2] = ["categories", "unique-codes"];
pub const TABLES_PATH: [&str; 2] = ["tables", "for-selection"];
pub const COLUMNS_PATH: [&str; 1] = ["nutrient-columns"];
pub const TABLE_DATA_PATH: [&str; 1] = ["table-data"];

/// `/categories/{categoryCode}/unique-food-names`
pub fn food_names_path(category_code: &str) -> [&str; 3] {
    ["categories", category_code, "unique-food-names"]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablesQuery {
    pub category_code: String,
    pub food_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsQuery {
    pub category_code: String,
    pub food_name: String,
    pub table_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDataQuery {
    pub category_code: String,
    pub food_name: String,
    pub table_id: String,
    pub column: String,
}
