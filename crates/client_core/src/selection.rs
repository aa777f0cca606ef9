//! Selection values and the option lists they govern.

use std::fmt;

use shared::domain::{Category, TableSummary};

/// A user-settable selector.
///
/// `Category`, `FoodName`, `Table` and `Column` form the dependency chain, in
/// that order. `SubSelection` shares the column option list but never feeds a
/// fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Category,
    FoodName,
    Table,
    SubSelection,
    Column,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Category,
        Field::FoodName,
        Field::Table,
        Field::SubSelection,
        Field::Column,
    ];

    /// The field whose value must be non-empty before this one can be set.
    pub fn upstream(self) -> Option<Field> {
        match self {
            Field::Category => None,
            Field::FoodName => Some(Field::Category),
            Field::Table => Some(Field::FoodName),
            Field::SubSelection | Field::Column => Some(Field::Table),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Category => "category",
            Field::FoodName => "food_name",
            Field::Table => "table",
            Field::SubSelection => "sub_selection",
            Field::Column => "column",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current value of every selector; an empty string means "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: String,
    pub food_name: String,
    pub table: String,
    pub sub_selection: String,
    pub column: String,
}

impl Selection {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Category => &self.category,
            Field::FoodName => &self.food_name,
            Field::Table => &self.table,
            Field::SubSelection => &self.sub_selection,
            Field::Column => &self.column,
        }
    }

    pub(crate) fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Category => &mut self.category,
            Field::FoodName => &mut self.food_name,
            Field::Table => &mut self.table,
            Field::SubSelection => &mut self.sub_selection,
            Field::Column => &mut self.column,
        }
    }

    pub fn is_set(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// Position in the chain reached by the current values.
    pub fn stage(&self) -> Stage {
        if self.category.is_empty() {
            Stage::Empty
        } else if self.food_name.is_empty() {
            Stage::CategorySelected
        } else if self.table.is_empty() {
            Stage::FoodSelected
        } else if self.column.is_empty() {
            Stage::TableSelected
        } else {
            Stage::ColumnSelected
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Empty,
    CategorySelected,
    FoodSelected,
    TableSelected,
    ColumnSelected,
}

/// Options currently valid for each selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionLists {
    pub categories: Vec<Category>,
    pub food_names: Vec<String>,
    pub tables: Vec<TableSummary>,
    /// Shared by the column and sub-selection selectors.
    pub columns: Vec<String>,
}

impl OptionLists {
    /// `(value, label)` pairs offered by `field`'s selector.
    pub fn choices(&self, field: Field) -> Vec<(String, String)> {
        match field {
            Field::Category => self
                .categories
                .iter()
                .map(|category| (category.code.clone(), category.name.clone()))
                .collect(),
            Field::FoodName => self
                .food_names
                .iter()
                .map(|name| (name.clone(), name.clone()))
                .collect(),
            Field::Table => self
                .tables
                .iter()
                .map(|table| (table.id.to_string(), table.name.clone()))
                .collect(),
            Field::SubSelection | Field::Column => self
                .columns
                .iter()
                .map(|column| (column.clone(), column.clone()))
                .collect(),
        }
    }

    /// Display label for `value` in `field`'s list, if it is offered.
    pub fn label_for(&self, field: Field, value: &str) -> Option<String> {
        self.choices(field)
            .into_iter()
            .find(|(candidate, _)| candidate == value)
            .map(|(_, label)| label)
    }
}
