use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub code: String,
    pub name: String,
}

/// Table identifier as served by the catalog.
///
/// The backend emits either JSON strings or integers for table ids; both are
/// normalized to their string form so they can be echoed back in queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TableId(pub String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TableId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => TableId(text),
            RawId::Signed(n) => TableId(n.to_string()),
            RawId::Unsigned(n) => TableId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableSummary {
    pub id: TableId,
    pub name: String,
}

/// One row of nutrient data keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRow(pub BTreeMap<String, Value>);

impl DataRow {
    /// Returns the cell for `column`, treating JSON `null` the same as a missing key.
    pub fn cell(&self, column: &str) -> Option<&Value> {
        self.0.get(column).filter(|value| !value.is_null())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_id_accepts_strings_and_integers() {
        let tables: Vec<TableSummary> = serde_json::from_str(
            r#"[{"id":"T1","name":"Proximate"},{"id":42,"name":"Minerals"}]"#,
        )
        .expect("tables");
        assert_eq!(tables[0].id, TableId::new("T1"));
        assert_eq!(tables[1].id.as_str(), "42");
    }

    #[test]
    fn null_cells_read_as_missing() {
        let row: DataRow =
            serde_json::from_str(r#"{"Protein":3.4,"Fat":null}"#).expect("row");
        assert!(row.cell("Protein").is_some());
        assert!(row.cell("Fat").is_none());
        assert!(row.cell("Fiber").is_none());
    }
}
