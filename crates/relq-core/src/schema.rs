//! Schema — an ordered list of column ids with per-column metadata

use crate::error::{QrError, QrResult};
use relq_types::ColumnType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Per-column metadata: type, display name, and any additional keys merged
/// in by `mapColumns`/`mapColumnsByIndex`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl ColumnMetadata {
    pub fn new(column_type: ColumnType, display_name: impl Into<String>) -> Self {
        Self {
            column_type,
            display_name: display_name.into(),
            extra: Map::new(),
        }
    }
}

/// An ordered sequence of column ids plus a mapping from id to metadata.
/// Persistent: every mutator returns a new `Schema`. Ids are unique within
/// a schema; every id in the sequence has an entry in the mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<String>,
    #[serde(rename = "columnMetadata")]
    column_metadata: HashMap<String, ColumnMetadata>,
}

impl Schema {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            column_metadata: HashMap::new(),
        }
    }

    /// Build a schema from an ordered list of (id, metadata) pairs. Fails if
    /// any id repeats.
    pub fn new(entries: Vec<(String, ColumnMetadata)>) -> QrResult<Self> {
        let mut columns = Vec::with_capacity(entries.len());
        let mut column_metadata = HashMap::with_capacity(entries.len());
        for (id, meta) in entries {
            if column_metadata.contains_key(&id) {
                return Err(QrError::DuplicateColumn { name: id });
            }
            columns.push(id.clone());
            column_metadata.insert(id, meta);
        }
        Ok(Self {
            columns,
            column_metadata,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.column_metadata.contains_key(id)
    }

    pub fn metadata(&self, id: &str) -> Option<&ColumnMetadata> {
        self.column_metadata.get(id)
    }

    /// Ordered `(id, metadata)` pairs, following column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnMetadata)> {
        self.columns
            .iter()
            .map(move |id| (id.as_str(), self.column_metadata.get(id).expect("schema invariant")))
    }

    /// Append a new column. Fails if the id is already present.
    pub fn extend(&self, id: impl Into<String>, meta: ColumnMetadata) -> QrResult<Self> {
        let id = id.into();
        if self.contains(&id) {
            return Err(QrError::DuplicateColumn { name: id });
        }
        let mut columns = self.columns.clone();
        let mut column_metadata = self.column_metadata.clone();
        columns.push(id.clone());
        column_metadata.insert(id, meta);
        Ok(Self {
            columns,
            column_metadata,
        })
    }

    /// Restrict to a subset of columns, in the given order. Fails
    /// `UnknownColumn` if any requested id is absent.
    pub fn restrict(&self, ids: &[String], context: &str) -> QrResult<Self> {
        let mut columns = Vec::with_capacity(ids.len());
        let mut column_metadata = HashMap::with_capacity(ids.len());
        for id in ids {
            let meta = self.metadata(id).ok_or_else(|| QrError::UnknownColumn {
                name: id.clone(),
                context: context.to_string(),
            })?;
            columns.push(id.clone());
            column_metadata.insert(id.clone(), meta.clone());
        }
        Ok(Self {
            columns,
            column_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_types::{ColumnKind, ColumnType};

    fn col(id: &str, kind: ColumnKind) -> (String, ColumnMetadata) {
        (
            id.to_string(),
            ColumnMetadata::new(ColumnType::new(kind, "X"), id),
        )
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Schema::new(vec![
            col("a", ColumnKind::Integer),
            col("a", ColumnKind::String),
        ]);
        assert!(matches!(result, Err(QrError::DuplicateColumn { .. })));
    }

    #[test]
    fn extend_appends_in_order() {
        let schema = Schema::new(vec![col("a", ColumnKind::Integer)]).unwrap();
        let extended = schema
            .extend("b", ColumnMetadata::new(ColumnType::new(ColumnKind::String, "X"), "b"))
            .unwrap();
        assert_eq!(extended.columns(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn extend_rejects_duplicate() {
        let schema = Schema::new(vec![col("a", ColumnKind::Integer)]).unwrap();
        let result = schema.extend("a", ColumnMetadata::new(ColumnType::new(ColumnKind::Integer, "X"), "a"));
        assert!(matches!(result, Err(QrError::DuplicateColumn { .. })));
    }

    #[test]
    fn restrict_reorders_and_filters() {
        let schema = Schema::new(vec![
            col("a", ColumnKind::Integer),
            col("b", ColumnKind::String),
            col("c", ColumnKind::Boolean),
        ])
        .unwrap();
        let restricted = schema
            .restrict(&["c".to_string(), "a".to_string()], "project")
            .unwrap();
        assert_eq!(restricted.columns(), &["c".to_string(), "a".to_string()]);
    }

    #[test]
    fn restrict_fails_on_unknown_column() {
        let schema = Schema::new(vec![col("a", ColumnKind::Integer)]).unwrap();
        let result = schema.restrict(&["missing".to_string()], "project");
        assert!(matches!(result, Err(QrError::UnknownColumn { .. })));
    }
}
