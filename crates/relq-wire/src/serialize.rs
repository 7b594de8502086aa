//! JSON wire envelopes — spec.md §6 "JSON wire form".

use relq_core::{Schema, TableRep};
use relq_ir::QueryRep;
use serde::{Deserialize, Serialize};

/// `{ expType: "QueryExp", _rep: QueryRep }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryWire {
    #[serde(rename = "expType")]
    pub exp_type: String,
    #[serde(rename = "_rep")]
    pub rep: QueryRep,
}

impl QueryWire {
    pub fn new(rep: QueryRep) -> Self {
        Self {
            exp_type: "QueryExp".to_string(),
            rep,
        }
    }
}

/// `{ query, filterRowCount, offset?, limit? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequestWire {
    pub query: QueryRep,
    #[serde(rename = "filterRowCount")]
    pub filter_row_count: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// `{ schema: { columns, columnMetadata }, rowData: Row[] }`.
///
/// `TableRep` already carries exactly this shape (see `relq-core::scalar`);
/// this alias names the wire contract explicitly rather than introducing a
/// second, field-for-field-identical struct.
pub type TableResultWire = TableRep;

/// Rebuild a `schema` key of a result payload into a `Schema` — spec.md
/// §4.5: "A `schema` key in a result payload is rebuilt into a Schema
/// object." `serde`'s derive already does this at the type level; this
/// free function exists for callers holding a bare `serde_json::Value`.
pub fn revive_schema(value: &serde_json::Value) -> Option<Schema> {
    serde_json::from_value(value.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::fixtures::bart_catalog;
    use relq_ir::QueryBuilder;
    use relq_types::GenericDialect;

    #[test]
    fn query_wire_round_trips() {
        let rep = QueryBuilder::table_query("bart").project(["Name"]).build();
        let wire = QueryWire::new(rep.clone());
        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("\"expType\":\"QueryExp\""));
        let back: QueryWire = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rep, rep);
    }

    #[test]
    fn query_request_wire_omits_absent_offset_and_limit() {
        let rep = QueryBuilder::table_query("bart").build();
        let req = QueryRequestWire {
            query: rep,
            filter_row_count: true,
            offset: None,
            limit: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("offset"));
        assert!(!json.contains("limit"));
    }

    #[test]
    fn revive_schema_rebuilds_from_a_raw_value() {
        let d = GenericDialect::new();
        let catalog = bart_catalog(&d);
        let schema = catalog.get("bart").unwrap().schema.clone();
        let value = serde_json::to_value(&schema).unwrap();
        let revived = revive_schema(&value).unwrap();
        assert_eq!(revived, schema);
    }
}
