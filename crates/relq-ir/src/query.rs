//! `QueryRep`: the tagged, persistent tree of relational-algebra operators.
//!
//! Mirrors the shape of `ff-analysis`'s `RelOp` (see
//! `ff-analysis/src/ir/relop.rs`) — a sum type dispatched on one tag field,
//! each variant carrying exactly the fields its operator needs — but the
//! tag vocabulary and field shapes follow spec.md §3 rather than SQL's own
//! grammar, since here the tree is built algebraically and only lowered to
//! SQL afterward.

use std::collections::HashMap;

use relq_types::AggFn;
use serde::{Deserialize, Serialize};

use crate::extend::ColumnExtendExp;
use crate::filter::FilterExp;

/// Either a bare column name (use the column's default aggregate) or an
/// explicit `(fn, name)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggSpec {
    Default(String),
    Explicit(AggFn, String),
}

impl AggSpec {
    pub fn column_name(&self) -> &str {
        match self {
            AggSpec::Default(name) => name,
            AggSpec::Explicit(_, name) => name,
        }
    }
}

/// One entry of a `mapColumns`/`mapColumnsByIndex` remap table: the new id
/// and/or display name to apply to a matched column, plus any other keys
/// the entry carries — these get merged (deep-cloned) into the matched
/// column's `ColumnMetadata::extra` rather than being dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnRemap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A `sort` key: column id plus direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
    #[serde(rename = "colId")]
    pub col_id: String,
    pub ascending: bool,
}

/// Options accompanying an `extend` node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendOpts {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<relq_types::ColumnType>,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// `join.on`: one column id, or several for a composite key. §4.3 calls the
/// normalizing step `normalizeToArray`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OnColumns {
    Single(String),
    Multiple(Vec<String>),
}

impl OnColumns {
    /// `normalizeToArray(on)` from §4.3.
    pub fn as_vec(&self) -> Vec<String> {
        match self {
            OnColumns::Single(s) => vec![s.clone()],
            OnColumns::Multiple(v) => v.clone(),
        }
    }
}

/// Join kinds recognized on the wire. Only `LeftOuter` is implemented by
/// schema inference and lowering; the others exist so an unsupported value
/// can be named in `QrError::UnsupportedJoin` rather than silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    LeftOuter,
    Inner,
    RightOuter,
    FullOuter,
    Cross,
}

impl std::fmt::Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JoinType::LeftOuter => "LeftOuter",
            JoinType::Inner => "Inner",
            JoinType::RightOuter => "RightOuter",
            JoinType::FullOuter => "FullOuter",
            JoinType::Cross => "Cross",
        };
        f.write_str(s)
    }
}

/// The algebraic query IR. Every variant is one row of spec.md §3's
/// `QueryRep` table; `operator` is the wire discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator")]
pub enum QueryRep {
    #[serde(rename = "table")]
    Table {
        #[serde(rename = "tableName")]
        table_name: String,
    },
    #[serde(rename = "project")]
    Project {
        cols: Vec<String>,
        from: Box<QueryRep>,
    },
    #[serde(rename = "filter")]
    Filter {
        fexp: FilterExp,
        from: Box<QueryRep>,
    },
    #[serde(rename = "groupBy")]
    GroupBy {
        cols: Vec<String>,
        aggs: Vec<AggSpec>,
        from: Box<QueryRep>,
    },
    #[serde(rename = "mapColumns")]
    MapColumns {
        cmap: HashMap<String, ColumnRemap>,
        from: Box<QueryRep>,
    },
    #[serde(rename = "mapColumnsByIndex")]
    MapColumnsByIndex {
        cmap: HashMap<usize, ColumnRemap>,
        from: Box<QueryRep>,
    },
    #[serde(rename = "concat")]
    Concat {
        from: Box<QueryRep>,
        target: Box<QueryRep>,
    },
    #[serde(rename = "sort")]
    Sort {
        keys: Vec<SortKey>,
        from: Box<QueryRep>,
    },
    #[serde(rename = "extend")]
    Extend {
        #[serde(rename = "colId")]
        col_id: String,
        #[serde(rename = "colExp")]
        col_exp: ColumnExtendExp,
        #[serde(default)]
        opts: ExtendOpts,
        from: Box<QueryRep>,
    },
    #[serde(rename = "join")]
    Join {
        lhs: Box<QueryRep>,
        rhs: Box<QueryRep>,
        on: OnColumns,
        #[serde(rename = "joinType")]
        join_type: JoinType,
    },
}

impl QueryRep {
    /// The operator tag, for error messages (`InvalidOperator`, etc.).
    pub fn operator(&self) -> &'static str {
        match self {
            QueryRep::Table { .. } => "table",
            QueryRep::Project { .. } => "project",
            QueryRep::Filter { .. } => "filter",
            QueryRep::GroupBy { .. } => "groupBy",
            QueryRep::MapColumns { .. } => "mapColumns",
            QueryRep::MapColumnsByIndex { .. } => "mapColumnsByIndex",
            QueryRep::Concat { .. } => "concat",
            QueryRep::Sort { .. } => "sort",
            QueryRep::Extend { .. } => "extend",
            QueryRep::Join { .. } => "join",
        }
    }
}
