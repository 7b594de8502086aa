//! Core column type vocabulary and dialect-resolved type descriptors

use crate::agg::AggFn;
use serde::{Deserialize, Serialize};

/// The core column kinds every dialect must provide a mapping for, plus an
/// escape hatch for dialect-specific extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    String,
    Integer,
    Real,
    Boolean,
    Date,
    Timestamp,
    /// A dialect extra not named by the core vocabulary (e.g. `JSON`, `UUID`).
    Extra(String),
}

impl ColumnKind {
    /// Default aggregate function used by groupBy when a column is named
    /// bare (no explicit `(AggFn, col)` pair). "typically sum for numeric,
    /// uniq for string" per spec; the remaining kinds are a documented
    /// design decision (see DESIGN.md).
    pub fn default_agg_fn(&self) -> AggFn {
        match self {
            ColumnKind::Integer | ColumnKind::Real => AggFn::Sum,
            ColumnKind::String => AggFn::Uniq,
            ColumnKind::Boolean => AggFn::Any,
            ColumnKind::Date | ColumnKind::Timestamp => AggFn::Max,
            ColumnKind::Extra(_) => AggFn::Uniq,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Real)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ColumnKind::String)
    }
}

/// A dialect-resolved column type: the core `ColumnKind` plus the concrete
/// SQL type name and predicate flags for that dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnType {
    pub sql_type_name: String,
    pub kind: ColumnKind,
    pub is_numeric: bool,
    pub is_string: bool,
    pub default_agg_fn: AggFn,
}

impl ColumnType {
    /// Build a `ColumnType` from a `ColumnKind` and its dialect-specific SQL
    /// name. `is_numeric`/`is_string`/`default_agg_fn` are derived from the
    /// kind, never asserted independently, which keeps the invariant (the
    /// two flags are disjoint for every core kind) true by construction.
    pub fn new(kind: ColumnKind, sql_type_name: impl Into<String>) -> Self {
        let is_numeric = kind.is_numeric();
        let is_string = kind.is_string();
        let default_agg_fn = kind.default_agg_fn();
        Self {
            sql_type_name: sql_type_name.into(),
            kind,
            is_numeric,
            is_string,
            default_agg_fn,
        }
    }
}
