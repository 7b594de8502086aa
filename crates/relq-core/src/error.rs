//! Error types shared by schema inference, SQL lowering, and the wire layer

use thiserror::Error;

/// Errors surfaced by the core. All abort the entire compilation; no
/// partial result is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QrError {
    /// During schema inference, a `table` operator named a table absent
    /// from the `TableInfoMap`.
    #[error("unknown table '{name}'")]
    UnknownTable { name: String },

    /// A referenced column is absent from the inferred input schema.
    #[error("unknown column '{name}' in {context}")]
    UnknownColumn { name: String, context: String },

    /// `extend` or `mapColumns` produced a duplicate column id.
    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// `concat` operands disagree on columns or types.
    #[error("schema mismatch in concat: {reason}")]
    SchemaMismatch { reason: String },

    /// Any join type other than `LeftOuter`.
    #[error("unsupported join type: {join_type}")]
    UnsupportedJoin { join_type: String },

    /// `extend` expression without an explicit type and not a handled form.
    #[error("could not infer type for extend expression: {expr}")]
    TypeInferenceFailed { expr: String },

    /// Defensive catch-all; unreachable if the IR is well-formed.
    #[error("invalid operator: {tag}")]
    InvalidOperator { tag: String },

    /// The wire layer could not reconstruct a value from JSON.
    #[error("failed to revive '{expected}' from JSON: {reason}")]
    RevivalFailed { expected: String, reason: String },
}

pub type QrResult<T> = Result<T, QrError>;
