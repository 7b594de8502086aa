//! relq-ir: the algebraic query IR (`QueryRep`) and its fluent builder.
//!
//! This crate knows nothing about catalogs or SQL — schema inference and
//! lowering live downstream in `relq-sql`. It only defines the tree shape
//! and the builder that constructs it.

pub mod builder;
pub mod extend;
pub mod filter;
pub mod query;

pub use builder::QueryBuilder;
pub use extend::ColumnExtendExp;
pub use filter::{and, col as filter_col, const_val as filter_const_val, or, FilterExp, FilterOperand, BinOp, UnaryOp};
pub use query::{AggSpec, ColumnRemap, ExtendOpts, JoinType, OnColumns, QueryRep, SortKey};
