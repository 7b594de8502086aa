//! relq-types: core column type vocabulary, aggregate functions, and the
//! dialect abstraction shared by every other relq crate.

pub mod agg;
pub mod column_type;
pub mod dialect;

pub use agg::AggFn;
pub use column_type::{ColumnKind, ColumnType};
pub use dialect::{CoreColumnTypes, Dialect, DuckDbDialect, GenericDialect, SnowflakeDialect};
