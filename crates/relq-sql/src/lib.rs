//! relq-sql: schema inference and dialect-polymorphic SQL-AST lowering.
//!
//! The pretty-printer lives here too (`printer`) even though spec.md §1
//! treats it as a downstream, non-normative consumer — there is no other
//! crate for it to live in, and its output is exercised by this crate's own
//! acceptance tests.

pub mod ast;
pub mod lower;
pub mod printer;
pub mod schema_infer;

pub use ast::{FromClause, OrderKey, SelectItem, SqlExpr, SqlQueryAst, SqlSelectAst};
pub use lower::{query_to_count_sql, query_to_sql};
pub use schema_infer::{get_or_infer_column_type, get_query_schema};
