//! The external seam a backend driver implements
//!
//! Nothing in this workspace implements `QueryDriver` — SQLite/DuckDB
//! connectivity is explicitly out of scope (see spec.md §1). The trait
//! exists only so a downstream crate has a named contract to build against.

use crate::error::QrResult;
use crate::scalar::TableRep;
use crate::table_info::TableInfo;

pub trait QueryDriver {
    /// Execute a compiled SQL string and return its result set.
    fn run_query(&self, sql: &str) -> QrResult<TableRep>;

    /// Look up catalog information for one table, if known to this driver.
    fn table_info(&self, name: &str) -> Option<TableInfo>;
}
