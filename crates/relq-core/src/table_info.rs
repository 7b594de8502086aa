//! The catalog interface consumed by schema inference and SQL lowering

use crate::schema::Schema;
use std::collections::HashMap;

/// Everything the core knows about one base table.
#[derive(Debug, Clone)]
pub struct TableInfo {
    pub schema: Schema,
}

/// `tableName -> TableInfo`, supplied by the caller on every invocation of
/// schema inference or SQL lowering. Treated as read-only during
/// compilation.
pub type TableInfoMap = HashMap<String, TableInfo>;
