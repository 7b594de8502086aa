//! SQL dialect abstraction
//!
//! A `Dialect` is an immutable value object: the core column type mapping
//! plus identifier-quoting and string-escaping rules. Every compilation
//! entry point takes a `&dyn Dialect` rather than reaching for an ambient
//! global.

use crate::column_type::{ColumnKind, ColumnType};

/// The core column kinds resolved against one dialect.
#[derive(Debug, Clone)]
pub struct CoreColumnTypes {
    pub string: ColumnType,
    pub integer: ColumnType,
    pub real: ColumnType,
    pub boolean: ColumnType,
    pub date: ColumnType,
    pub timestamp: ColumnType,
}

impl CoreColumnTypes {
    /// Look up the resolved `ColumnType` for a core kind. `Extra` kinds are
    /// resolved by the dialect's own `sql_type_name`, not through this table.
    pub fn for_kind(&self, kind: &ColumnKind) -> ColumnType {
        match kind {
            ColumnKind::String => self.string.clone(),
            ColumnKind::Integer => self.integer.clone(),
            ColumnKind::Real => self.real.clone(),
            ColumnKind::Boolean => self.boolean.clone(),
            ColumnKind::Date => self.date.clone(),
            ColumnKind::Timestamp => self.timestamp.clone(),
            ColumnKind::Extra(name) => ColumnType::new(kind.clone(), name.clone()),
        }
    }
}

/// A target SQL variant: its core type mapping, identifier quoting, and
/// string-literal escaping. Dialects are immutable value objects.
pub trait Dialect: Send + Sync {
    fn core_column_types(&self) -> &CoreColumnTypes;

    /// Quote a column/table identifier for this dialect.
    fn quote_col(&self, id: &str) -> String;

    /// Escape a value for embedding inside a single-quoted string literal.
    fn escape_string(&self, s: &str) -> String;

    fn name(&self) -> &'static str;
}

fn ansi_core_column_types() -> CoreColumnTypes {
    CoreColumnTypes {
        string: ColumnType::new(ColumnKind::String, "VARCHAR"),
        integer: ColumnType::new(ColumnKind::Integer, "INTEGER"),
        real: ColumnType::new(ColumnKind::Real, "DOUBLE PRECISION"),
        boolean: ColumnType::new(ColumnKind::Boolean, "BOOLEAN"),
        date: ColumnType::new(ColumnKind::Date, "DATE"),
        timestamp: ColumnType::new(ColumnKind::Timestamp, "TIMESTAMP"),
    }
}

/// Generic ANSI-ish dialect, used for diagnostics formed before a concrete
/// dialect is known. Never used to compile a real query.
pub struct GenericDialect {
    types: CoreColumnTypes,
}

impl GenericDialect {
    pub fn new() -> Self {
        Self {
            types: ansi_core_column_types(),
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for GenericDialect {
    fn core_column_types(&self) -> &CoreColumnTypes {
        &self.types
    }

    fn quote_col(&self, id: &str) -> String {
        format!("\"{}\"", id.replace('"', "\"\""))
    }

    fn escape_string(&self, s: &str) -> String {
        s.replace('\'', "''")
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

/// DuckDB dialect.
pub struct DuckDbDialect {
    types: CoreColumnTypes,
}

impl DuckDbDialect {
    pub fn new() -> Self {
        let mut types = ansi_core_column_types();
        types.real = ColumnType::new(ColumnKind::Real, "DOUBLE");
        Self { types }
    }
}

impl Default for DuckDbDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for DuckDbDialect {
    fn core_column_types(&self) -> &CoreColumnTypes {
        &self.types
    }

    fn quote_col(&self, id: &str) -> String {
        format!("\"{}\"", id.replace('"', "\"\""))
    }

    fn escape_string(&self, s: &str) -> String {
        s.replace('\'', "''")
    }

    fn name(&self) -> &'static str {
        "duckdb"
    }
}

/// Snowflake dialect — numerics collapse onto `NUMBER`/`FLOAT`, matching how
/// Snowflake actually names its types.
pub struct SnowflakeDialect {
    types: CoreColumnTypes,
}

impl SnowflakeDialect {
    pub fn new() -> Self {
        let mut types = ansi_core_column_types();
        types.string = ColumnType::new(ColumnKind::String, "STRING");
        types.integer = ColumnType::new(ColumnKind::Integer, "NUMBER");
        types.real = ColumnType::new(ColumnKind::Real, "FLOAT");
        types.timestamp = ColumnType::new(ColumnKind::Timestamp, "TIMESTAMP_NTZ");
        Self { types }
    }
}

impl Default for SnowflakeDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for SnowflakeDialect {
    fn core_column_types(&self) -> &CoreColumnTypes {
        &self.types
    }

    fn quote_col(&self, id: &str) -> String {
        format!("\"{}\"", id.replace('"', "\"\""))
    }

    fn escape_string(&self, s: &str) -> String {
        s.replace('\'', "''")
    }

    fn name(&self) -> &'static str {
        "snowflake"
    }
}

/// The dialect used solely for diagnostic messages formed before a real
/// dialect is known. Never use this to compile SQL that will actually run.
pub fn default_dialect() -> GenericDialect {
    GenericDialect::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_col_doubles_embedded_quotes() {
        let d = DuckDbDialect::new();
        assert_eq!(d.quote_col("user\"name"), "\"user\"\"name\"");
    }

    #[test]
    fn escape_string_doubles_single_quotes() {
        let d = GenericDialect::new();
        assert_eq!(
            d.escape_string("Department Manager Gov't & Comm Rel"),
            "Department Manager Gov''t & Comm Rel"
        );
    }

    #[test]
    fn dialects_resolve_numeric_kinds_differently() {
        let snow = SnowflakeDialect::new();
        let duck = DuckDbDialect::new();
        assert_eq!(snow.core_column_types().integer.sql_type_name, "NUMBER");
        assert_eq!(duck.core_column_types().integer.sql_type_name, "INTEGER");
    }
}
