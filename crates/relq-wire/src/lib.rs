//! relq-wire: the JSON wire form for queries and results, plus the
//! `expType` revival registry for forward-compatible extend expressions.

pub mod revive;
pub mod serialize;

pub use revive::{column_extend_registry, revive_column_extend_exp, Revived, ReviverRegistry};
pub use serialize::{revive_schema, QueryRequestWire, QueryWire, TableResultWire};
