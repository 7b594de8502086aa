//! relq-core: Schema, scalar values, the catalog interface, and the error
//! type shared across schema inference, SQL lowering, and the wire layer.

pub mod driver;
pub mod error;
pub mod scalar;
pub mod schema;
pub mod table_info;

#[cfg(feature = "test-support")]
pub mod fixtures;

pub use driver::QueryDriver;
pub use error::{QrError, QrResult};
pub use scalar::{Row, Scalar, TableRep};
pub use schema::{ColumnMetadata, Schema};
pub use table_info::{TableInfo, TableInfoMap};
