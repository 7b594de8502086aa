//! Test-only fixtures, gated behind the `test-support` feature
//!
//! Mirrors `ff-analysis`'s own `test-support` feature: a self-referential
//! dev-dependency with the feature enabled lets other crates' tests build a
//! realistic catalog without duplicating it.

use crate::schema::{ColumnMetadata, Schema};
use crate::scalar::Scalar;
use crate::table_info::{TableInfo, TableInfoMap};
use relq_types::{ColumnKind, ColumnType, Dialect};

/// The 14-column BART compensation catalog used throughout the acceptance
/// scenarios in spec.md §8.
pub fn bart_schema(dialect: &dyn Dialect) -> Schema {
    let types = dialect.core_column_types();
    let cols: &[(&str, ColumnType)] = &[
        ("Name", types.for_kind(&ColumnKind::String)),
        ("Title", types.for_kind(&ColumnKind::String)),
        ("Base", types.for_kind(&ColumnKind::Integer)),
        ("OT", types.for_kind(&ColumnKind::Integer)),
        ("Other", types.for_kind(&ColumnKind::Integer)),
        ("MDV", types.for_kind(&ColumnKind::Integer)),
        ("ER", types.for_kind(&ColumnKind::Integer)),
        ("EE", types.for_kind(&ColumnKind::Integer)),
        ("DC", types.for_kind(&ColumnKind::Integer)),
        ("Misc", types.for_kind(&ColumnKind::Integer)),
        ("TCOE", types.for_kind(&ColumnKind::Integer)),
        ("Source", types.for_kind(&ColumnKind::String)),
        ("JobFamily", types.for_kind(&ColumnKind::String)),
        ("Union", types.for_kind(&ColumnKind::String)),
    ];
    Schema::new(
        cols.iter()
            .map(|(id, ty)| {
                (
                    id.to_string(),
                    ColumnMetadata::new(ty.clone(), *id),
                )
            })
            .collect(),
    )
    .expect("fixture schema has unique column ids")
}

pub fn bart_catalog(dialect: &dyn Dialect) -> TableInfoMap {
    let mut map = TableInfoMap::new();
    map.insert(
        "bart".to_string(),
        TableInfo {
            schema: bart_schema(dialect),
        },
    );
    map
}

/// Row 0 from spec.md §8: `Crunican, Grace`, General Manager.
pub fn bart_row_0() -> Vec<Scalar> {
    vec![
        Scalar::Str("Crunican, Grace".to_string()),
        Scalar::Str("General Manager".to_string()),
        Scalar::Int(312461),
        Scalar::Int(0),
        Scalar::Int(3846),
        Scalar::Int(19141),
        Scalar::Int(37513),
        Scalar::Int(17500),
        Scalar::Int(1869),
        Scalar::Int(7591),
        Scalar::Int(399921),
        Scalar::Str("MNP".to_string()),
        Scalar::Str("Executive Management".to_string()),
        Scalar::Str("Non-Represented".to_string()),
    ]
}

pub const BART_ROW_COUNT: usize = 2873;
