//! Round-trip serialization property from spec.md §8:
//! `deserialize(serialize(Q)) ≡ Q` structurally; likewise for `TableRep`.

use relq_core::fixtures::{bart_catalog, bart_row_0};
use relq_core::{Scalar, TableRep};
use relq_ir::{and, filter_col, filter_const_val, AggSpec, ColumnRemap, QueryBuilder};
use relq_types::GenericDialect;
use relq_wire::QueryWire;

#[test]
fn a_deeply_nested_query_round_trips_structurally() {
    let mut cmap = std::collections::HashMap::new();
    cmap.insert(
        "JobFamily".to_string(),
        ColumnRemap {
            id: Some("Family".to_string()),
            display_name: Some("Job Family".to_string()),
            extra: Default::default(),
        },
    );

    let rep = QueryBuilder::table_query("bart")
        .project(["JobFamily", "Title", "TCOE"])
        .filter(and().eq(filter_col("JobFamily"), filter_const_val("Executive Management")))
        .group_by(["JobFamily"], vec![AggSpec::Default("TCOE".to_string())])
        .map_columns(cmap)
        .build();

    let wire = QueryWire::new(rep.clone());
    let json = serde_json::to_string(&wire).unwrap();
    let back: QueryWire = serde_json::from_str(&json).unwrap();
    assert_eq!(back.rep, rep);
}

#[test]
fn table_rep_round_trips_with_the_bart_fixture_row() {
    let d = GenericDialect::new();
    let catalog = bart_catalog(&d);
    let schema = catalog.get("bart").unwrap().schema.clone();
    let table = TableRep {
        schema,
        row_data: vec![bart_row_0()],
    };

    let json = serde_json::to_string(&table).unwrap();
    assert!(json.contains("\"rowData\""));
    let back: TableRep = serde_json::from_str(&json).unwrap();
    assert_eq!(back.row_data, table.row_data);
    assert_eq!(back.schema, table.schema);
}

#[test]
fn scalar_kinds_survive_a_full_row_round_trip() {
    let row = vec![
        Scalar::Str("Crunican, Grace".to_string()),
        Scalar::Int(312461),
        Scalar::Null,
        Scalar::Bool(true),
    ];
    let json = serde_json::to_string(&row).unwrap();
    let back: Vec<Scalar> = serde_json::from_str(&json).unwrap();
    assert_eq!(row, back);
}
