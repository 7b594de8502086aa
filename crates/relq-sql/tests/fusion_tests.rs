//! Testable properties from spec.md §8: projection idempotence, fusion
//! safety, and the count-wrapper contract.

use relq_core::fixtures::bart_catalog;
use relq_ir::QueryBuilder;
use relq_sql::ast::{FromClause, SqlExpr};
use relq_sql::{query_to_count_sql, query_to_sql};
use relq_types::GenericDialect;

fn dialect() -> GenericDialect {
    GenericDialect::new()
}

#[test]
fn projection_idempotence_yields_the_same_schema_twice() {
    let d = dialect();
    let catalog = bart_catalog(&d);
    let cols = ["JobFamily", "TCOE"];
    let once = QueryBuilder::table_query("bart").project(cols).build();
    let twice = QueryBuilder::table_query("bart")
        .project(cols)
        .project(cols)
        .build();

    let once_schema = relq_sql::get_query_schema(&d, &catalog, &once).unwrap();
    let twice_schema = relq_sql::get_query_schema(&d, &catalog, &twice).unwrap();
    assert_eq!(once_schema, twice_schema);
}

#[test]
fn fusion_never_leaves_a_pass_through_only_wrapper() {
    let d = dialect();
    let catalog = bart_catalog(&d);
    // project -> filter -> sort should all fuse into the single table SELECT:
    // none of these operators individually force a wrap when the chain
    // hasn't crossed an aggregation/where boundary yet.
    let rep = QueryBuilder::table_query("bart")
        .project(["JobFamily", "TCOE"])
        .sort(vec![relq_ir::SortKey {
            col_id: "TCOE".to_string(),
            ascending: true,
        }])
        .build();
    let ast = query_to_sql(&d, &catalog, &rep).unwrap();
    assert!(ast.is_single_select(), "project+sort must fuse, not wrap");
    assert!(matches!(ast.only_select().unwrap().from, FromClause::Table(_)));
}

#[test]
fn a_second_filter_after_a_where_is_already_set_must_wrap() {
    let d = dialect();
    let catalog = bart_catalog(&d);
    let rep = QueryBuilder::table_query("bart")
        .filter(relq_ir::and().eq(relq_ir::filter_col("JobFamily"), relq_ir::filter_const_val("Executive Management")))
        .filter(relq_ir::and().eq(relq_ir::filter_col("Union"), relq_ir::filter_const_val("Non-Represented")))
        .build();
    let ast = query_to_sql(&d, &catalog, &rep).unwrap();
    let outer = ast.only_select().unwrap();
    assert!(matches!(outer.from, FromClause::Query(_)));
}

#[test]
fn count_wrapper_is_a_single_select_of_count_star() {
    let d = dialect();
    let catalog = bart_catalog(&d);
    let rep = QueryBuilder::table_query("bart")
        .filter(relq_ir::and().eq(relq_ir::filter_col("JobFamily"), relq_ir::filter_const_val("Executive Management")))
        .build();
    let ast = query_to_count_sql(&d, &catalog, &rep).unwrap();
    assert!(ast.is_single_select());
    let stmt = ast.only_select().unwrap();
    assert_eq!(stmt.select_cols.len(), 1);
    assert!(matches!(stmt.select_cols[0].col_exp, SqlExpr::CountStar));
    assert!(matches!(stmt.from, FromClause::Query(_)));
}
