//! `queryToSql` and `queryToCountSql` — spec.md §4.3.
//!
//! Fusion grounded on `datawebdb-dataweb`'s `sql-writer` lowering
//! (`other_examples/271769cf_..._sql-writer-src-lib.rs.rs`): that code
//! decides whether a `Projection` can land in the current `SelectBuilder`
//! or needs a `DerivedRelationBuilder` via an `already_projected()` check.
//! The same already-shaped-right-or-wrap-it decision drives every operator
//! below, just keyed on each operator's own minimal shape instead of one
//! shared flag.

use relq_core::{QrError, QrResult, TableInfoMap};
use relq_ir::{AggSpec, ColumnExtendExp, ColumnRemap, JoinType, QueryRep};
use relq_types::{AggFn, ColumnKind, Dialect};

use crate::ast::{FromClause, OrderKey, SelectItem, SqlExpr, SqlQueryAst, SqlSelectAst};
use crate::schema_infer::{get_or_infer_column_type, get_query_schema};

/// Lower `query` into a `SqlQueryAst` under `dialect`.
pub fn query_to_sql(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    query: &QueryRep,
) -> QrResult<SqlQueryAst> {
    match query {
        QueryRep::Table { table_name } => lower_table(table_map, table_name),
        QueryRep::Project { cols, from } => lower_project(dialect, table_map, cols, from),
        QueryRep::Filter { fexp, from } => lower_filter(dialect, table_map, fexp, from),
        QueryRep::GroupBy { cols, aggs, from } => {
            lower_group_by(dialect, table_map, cols, aggs, from)
        }
        QueryRep::MapColumns { cmap, from } => {
            lower_map_columns(dialect, table_map, from, |_idx, id| cmap.get(id).cloned())
        }
        QueryRep::MapColumnsByIndex { cmap, from } => {
            lower_map_columns(dialect, table_map, from, |idx, _id| cmap.get(&idx).cloned())
        }
        QueryRep::Concat { from, target } => lower_concat(dialect, table_map, from, target),
        QueryRep::Sort { keys, from } => lower_sort(dialect, table_map, keys, from),
        QueryRep::Extend {
            col_id,
            col_exp,
            opts,
            from,
        } => lower_extend(dialect, table_map, col_id, col_exp, opts, from),
        QueryRep::Join {
            lhs,
            rhs,
            on,
            join_type,
        } => lower_join(dialect, table_map, query, lhs, rhs, on, *join_type),
    }
}

/// `SELECT count(*) AS rowCount FROM (<sql>)` — spec.md §4.3.
pub fn query_to_count_sql(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    query: &QueryRep,
) -> QrResult<SqlQueryAst> {
    let inner = query_to_sql(dialect, table_map, query)?;
    let count_type = dialect.core_column_types().for_kind(&ColumnKind::Integer);
    Ok(SqlQueryAst::single(SqlSelectAst {
        select_cols: vec![SelectItem {
            col_exp: SqlExpr::CountStar,
            col_type: count_type,
            as_: Some("rowCount".to_string()),
        }],
        from: FromClause::Query(Box::new(inner)),
        where_: None,
        on: Vec::new(),
        group_by: Vec::new(),
        order_by: Vec::new(),
    }))
}

fn lower_table(table_map: &TableInfoMap, table_name: &str) -> QrResult<SqlQueryAst> {
    let info = table_map.get(table_name).ok_or_else(|| QrError::UnknownTable {
        name: table_name.to_string(),
    })?;
    let select_cols = info
        .schema
        .iter()
        .map(|(id, meta)| SelectItem {
            col_exp: SqlExpr::ColRef(id.to_string()),
            col_type: meta.column_type.clone(),
            as_: None,
        })
        .collect();
    Ok(SqlQueryAst::single(SqlSelectAst {
        select_cols,
        from: FromClause::Table(table_name.to_string()),
        where_: None,
        on: Vec::new(),
        group_by: Vec::new(),
        order_by: Vec::new(),
    }))
}

fn find_by_id<'a>(items: &'a [SelectItem], id: &str) -> Option<&'a SelectItem> {
    items.iter().find(|item| item.effective_id() == Some(id))
}

/// The alias an enclosing query must use to see this leaf's columns — used
/// whenever an operator wraps its subquery as a derived table.
fn passthrough_cols(stmt: &SqlSelectAst) -> QrResult<Vec<SelectItem>> {
    stmt.select_cols
        .iter()
        .map(|item| {
            let id = item.effective_id().ok_or_else(|| {
                log::warn!(
                    "wrapping a derived table but found a select item with neither an alias \
                     nor a bare column reference: {item:?}"
                );
                QrError::InvalidOperator {
                    tag: "select item with neither alias nor bare column reference".to_string(),
                }
            })?;
            Ok(SelectItem {
                col_exp: SqlExpr::ColRef(id.to_string()),
                col_type: item.col_type.clone(),
                as_: None,
            })
        })
        .collect()
}

fn lower_project(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    cols: &[String],
    from: &QueryRep,
) -> QrResult<SqlQueryAst> {
    let mut ast = query_to_sql(dialect, table_map, from)?;
    for stmt in ast.select_stmts.iter_mut() {
        let mut new_cols = Vec::with_capacity(cols.len());
        for id in cols {
            let item = find_by_id(&stmt.select_cols, id)
                .ok_or_else(|| QrError::UnknownColumn {
                    name: id.clone(),
                    context: "project".to_string(),
                })?
                .clone();
            new_cols.push(item);
        }
        stmt.select_cols = new_cols;
    }
    Ok(ast)
}

fn lower_filter(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    fexp: &relq_ir::FilterExp,
    from: &QueryRep,
) -> QrResult<SqlQueryAst> {
    let mut ast = query_to_sql(dialect, table_map, from)?;
    let fusable = ast
        .only_select()
        .map(|s| s.where_.is_none() && s.group_by.is_empty())
        .unwrap_or(false);
    if fusable {
        let stmt = ast.only_select_mut().expect("checked above");
        stmt.where_ = Some(fexp.clone());
        return Ok(ast);
    }
    let passthrough = passthrough_cols(
        ast.select_stmts
            .first()
            .expect("lowering never produces an empty statement list"),
    )?;
    Ok(SqlQueryAst::single(SqlSelectAst {
        select_cols: passthrough,
        from: FromClause::Query(Box::new(ast)),
        where_: Some(fexp.clone()),
        on: Vec::new(),
        group_by: Vec::new(),
        order_by: Vec::new(),
    }))
}

fn lower_group_by(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    cols: &[String],
    aggs: &[AggSpec],
    from: &QueryRep,
) -> QrResult<SqlQueryAst> {
    let in_schema = get_query_schema(dialect, table_map, from)?;

    let select_gb_cols: Vec<SelectItem> = cols
        .iter()
        .map(|id| {
            let meta = in_schema.metadata(id).ok_or_else(|| QrError::UnknownColumn {
                name: id.clone(),
                context: "groupBy".to_string(),
            })?;
            Ok(SelectItem {
                col_exp: SqlExpr::ColRef(id.clone()),
                col_type: meta.column_type.clone(),
                as_: None,
            })
        })
        .collect::<QrResult<Vec<_>>>()?;

    let agg_exprs: Vec<SelectItem> = aggs
        .iter()
        .map(|agg| {
            let name = agg.column_name();
            let meta = in_schema.metadata(name).ok_or_else(|| QrError::UnknownColumn {
                name: name.to_string(),
                context: "groupBy".to_string(),
            })?;
            let col_type = meta.column_type.clone();
            let func = match agg {
                AggSpec::Default(_) => col_type.default_agg_fn,
                AggSpec::Explicit(f, _) => *f,
            };
            let func = if func == AggFn::Null && col_type.is_string {
                AggFn::NullStr
            } else {
                func
            };
            Ok(SelectItem {
                col_exp: SqlExpr::Agg {
                    func,
                    arg: Box::new(SqlExpr::ColRef(name.to_string())),
                },
                col_type,
                as_: Some(name.to_string()),
            })
        })
        .collect::<QrResult<Vec<_>>>()?;

    let mut ast = query_to_sql(dialect, table_map, from)?;
    let fusable = ast.only_select().map(|s| s.is_bare_passthrough()).unwrap_or(false);

    let new_cols: Vec<SelectItem> = select_gb_cols.into_iter().chain(agg_exprs).collect();
    if fusable {
        let stmt = ast.only_select_mut().expect("checked above");
        stmt.select_cols = new_cols;
        stmt.group_by = cols.to_vec();
        Ok(ast)
    } else {
        Ok(SqlQueryAst::single(SqlSelectAst {
            select_cols: new_cols,
            from: FromClause::Query(Box::new(ast)),
            where_: None,
            on: Vec::new(),
            group_by: cols.to_vec(),
            order_by: Vec::new(),
        }))
    }
}

/// Shared `mapColumns`/`mapColumnsByIndex` rewrite — every leaf `SELECT`
/// gets each item's alias rewritten per `lookup`, keyed the same way the
/// schema-inference counterpart is.
fn lower_map_columns(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    from: &QueryRep,
    lookup: impl Fn(usize, &str) -> Option<ColumnRemap>,
) -> QrResult<SqlQueryAst> {
    let mut ast = query_to_sql(dialect, table_map, from)?;
    for stmt in ast.select_stmts.iter_mut() {
        for (idx, item) in stmt.select_cols.iter_mut().enumerate() {
            let current_id = match item.effective_id() {
                Some(id) => id.to_string(),
                None => continue,
            };
            if let Some(remap) = lookup(idx, &current_id) {
                if let Some(new_id) = remap.id {
                    item.as_ = Some(new_id);
                }
            }
        }
    }
    Ok(ast)
}

fn lower_concat(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    from: &QueryRep,
    target: &QueryRep,
) -> QrResult<SqlQueryAst> {
    let mut left = query_to_sql(dialect, table_map, from)?;
    let right = query_to_sql(dialect, table_map, target)?;
    left.select_stmts.extend(right.select_stmts);
    Ok(left)
}

fn lower_sort(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    keys: &[relq_ir::SortKey],
    from: &QueryRep,
) -> QrResult<SqlQueryAst> {
    let mut ast = query_to_sql(dialect, table_map, from)?;
    let order_by: Vec<OrderKey> = keys
        .iter()
        .map(|k| OrderKey {
            col: k.col_id.clone(),
            asc: k.ascending,
        })
        .collect();

    let fusable = ast.only_select().map(|s| s.order_by.is_empty()).unwrap_or(false);
    if fusable {
        let stmt = ast.only_select_mut().expect("checked above");
        stmt.order_by = order_by;
        return Ok(ast);
    }
    let passthrough = passthrough_cols(
        ast.select_stmts
            .first()
            .expect("lowering never produces an empty statement list"),
    )?;
    Ok(SqlQueryAst::single(SqlSelectAst {
        select_cols: passthrough,
        from: FromClause::Query(Box::new(ast)),
        where_: None,
        on: Vec::new(),
        group_by: Vec::new(),
        order_by,
    }))
}

fn extend_expr_to_sql_expr(exp: &ColumnExtendExp) -> SqlExpr {
    match exp {
        ColumnExtendExp::ColRef { name } => SqlExpr::ColRef(name.clone()),
        ColumnExtendExp::ConstVal { value } => SqlExpr::Literal(value.clone()),
        ColumnExtendExp::AsString { inner } => SqlExpr::Cast {
            inner: Box::new(extend_expr_to_sql_expr(inner)),
            target_kind: ColumnKind::String,
        },
    }
}

fn lower_extend(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    col_id: &str,
    col_exp: &ColumnExtendExp,
    opts: &relq_ir::ExtendOpts,
    from: &QueryRep,
) -> QrResult<SqlQueryAst> {
    let in_schema = get_query_schema(dialect, table_map, from)?;
    let col_type = get_or_infer_column_type(dialect, &in_schema, col_exp, opts)?;
    let mut ast = query_to_sql(dialect, table_map, from)?;

    let new_item = SelectItem {
        col_exp: extend_expr_to_sql_expr(col_exp),
        col_type,
        as_: Some(col_id.to_string()),
    };

    let is_const = matches!(col_exp, ColumnExtendExp::ConstVal { .. });
    let fusable = is_const && ast.is_single_select();
    if fusable {
        let stmt = ast.only_select_mut().expect("checked above");
        stmt.select_cols.push(new_item);
        return Ok(ast);
    }

    let mut passthrough = passthrough_cols(
        ast.select_stmts
            .first()
            .expect("lowering never produces an empty statement list"),
    )?;
    passthrough.push(new_item);
    Ok(SqlQueryAst::single(SqlSelectAst {
        select_cols: passthrough,
        from: FromClause::Query(Box::new(ast)),
        where_: None,
        on: Vec::new(),
        group_by: Vec::new(),
        order_by: Vec::new(),
    }))
}

fn lower_join(
    dialect: &dyn Dialect,
    table_map: &TableInfoMap,
    full_query: &QueryRep,
    lhs: &QueryRep,
    rhs: &QueryRep,
    on: &relq_ir::OnColumns,
    join_type: JoinType,
) -> QrResult<SqlQueryAst> {
    if join_type != JoinType::LeftOuter {
        return Err(QrError::UnsupportedJoin {
            join_type: join_type.to_string(),
        });
    }
    let schema = get_query_schema(dialect, table_map, full_query)?;
    let lhs_ast = query_to_sql(dialect, table_map, lhs)?;
    let rhs_ast = query_to_sql(dialect, table_map, rhs)?;

    let select_cols: Vec<SelectItem> = schema
        .iter()
        .map(|(id, meta)| SelectItem {
            col_exp: SqlExpr::ColRef(id.to_string()),
            col_type: meta.column_type.clone(),
            as_: None,
        })
        .collect();

    Ok(SqlQueryAst::single(SqlSelectAst {
        select_cols,
        from: FromClause::Join {
            join_type,
            lhs: Box::new(lhs_ast),
            rhs: Box::new(rhs_ast),
        },
        where_: None,
        on: on.as_vec(),
        group_by: Vec::new(),
        order_by: Vec::new(),
    }))
}
