//! The pretty-printer — spec.md §4.3/§6 treats this as a downstream,
//! non-normative consumer of `SqlQueryAst`: its exact textual output is not
//! part of the contract, only that it owns quoting, literal escaping,
//! `UNION ALL` formatting, and offset/limit suffixing.

use relq_core::Scalar;
use relq_ir::{BinOp, FilterExp, FilterOperand, UnaryOp};
use relq_types::Dialect;

use crate::ast::{FromClause, SelectItem, SqlExpr, SqlQueryAst, SqlSelectAst};

/// No offset/limit requested — spec.md §6.
pub const NONE: i64 = -1;

/// Render a full query, applying `offset`/`limit` (`NONE` for either means
/// "not requested") as a suffix on the whole statement.
pub fn render(dialect: &dyn Dialect, ast: &SqlQueryAst, offset: i64, limit: i64) -> String {
    let mut sql = render_query_body(dialect, ast);
    if limit != NONE {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    if offset != NONE {
        sql.push_str(&format!(" OFFSET {offset}"));
    }
    sql
}

fn render_query_body(dialect: &dyn Dialect, ast: &SqlQueryAst) -> String {
    ast.select_stmts
        .iter()
        .map(|stmt| render_select(dialect, stmt))
        .collect::<Vec<_>>()
        .join(" UNION ALL ")
}

fn render_select(dialect: &dyn Dialect, stmt: &SqlSelectAst) -> String {
    let cols = stmt
        .select_cols
        .iter()
        .map(|item| render_select_item(dialect, item))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("SELECT {} FROM {}", cols, render_from(dialect, &stmt.from));

    if let FromClause::Join { .. } = &stmt.from {
        if !stmt.on.is_empty() {
            sql.push_str(" ON ");
            sql.push_str(&render_join_on(dialect, &stmt.on));
        }
    }

    if let Some(where_) = &stmt.where_ {
        sql.push_str(" WHERE ");
        sql.push_str(&render_filter(dialect, where_));
    }

    if !stmt.group_by.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(
            &stmt
                .group_by
                .iter()
                .map(|c| dialect.quote_col(c))
                .collect::<Vec<_>>()
                .join(", "),
        );
    }

    if !stmt.order_by.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(
            &stmt
                .order_by
                .iter()
                .map(|k| format!("{} {}", dialect.quote_col(&k.col), if k.asc { "ASC" } else { "DESC" }))
                .collect::<Vec<_>>()
                .join(", "),
        );
    }

    sql
}

fn render_select_item(dialect: &dyn Dialect, item: &SelectItem) -> String {
    let expr = render_expr(dialect, &item.col_exp);
    match &item.as_ {
        Some(alias) => format!("{} AS {}", expr, dialect.quote_col(alias)),
        None => expr,
    }
}

fn render_expr(dialect: &dyn Dialect, expr: &SqlExpr) -> String {
    match expr {
        SqlExpr::ColRef(name) => dialect.quote_col(name),
        SqlExpr::Literal(value) => render_literal(dialect, value),
        SqlExpr::Agg { func, arg } => {
            format!("{}({})", func.as_str(), render_expr(dialect, arg))
        }
        SqlExpr::Cast { inner, target_kind } => {
            let sql_type = dialect.core_column_types().for_kind(target_kind).sql_type_name;
            format!("CAST({} AS {})", render_expr(dialect, inner), sql_type)
        }
        SqlExpr::CountStar => "count(*)".to_string(),
    }
}

pub fn render_literal(dialect: &dyn Dialect, value: &Scalar) -> String {
    match value {
        Scalar::Null => "NULL".to_string(),
        Scalar::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Str(s) => format!("'{}'", dialect.escape_string(s)),
        Scalar::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        Scalar::Timestamp(t) => format!("'{}'", t.format("%Y-%m-%d %H:%M:%S")),
    }
}

fn render_from(dialect: &dyn Dialect, from: &FromClause) -> String {
    match from {
        FromClause::Table(name) => dialect.quote_col(name),
        FromClause::Query(inner) => format!("({}) AS t", render_query_body(dialect, inner)),
        FromClause::Join { join_type, lhs, rhs } => {
            let join_kw = match join_type {
                relq_ir::JoinType::LeftOuter => "LEFT OUTER JOIN",
                relq_ir::JoinType::Inner => "INNER JOIN",
                relq_ir::JoinType::RightOuter => "RIGHT OUTER JOIN",
                relq_ir::JoinType::FullOuter => "FULL OUTER JOIN",
                relq_ir::JoinType::Cross => "CROSS JOIN",
            };
            format!(
                "({}) AS lhs {} ({}) AS rhs",
                render_query_body(dialect, lhs),
                join_kw,
                render_query_body(dialect, rhs),
            )
        }
    }
}

/// Render the `on` columns of a join as `lhs.c1 = rhs.c1 AND ...`, called
/// separately from `render_from` since the ON clause sits after the join
/// keyword rather than inside either operand.
pub fn render_join_on(dialect: &dyn Dialect, on: &[String]) -> String {
    on.iter()
        .map(|c| format!("lhs.{} = rhs.{}", dialect.quote_col(c), dialect.quote_col(c)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn render_filter(dialect: &dyn Dialect, fexp: &FilterExp) -> String {
    match fexp {
        FilterExp::And { clauses } => render_combinator(dialect, clauses, "AND"),
        FilterExp::Or { clauses } => render_combinator(dialect, clauses, "OR"),
        FilterExp::BinRelExp { op, lhs, rhs } => render_bin_rel(dialect, *op, lhs, rhs),
        FilterExp::UnaryRelExp { op, arg } => {
            let rendered_arg = render_operand(dialect, arg);
            match op {
                UnaryOp::IsNull => format!("{rendered_arg} IS NULL"),
                UnaryOp::IsNotNull => format!("{rendered_arg} IS NOT NULL"),
            }
        }
    }
}

fn render_combinator(dialect: &dyn Dialect, clauses: &[FilterExp], joiner: &str) -> String {
    clauses
        .iter()
        .map(|c| format!("({})", render_filter(dialect, c)))
        .collect::<Vec<_>>()
        .join(&format!(" {joiner} "))
}

fn render_bin_rel(dialect: &dyn Dialect, op: BinOp, lhs: &FilterOperand, rhs: &FilterOperand) -> String {
    let l = render_operand(dialect, lhs);
    match op {
        BinOp::Eq => format!("{l} = {}", render_operand(dialect, rhs)),
        BinOp::Ne => format!("{l} <> {}", render_operand(dialect, rhs)),
        BinOp::Lt => format!("{l} < {}", render_operand(dialect, rhs)),
        BinOp::Le => format!("{l} <= {}", render_operand(dialect, rhs)),
        BinOp::Gt => format!("{l} > {}", render_operand(dialect, rhs)),
        BinOp::Ge => format!("{l} >= {}", render_operand(dialect, rhs)),
        BinOp::Like => format!("{l} LIKE {}", render_operand(dialect, rhs)),
        BinOp::Begins => format!("{l} LIKE {}", render_pattern_operand(dialect, rhs, false, true)),
        BinOp::Ends => format!("{l} LIKE {}", render_pattern_operand(dialect, rhs, true, false)),
        BinOp::Contains => format!("{l} LIKE {}", render_pattern_operand(dialect, rhs, true, true)),
    }
}

/// Renders `rhs` as a `LIKE` pattern, wrapping a constant string in `%`
/// wildcards inline and falling back to `||` concatenation for a dynamic
/// column operand.
fn render_pattern_operand(
    dialect: &dyn Dialect,
    operand: &FilterOperand,
    prefix_wildcard: bool,
    suffix_wildcard: bool,
) -> String {
    match operand {
        FilterOperand::ConstVal { value: Scalar::Str(s) } => {
            let mut pattern = dialect.escape_string(s);
            if prefix_wildcard {
                pattern = format!("%{pattern}");
            }
            if suffix_wildcard {
                pattern = format!("{pattern}%");
            }
            format!("'{pattern}'")
        }
        other => {
            let rendered = render_operand(dialect, other);
            let prefix = if prefix_wildcard { "'%' || " } else { "" };
            let suffix = if suffix_wildcard { " || '%'" } else { "" };
            format!("{prefix}{rendered}{suffix}")
        }
    }
}

fn render_operand(dialect: &dyn Dialect, operand: &FilterOperand) -> String {
    match operand {
        FilterOperand::ColRef { name } => dialect.quote_col(name),
        FilterOperand::ConstVal { value } => render_literal(dialect, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::fixtures::bart_catalog;
    use relq_ir::{and, filter_col, filter_const_val, QueryBuilder};
    use relq_types::GenericDialect;

    fn dialect() -> GenericDialect {
        GenericDialect::new()
    }

    #[test]
    fn renders_a_bare_table_select() {
        let d = dialect();
        let catalog = bart_catalog(&d);
        let rep = QueryBuilder::table_query("bart").project(["Name"]).build();
        let ast = crate::lower::query_to_sql(&d, &catalog, &rep).unwrap();
        let sql = render(&d, &ast, NONE, NONE);
        assert_eq!(sql, "SELECT \"Name\" FROM \"bart\"");
    }

    #[test]
    fn escapes_embedded_single_quotes_in_literals() {
        let d = dialect();
        let catalog = bart_catalog(&d);
        let rep = QueryBuilder::table_query("bart")
            .filter(and().eq(
                filter_col("Title"),
                filter_const_val("Department Manager Gov't & Comm Rel"),
            ))
            .build();
        let ast = crate::lower::query_to_sql(&d, &catalog, &rep).unwrap();
        let sql = render(&d, &ast, NONE, NONE);
        assert!(sql.contains("Gov''t"));
    }

    #[test]
    fn concat_renders_as_union_all() {
        let d = dialect();
        let catalog = bart_catalog(&d);
        let left = QueryBuilder::table_query("bart").project(["Name"]).build();
        let right = left.clone();
        let rep = QueryBuilder::from_rep(left).concat(right).build();
        let ast = crate::lower::query_to_sql(&d, &catalog, &rep).unwrap();
        let sql = render(&d, &ast, NONE, NONE);
        assert_eq!(sql.matches(" UNION ALL ").count(), 1);
    }

    #[test]
    fn limit_and_offset_are_suffixed_on_the_whole_statement() {
        let d = dialect();
        let catalog = bart_catalog(&d);
        let rep = QueryBuilder::table_query("bart").build();
        let ast = crate::lower::query_to_sql(&d, &catalog, &rep).unwrap();
        let sql = render(&d, &ast, 10, 50);
        assert!(sql.ends_with("LIMIT 50 OFFSET 10"));
    }
}
