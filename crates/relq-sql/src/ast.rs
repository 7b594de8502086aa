//! The SQL abstract syntax tree emitted by lowering — spec.md §4.3.
//!
//! This is the contract between this crate and the pretty-printer: shape is
//! normative, textual rendering is not (spec.md §1). Mirrors the way
//! `ff-analysis`'s `RelOp` carries a `schema: RelSchema` on every node
//! (`ir/relop.rs`), but here each node is one `SqlSelectAst` in a flat list
//! rather than a nested tree, since SELECT-vs-derived-table is a lowering
//! decision, not part of the algebraic shape.

use relq_core::Scalar;
use relq_ir::{FilterExp, JoinType};
use relq_types::{ColumnKind, ColumnType};

/// An expression appearing in a `SELECT` list. Opaque `FilterExp` trees
/// live only in `where`; this enum covers everything that can appear as a
/// projected value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    ColRef(String),
    Literal(Scalar),
    Agg { func: relq_types::AggFn, arg: Box<SqlExpr> },
    Cast { inner: Box<SqlExpr>, target_kind: ColumnKind },
    CountStar,
}

/// One entry of a `SELECT` list: the expression, its inferred type, and an
/// optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub col_exp: SqlExpr,
    pub col_type: ColumnType,
    pub as_: Option<String>,
}

impl SelectItem {
    /// The id this item is addressable by from an enclosing query: its
    /// alias if set, else the column name of a bare `ColRef`.
    pub fn effective_id(&self) -> Option<&str> {
        if let Some(alias) = &self.as_ {
            return Some(alias);
        }
        match &self.col_exp {
            SqlExpr::ColRef(name) => Some(name),
            _ => None,
        }
    }
}

/// `orderBy` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderKey {
    pub col: String,
    pub asc: bool,
}

/// The source of a `SELECT`'s rows.
#[derive(Debug, Clone, PartialEq)]
pub enum FromClause {
    Table(String),
    Query(Box<SqlQueryAst>),
    Join {
        join_type: JoinType,
        lhs: Box<SqlQueryAst>,
        rhs: Box<SqlQueryAst>,
    },
}

/// One `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlSelectAst {
    pub select_cols: Vec<SelectItem>,
    pub from: FromClause,
    pub where_: Option<FilterExp>,
    pub on: Vec<String>,
    pub group_by: Vec<String>,
    pub order_by: Vec<OrderKey>,
}

impl SqlSelectAst {
    pub fn is_bare_passthrough(&self) -> bool {
        self.where_.is_none()
            && self.group_by.is_empty()
            && self.order_by.is_empty()
            && self
                .select_cols
                .iter()
                .all(|c| c.as_.is_none() && matches!(c.col_exp, SqlExpr::ColRef(_)))
    }
}

/// A query as a list of `SELECT` statements; more than one entry means the
/// sibling statements are joined by `UNION ALL` (produced only by `concat`).
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQueryAst {
    pub select_stmts: Vec<SqlSelectAst>,
}

impl SqlQueryAst {
    pub fn single(stmt: SqlSelectAst) -> Self {
        Self {
            select_stmts: vec![stmt],
        }
    }

    pub fn is_single_select(&self) -> bool {
        self.select_stmts.len() == 1
    }

    pub fn only_select(&self) -> Option<&SqlSelectAst> {
        if self.select_stmts.len() == 1 {
            self.select_stmts.first()
        } else {
            None
        }
    }

    pub fn only_select_mut(&mut self) -> Option<&mut SqlSelectAst> {
        if self.select_stmts.len() == 1 {
            self.select_stmts.first_mut()
        } else {
            None
        }
    }
}
