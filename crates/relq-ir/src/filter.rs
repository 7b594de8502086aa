//! Filter expression tree — opaque to schema inference and SQL lowering;
//! rendered only by the downstream pretty-printer (relq-sql::printer).

use relq_core::Scalar;
use serde::{Deserialize, Serialize};

/// A leaf operand inside a filter predicate: either a column reference or a
/// constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expType")]
pub enum FilterOperand {
    ColRef { name: String },
    ConstVal { value: Scalar },
}

pub fn col(name: impl Into<String>) -> FilterOperand {
    FilterOperand::ColRef { name: name.into() }
}

pub fn const_val(value: impl Into<Scalar>) -> FilterOperand {
    FilterOperand::ConstVal {
        value: value.into(),
    }
}

/// Binary comparison operators for `BinRelExp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "BEGINS")]
    Begins,
    #[serde(rename = "ENDS")]
    Ends,
    #[serde(rename = "CONTAINS")]
    Contains,
}

/// Unary predicate operators for `UnaryRelExp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
}

/// A boolean expression over columns and constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expType")]
pub enum FilterExp {
    And { clauses: Vec<FilterExp> },
    Or { clauses: Vec<FilterExp> },
    BinRelExp {
        op: BinOp,
        lhs: FilterOperand,
        rhs: FilterOperand,
    },
    UnaryRelExp { op: UnaryOp, arg: FilterOperand },
}

/// Column names referenced anywhere in this filter tree, for the (driver-
/// enforced, not core-enforced) check that they exist in scope — see
/// spec.md §4.4.
impl FilterExp {
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FilterExp::And { clauses } | FilterExp::Or { clauses } => {
                for c in clauses {
                    c.collect_columns(out);
                }
            }
            FilterExp::BinRelExp { lhs, rhs, .. } => {
                collect_operand(lhs, out);
                collect_operand(rhs, out);
            }
            FilterExp::UnaryRelExp { arg, .. } => collect_operand(arg, out),
        }
    }
}

fn collect_operand<'a>(operand: &'a FilterOperand, out: &mut Vec<&'a str>) {
    if let FilterOperand::ColRef { name } = operand {
        out.push(name);
    }
}

/// Fluent helper matching the builder style shown in spec.md §8:
/// `and().eq(col("x"), const_val(1))`.
pub struct FilterBuilder {
    clauses: Vec<FilterExp>,
    is_or: bool,
}

pub fn and() -> FilterBuilder {
    FilterBuilder {
        clauses: Vec::new(),
        is_or: false,
    }
}

pub fn or() -> FilterBuilder {
    FilterBuilder {
        clauses: Vec::new(),
        is_or: true,
    }
}

macro_rules! bin_op_method {
    ($name:ident, $op:expr) => {
        pub fn $name(mut self, lhs: FilterOperand, rhs: FilterOperand) -> Self {
            self.clauses.push(FilterExp::BinRelExp {
                op: $op,
                lhs,
                rhs,
            });
            self
        }
    };
}

impl FilterBuilder {
    bin_op_method!(eq, BinOp::Eq);
    bin_op_method!(ne, BinOp::Ne);
    bin_op_method!(lt, BinOp::Lt);
    bin_op_method!(le, BinOp::Le);
    bin_op_method!(gt, BinOp::Gt);
    bin_op_method!(ge, BinOp::Ge);
    bin_op_method!(like, BinOp::Like);
    bin_op_method!(begins, BinOp::Begins);
    bin_op_method!(ends, BinOp::Ends);
    bin_op_method!(contains, BinOp::Contains);

    pub fn is_null(mut self, arg: FilterOperand) -> Self {
        self.clauses.push(FilterExp::UnaryRelExp {
            op: UnaryOp::IsNull,
            arg,
        });
        self
    }

    pub fn is_not_null(mut self, arg: FilterOperand) -> Self {
        self.clauses.push(FilterExp::UnaryRelExp {
            op: UnaryOp::IsNotNull,
            arg,
        });
        self
    }

    pub fn build(self) -> FilterExp {
        if self.is_or {
            FilterExp::Or {
                clauses: self.clauses,
            }
        } else {
            FilterExp::And {
                clauses: self.clauses,
            }
        }
    }
}

impl From<FilterBuilder> for FilterExp {
    fn from(b: FilterBuilder) -> Self {
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_builder_produces_bin_rel_exp() {
        let f: FilterExp = and().eq(col("JobFamily"), const_val("Executive Management")).into();
        match f {
            FilterExp::And { clauses } => {
                assert_eq!(clauses.len(), 1);
                assert!(matches!(clauses[0], FilterExp::BinRelExp { op: BinOp::Eq, .. }));
            }
            _ => panic!("expected And"),
        }
    }

    #[test]
    fn referenced_columns_walks_the_whole_tree() {
        let f: FilterExp = and()
            .eq(col("JobFamily"), const_val("Executive Management"))
            .gt(col("Base"), const_val(100_000i64))
            .into();
        let cols = f.referenced_columns();
        assert_eq!(cols, vec!["JobFamily", "Base"]);
    }

    #[test]
    fn round_trips_through_json() {
        let f: FilterExp = and().eq(col("Title"), const_val("Department Manager Gov't & Comm Rel")).into();
        let json = serde_json::to_string(&f).unwrap();
        let back: FilterExp = serde_json::from_str(&json).unwrap();
        assert_eq!(f, back);
    }
}
