//! The fluent `QueryBuilder` — spec.md §4.1.
//!
//! Every method wraps the current tree as the `from` of a new node and
//! returns a new `QueryBuilder`; nothing here validates against a catalog.
//! All checks happen downstream in schema inference or SQL lowering.

use std::collections::HashMap;

use crate::extend::ColumnExtendExp;
use crate::filter::FilterExp;
use crate::query::{
    AggSpec, ColumnRemap, ExtendOpts, JoinType, OnColumns, QueryRep, SortKey,
};

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    rep: QueryRep,
}

impl QueryBuilder {
    pub fn table_query(table_name: impl Into<String>) -> Self {
        Self {
            rep: QueryRep::Table {
                table_name: table_name.into(),
            },
        }
    }

    pub fn from_rep(rep: QueryRep) -> Self {
        Self { rep }
    }

    pub fn build(self) -> QueryRep {
        self.rep
    }

    pub fn project<I, S>(self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rep: QueryRep::Project {
                cols: cols.into_iter().map(Into::into).collect(),
                from: Box::new(self.rep),
            },
        }
    }

    pub fn filter(self, fexp: impl Into<FilterExp>) -> Self {
        Self {
            rep: QueryRep::Filter {
                fexp: fexp.into(),
                from: Box::new(self.rep),
            },
        }
    }

    pub fn group_by<I, S>(self, cols: I, aggs: Vec<AggSpec>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rep: QueryRep::GroupBy {
                cols: cols.into_iter().map(Into::into).collect(),
                aggs,
                from: Box::new(self.rep),
            },
        }
    }

    /// `distinct(col)` is a macro for `groupBy([col], [])` — spec.md §4.1.
    pub fn distinct(self, col: impl Into<String>) -> Self {
        self.group_by([col.into()], Vec::new())
    }

    pub fn map_columns(self, cmap: HashMap<String, ColumnRemap>) -> Self {
        Self {
            rep: QueryRep::MapColumns {
                cmap,
                from: Box::new(self.rep),
            },
        }
    }

    pub fn map_columns_by_index(self, cmap: HashMap<usize, ColumnRemap>) -> Self {
        Self {
            rep: QueryRep::MapColumnsByIndex {
                cmap,
                from: Box::new(self.rep),
            },
        }
    }

    pub fn concat(self, target: QueryRep) -> Self {
        Self {
            rep: QueryRep::Concat {
                from: Box::new(self.rep),
                target: Box::new(target),
            },
        }
    }

    pub fn sort(self, keys: Vec<SortKey>) -> Self {
        Self {
            rep: QueryRep::Sort {
                keys,
                from: Box::new(self.rep),
            },
        }
    }

    pub fn extend(
        self,
        col_id: impl Into<String>,
        col_exp: ColumnExtendExp,
        opts: ExtendOpts,
    ) -> Self {
        Self {
            rep: QueryRep::Extend {
                col_id: col_id.into(),
                col_exp,
                opts,
                from: Box::new(self.rep),
            },
        }
    }

    pub fn join(self, rhs: QueryRep, on: OnColumns, join_type: JoinType) -> Self {
        Self {
            rep: QueryRep::Join {
                lhs: Box::new(self.rep),
                rhs: Box::new(rhs),
                on,
                join_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{and, col as filter_col, const_val as filter_const};

    #[test]
    fn distinct_lowers_to_an_empty_agg_group_by() {
        let rep = QueryBuilder::table_query("bart").distinct("JobFamily").build();
        match rep {
            QueryRep::GroupBy { cols, aggs, .. } => {
                assert_eq!(cols, vec!["JobFamily".to_string()]);
                assert!(aggs.is_empty());
            }
            _ => panic!("expected GroupBy"),
        }
    }

    #[test]
    fn chained_builder_nests_from_pointers_in_call_order() {
        let rep = QueryBuilder::table_query("bart")
            .project(["JobFamily", "TCOE"])
            .filter(and().eq(filter_col("JobFamily"), filter_const("Executive Management")))
            .build();
        match rep {
            QueryRep::Filter { from, .. } => match *from {
                QueryRep::Project { from, .. } => {
                    assert!(matches!(*from, QueryRep::Table { .. }));
                }
                _ => panic!("expected Project beneath Filter"),
            },
            _ => panic!("expected Filter at the root"),
        }
    }
}
