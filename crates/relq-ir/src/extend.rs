//! Column-extend expressions for the `extend` operator (spec.md §3 EXTEND).

use relq_core::Scalar;
use serde::{Deserialize, Serialize};

/// The value an extended column takes in each output row.
///
/// `AsString` is the only wrapping form carried into SPEC_FULL.md — see
/// DESIGN.md's Open Question decisions for why a general cast-expression
/// tree was not ported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expType")]
pub enum ColumnExtendExp {
    ColRef { name: String },
    ConstVal { value: Scalar },
    AsString { inner: Box<ColumnExtendExp> },
}

pub fn col(name: impl Into<String>) -> ColumnExtendExp {
    ColumnExtendExp::ColRef { name: name.into() }
}

pub fn const_val(value: impl Into<Scalar>) -> ColumnExtendExp {
    ColumnExtendExp::ConstVal {
        value: value.into(),
    }
}

pub fn as_string(inner: ColumnExtendExp) -> ColumnExtendExp {
    ColumnExtendExp::AsString {
        inner: Box::new(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_string_wraps_without_changing_the_inner_expression() {
        let e = as_string(col("Base"));
        match e {
            ColumnExtendExp::AsString { inner } => {
                assert_eq!(*inner, ColumnExtendExp::ColRef { name: "Base".to_string() })
            }
            _ => panic!("expected AsString"),
        }
    }

    #[test]
    fn round_trips_through_json() {
        let e = as_string(const_val(1i64));
        let json = serde_json::to_string(&e).unwrap();
        let back: ColumnExtendExp = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
