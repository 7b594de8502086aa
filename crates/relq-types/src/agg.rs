//! Aggregate function vocabulary

use serde::{Deserialize, Serialize};

/// Named reducer applied per-group during groupBy lowering.
///
/// The wire vocabulary is fixed: `sum, avg, min, max, count, uniq, null,
/// nullstr, any, mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggFn {
    Sum,
    Avg,
    Min,
    Max,
    Count,
    Uniq,
    Null,
    #[serde(rename = "nullstr")]
    NullStr,
    Any,
    Mode,
}

impl AggFn {
    /// Name as it appears in the wire vocabulary and in rendered SQL function calls.
    pub fn as_str(self) -> &'static str {
        match self {
            AggFn::Sum => "sum",
            AggFn::Avg => "avg",
            AggFn::Min => "min",
            AggFn::Max => "max",
            AggFn::Count => "count",
            AggFn::Uniq => "uniq",
            AggFn::Null => "null",
            AggFn::NullStr => "nullstr",
            AggFn::Any => "any",
            AggFn::Mode => "mode",
        }
    }
}

impl std::fmt::Display for AggFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_vocabulary_round_trips() {
        for fn_ in [
            AggFn::Sum,
            AggFn::Avg,
            AggFn::Min,
            AggFn::Max,
            AggFn::Count,
            AggFn::Uniq,
            AggFn::Null,
            AggFn::NullStr,
            AggFn::Any,
            AggFn::Mode,
        ] {
            let json = serde_json::to_string(&fn_).unwrap();
            let back: AggFn = serde_json::from_str(&json).unwrap();
            assert_eq!(fn_, back);
        }
    }

    #[test]
    fn null_and_nullstr_are_distinct_wire_values() {
        assert_eq!(serde_json::to_string(&AggFn::Null).unwrap(), "\"null\"");
        assert_eq!(
            serde_json::to_string(&AggFn::NullStr).unwrap(),
            "\"nullstr\""
        );
    }
}
