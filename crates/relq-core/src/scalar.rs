//! Scalar values carried by `ConstVal` and by rows returned from a driver

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single cell value. Serializes to the natural JSON representation
/// (a bare number/string/bool/null) rather than an internally-tagged enum,
/// since this is the wire shape a caller on the other end expects for a
/// dynamically-typed scalar.
///
/// Deserialization can't tell `Date`/`Timestamp` apart from `Str` by JSON
/// shape alone (all three are JSON strings), so it inspects the string and
/// picks the most specific parse that succeeds: RFC 3339 timestamp, then
/// ISO 8601 date, then falls back to a plain string. This is the same
/// "inspect and dispatch" shape as the `expType` reviver in `relq-wire`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Null => serializer.serialize_none(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Str(s) => serializer.serialize_str(s),
            Scalar::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            Scalar::Timestamp(ts) => {
                serializer.serialize_str(&ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
        }
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a null, bool, number, or string scalar")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Scalar::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Scalar::Null)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Scalar::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Scalar::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Scalar::Int(v as i64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Scalar::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if let Ok(ts) = NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Scalar::Timestamp(ts));
        }
        if let Ok(date) = NaiveDate::parse_from_str(v, "%Y-%m-%d") {
            return Ok(Scalar::Date(date));
        }
        Ok(Scalar::Str(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// One row of a `TableRep`, aligned positionally with `Schema::columns`.
pub type Row = Vec<Scalar>;

/// The result of running a compiled query: schema plus row data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRep {
    pub schema: crate::schema::Schema,
    #[serde(rename = "rowData")]
    pub row_data: Vec<Row>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        for s in [
            Scalar::Null,
            Scalar::Bool(true),
            Scalar::Int(312461),
            Scalar::Float(1.5),
            Scalar::Str("Crunican, Grace".to_string()),
        ] {
            let json = serde_json::to_string(&s).unwrap();
            let back: Scalar = serde_json::from_str(&json).unwrap();
            assert_eq!(s, back);
        }
    }

    #[test]
    fn distinguishes_date_from_plain_string() {
        let json = "\"2024-03-05\"";
        let back: Scalar = serde_json::from_str(json).unwrap();
        assert_eq!(back, Scalar::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));

        let plain = "\"General Manager\"";
        let back: Scalar = serde_json::from_str(plain).unwrap();
        assert_eq!(back, Scalar::Str("General Manager".to_string()));
    }

    #[test]
    fn null_round_trips() {
        let json = serde_json::to_string(&Scalar::Null).unwrap();
        assert_eq!(json, "null");
        let back: Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Scalar::Null);
    }
}
