
//! [`FromBolt`] implementations for primitives, collections, temporal types
//! and raw bytes.

use std::collections::HashMap;
use neo4rs::BoltType as Value;
use crate::error::ConvertError;
use crate::traits::FromBolt;

/// Human-readable name of a [`BoltType`](neo4rs::BoltType) variant, used in
/// mismatch errors.
pub fn bolt_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null(_) => "Null",
        Value::Boolean(_) => "Boolean",
        Value::Integer(_) => "Integer",
        Value::Float(_) => "Float",
        Value::String(_) => "String",
        Value::Bytes(_) => "Bytes",
        Value::List(_) => "List",
        Value::Map(_) => "Map",
        Value::Node(_) => "Node",
        Value::Relation(_) => "Relationship",
        Value::UnboundedRelation(_) => "UnboundedRelationship",
        Value::Path(_) => "Path",
        Value::Point2D(_) => "Point2D",
        Value::Point3D(_) => "Point3D",
        Value::Duration(_) => "Duration",
        Value::Date(_) => "Date",
        Value::Time(_) => "Time",
        Value::LocalTime(_) => "LocalTime",
        Value::LocalDateTime(_) => "LocalDateTime",
        Value::DateTime(_) => "DateTime",
        Value::DateTimeZoneId(_) => "DateTimeZoneId",
    }
}

fn mismatch(expected: &str, got: &Value, target: &str) -> ConvertError {
    ConvertError::type_mismatch(expected, bolt_type_name(got), target)
}

/// Integers are range-checked; a value that does not fit the target width is
/// a mapping error rather than a silent truncation.
macro_rules! from_bolt_int {
    ($($t:ty),*) => {$(
        impl FromBolt for $t {
            fn from_bolt(value: Value) -> Result<Self, ConvertError> {
                match value {
                    Value::Integer(i) => <$t>::try_from(i.value).map_err(|_| {
                        ConvertError::Mapping(format!(
                            "integer {} out of range for {}",
                            i.value,
                            stringify!($t)
                        ))
                    }),
                    other => Err(mismatch("Integer", &other, stringify!($t))),
                }
            }
        }
    )*};
}

from_bolt_int!(i64, i32, i16, i8, u64, u32, u16, u8);

impl FromBolt for f64 {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Float(f) => Ok(f.value),
            // Cypher arithmetic on integers stays integral; widen on request.
            Value::Integer(i) => Ok(i.value as f64),
            other => Err(mismatch("Float", &other, "f64")),
        }
    }
}

impl FromBolt for f32 {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Float(f) => Ok(f.value as f32),
            Value::Integer(i) => Ok(i.value as f32),
            other => Err(mismatch("Float", &other, "f32")),
        }
    }
}

impl FromBolt for String {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::String(s) => Ok(s.value),
            other => Err(mismatch("String", &other, "String")),
        }
    }
}

impl FromBolt for bool {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Boolean(b) => Ok(b.value),
            other => Err(mismatch("Boolean", &other, "bool")),
        }
    }
}

/// Identity: keeps the raw bolt value.
impl FromBolt for Value {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        Ok(value)
    }
}

impl<T: FromBolt> FromBolt for Vec<T> {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::List(xs) => xs
                .value
                .into_iter()
                .enumerate()
                .map(|(i, v)| T::from_bolt(v).map_err(|e| e.with_context(format!("[{i}]"))))
                .collect(),
            other => Err(mismatch("List", &other, "Vec<T>")),
        }
    }
}

/// `null` maps to `None`; anything else must convert to `T`.
impl<T: FromBolt> FromBolt for Option<T> {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Null(_) => Ok(None),
            other => T::from_bolt(other).map(Some),
        }
    }
}

impl<V: FromBolt> FromBolt for HashMap<String, V> {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Map(m) => {
                let mut out = HashMap::with_capacity(m.value.len());
                for (k, v) in m.value {
                    let v = V::from_bolt(v).map_err(|e| e.with_context(format!("key '{}'", k.value)))?;
                    out.insert(k.value, v);
                }
                Ok(out)
            }
            other => Err(mismatch("Map", &other, "HashMap<String, V>")),
        }
    }
}

impl<A: FromBolt, B: FromBolt> FromBolt for (A, B) {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::List(xs) if xs.value.len() == 2 => {
                let mut it = xs.value.into_iter();
                match (it.next(), it.next()) {
                    (Some(a), Some(b)) => Ok((A::from_bolt(a)?, B::from_bolt(b)?)),
                    _ => Err(ConvertError::Mapping("pair list shrank while reading".into())),
                }
            }
            other => Err(mismatch("List[2]", &other, "(A, B)")),
        }
    }
}

impl<A: FromBolt, B: FromBolt, C: FromBolt> FromBolt for (A, B, C) {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::List(xs) if xs.value.len() == 3 => {
                let mut it = xs.value.into_iter();
                match (it.next(), it.next(), it.next()) {
                    (Some(a), Some(b), Some(c)) => {
                        Ok((A::from_bolt(a)?, B::from_bolt(b)?, C::from_bolt(c)?))
                    }
                    _ => Err(ConvertError::Mapping("triple list shrank while reading".into())),
                }
            }
            other => Err(mismatch("List[3]", &other, "(A, B, C)")),
        }
    }
}

// Temporal types

impl FromBolt for chrono::NaiveDate {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Date(d) => d.try_into().map_err(|e: neo4rs::Error| {
                ConvertError::Mapping(format!("BoltDate -> NaiveDate: {e}"))
            }),
            other => Err(mismatch("Date", &other, "NaiveDate")),
        }
    }
}

impl FromBolt for chrono::NaiveTime {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::LocalTime(t) => Ok(t.into()),
            other => Err(mismatch("LocalTime", &other, "NaiveTime")),
        }
    }
}

impl FromBolt for chrono::NaiveDateTime {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::LocalDateTime(dt) => dt.try_into().map_err(|e: neo4rs::Error| {
                ConvertError::Mapping(format!("BoltLocalDateTime -> NaiveDateTime: {e}"))
            }),
            other => Err(mismatch("LocalDateTime", &other, "NaiveDateTime")),
        }
    }
}

/// Accepts both fixed-offset and zone-id date-times.
impl FromBolt for chrono::DateTime<chrono::FixedOffset> {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::DateTime(dt) => dt.try_into().map_err(|e: neo4rs::Error| {
                ConvertError::Mapping(format!("BoltDateTime -> DateTime<FixedOffset>: {e}"))
            }),
            Value::DateTimeZoneId(dt) => (&dt).try_into().map_err(|e: neo4rs::Error| {
                ConvertError::Mapping(format!("BoltDateTimeZoneId -> DateTime<FixedOffset>: {e}"))
            }),
            other => Err(mismatch("DateTime", &other, "DateTime<FixedOffset>")),
        }
    }
}

impl FromBolt for std::time::Duration {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Duration(d) => Ok(d.into()),
            other => Err(mismatch("Duration", &other, "Duration")),
        }
    }
}

/// Raw bytes from a bolt `Bytes` value.
///
/// A newtype, since `Vec<u8>` already converts from a bolt list of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBytes(pub Vec<u8>);

impl FromBolt for RawBytes {
    fn from_bolt(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Bytes(b) => Ok(RawBytes(b.value.to_vec())),
            other => Err(mismatch("Bytes", &other, "RawBytes")),
        }
    }
}
