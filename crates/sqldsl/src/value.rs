//! Literal values accepted on the right-hand side of `eq`.
//!
//! Only three kinds of values can appear in a condition: null, a number, or a
//! string. [`IntoValue`] is the conversion seam used by the DSL; conversions
//! from dynamically typed input (`serde_json::Value`) are where a value of the
//! wrong kind is rejected with [`DslError::InvalidValueType`].

use crate::builder::SqlRender;
use crate::error::{DslError, DslResult};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal compared against a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value, rendered as `column is null` by the `eq` leaf.
    Null,
    /// Integer literal, rendered bare. Wide enough for every `i64` and `u64`.
    Int(i128),
    /// Floating point literal, rendered bare (`NaN`, `Infinity` and `-Infinity` included).
    Float(f64),
    /// String literal, rendered in single quotes without escaping.
    Text(String),
}

impl Value {
    /// Whether this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this is a numeric literal.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

fn write_float(v: f64, out: &mut String) {
    if v.is_nan() {
        out.push_str("NaN");
    } else if v.is_infinite() {
        out.push_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
    } else {
        out.push_str(&format!("{v:?}"));
    }
}

impl SqlRender for Value {
    fn write_sql(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("null"),
            Value::Int(v) => out.push_str(&v.to_string()),
            Value::Float(v) => write_float(*v, out),
            Value::Text(s) => {
                out.push('\'');
                out.push_str(s);
                out.push('\'');
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a number or a string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(i128::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Int(i128::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Convert an input into a [`Value`].
///
/// This is mainly for ergonomics in the condition DSL.
pub trait IntoValue {
    fn into_value(self) -> DslResult<Value>;
}

impl IntoValue for Value {
    fn into_value(self) -> DslResult<Value> {
        Ok(self)
    }
}

impl IntoValue for () {
    fn into_value(self) -> DslResult<Value> {
        Ok(Value::Null)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> DslResult<Value> {
        Ok(Value::Text(self.to_string()))
    }
}

impl IntoValue for String {
    fn into_value(self) -> DslResult<Value> {
        Ok(Value::Text(self))
    }
}

impl IntoValue for &String {
    fn into_value(self) -> DslResult<Value> {
        Ok(Value::Text(self.clone()))
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> DslResult<Value> {
        match self {
            Some(v) => v.into_value(),
            None => Ok(Value::Null),
        }
    }
}

macro_rules! impl_into_value_int {
    ($($t:ty),*) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> DslResult<Value> {
                    Ok(Value::Int(i128::from(self)))
                }
            }
        )*
    };
}

impl_into_value_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl IntoValue for isize {
    fn into_value(self) -> DslResult<Value> {
        Ok(Value::Int(self as i128))
    }
}

impl IntoValue for usize {
    fn into_value(self) -> DslResult<Value> {
        Ok(Value::Int(self as i128))
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> DslResult<Value> {
        // Go through the f32's own shortest form so 0.1f32 stays 0.1.
        let widened = format!("{self:?}").parse().unwrap_or(f64::from(self));
        Ok(Value::Float(widened))
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> DslResult<Value> {
        Ok(Value::Float(self))
    }
}

impl IntoValue for serde_json::Value {
    fn into_value(self) -> DslResult<Value> {
        match self {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i128::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(Value::Int(i128::from(u)))
                } else {
                    // Neither integer form: always representable as f64.
                    Ok(Value::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::Bool(b) => Err(DslError::invalid_value(format!("boolean {b}"))),
            serde_json::Value::Array(_) => Err(DslError::invalid_value("array")),
            serde_json::Value::Object(_) => Err(DslError::invalid_value("object")),
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DslError;

    fn try_from(value: serde_json::Value) -> DslResult<Self> {
        value.into_value()
    }
}
