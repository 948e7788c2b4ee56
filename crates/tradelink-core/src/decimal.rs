//! Serde helpers for `f64` fields that may hold any value, including NaN and
//! the infinities.
//!
//! Finite values are written as JSON numbers. Non-finite values are written as
//! the strings `"NaN"`, `"Infinity"` and `"-Infinity"`, which JSON numbers
//! cannot express. Reading accepts either form. Use with
//! `#[serde(with = "tradelink_core::decimal")]`.
//!
//! NaN payload bits are not preserved: every NaN reads back as [`f64::NAN`].

use std::fmt::Formatter;

use serde::de::Visitor;
use serde::{Deserializer, Serializer};
use serde_json::Value;

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match non_finite_label(*value) {
        Some(label) => serializer.serialize_str(label),
        None => serializer.serialize_f64(*value),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_any(DecimalVisitor)
}

/// Encode `value` as a dynamic value, using the same representation as
/// [`serialize`].
pub fn to_value(value: f64) -> Result<Value, serde_json::Error> {
    serialize(&value, serde_json::value::Serializer)
}

/// Decode a dynamic value written by [`to_value`] or holding a plain number.
pub fn from_value(value: Value) -> Result<f64, serde_json::Error> {
    deserialize(value)
}

/// Parse decimal text, accepting the non-finite labels as well as anything
/// `f64::from_str` accepts.
pub fn parse(text: &str) -> Option<f64> {
    let text = text.trim();
    label_value(text).or_else(|| text.parse::<f64>().ok())
}

fn non_finite_label(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN)
    } else if value == f64::INFINITY {
        Some(INFINITY)
    } else if value == f64::NEG_INFINITY {
        Some(NEG_INFINITY)
    } else {
        None
    }
}

fn label_value(label: &str) -> Option<f64> {
    match label {
        NAN => Some(f64::NAN),
        INFINITY => Some(f64::INFINITY),
        NEG_INFINITY => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a number or one of \"NaN\", \"Infinity\", \"-Infinity\"")
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(value)
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<f64, E> {
        label_value(value).ok_or_else(|| E::invalid_value(serde::de::Unexpected::Str(value), &self))
    }
}
