// SPDX-License-Identifier: Apache-2.0
//! Field values and the sentinel rules for "absent" references.
//!
//! Feeder records are duck-typed attribute maps. A value is either text or a
//! number; JSON `null` survives ingestion as [`FieldValue::Null`] because the
//! upstream data really does contain null-valued `name`/`parent` fields, and
//! the relationship index must treat them as absent rather than reject the
//! record. Anything else (arrays, nested objects, booleans) is outside the
//! data model and is rejected at the deserialization boundary.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One attribute value inside a feeder record.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Free-form text (names, phases, configuration references, …).
    Text(String),
    /// A numeric value. Coordinates are always stored in this variant.
    Number(f64),
    /// An explicit null carried over from the input data.
    Null,
}

impl FieldValue {
    /// Returns the text content when this value is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) | Self::Null => None,
        }
    }

    /// Returns the numeric content when this value is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) | Self::Null => None,
        }
    }

    /// True when this value counts as an absent reference.
    ///
    /// Null, and the literal strings `null`/`undefined` in any letter case,
    /// are sentinels: a record carrying one in `name`, `parent`, `from`, or
    /// `to` is never indexed through that field.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("undefined"),
            Self::Number(_) => false,
        }
    }

    /// The textual rendering used by the search helpers.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Null => "null".to_owned(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldValueVisitor;

        impl Visitor<'_> for FieldValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, a number, or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
                Ok(FieldValue::Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
                Ok(FieldValue::Text(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
                Ok(FieldValue::Number(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
                Ok(FieldValue::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
                Ok(FieldValue::Number(v as f64))
            }

            fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
                Ok(FieldValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
                Ok(FieldValue::Null)
            }
        }

        deserializer.deserialize_any(FieldValueVisitor)
    }
}

/// True when `s` spells a finite number with no surrounding whitespace.
///
/// This is the coercion gate for `longitude`/`latitude` ingestion: only
/// strings that pass are converted to numbers.
#[must_use]
pub fn is_number_string(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    s.parse::<f64>().is_ok_and(f64::is_finite)
}
