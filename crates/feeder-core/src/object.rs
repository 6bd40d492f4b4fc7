// SPDX-License-Identifier: Apache-2.0
//! Feeder records and their on-demand classification.
//!
//! A record is a flat attribute map. There is no stored discriminant; the
//! classification in [`Relationship`] is recomputed from field presence every
//! time so it can never desynchronize from the data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{is_number_string, FieldValue};

/// Attribute names with structural meaning.
pub(crate) const FIELD_OBJECT: &str = "object";
pub(crate) const FIELD_NAME: &str = "name";
pub(crate) const FIELD_PARENT: &str = "parent";
pub(crate) const FIELD_FROM: &str = "from";
pub(crate) const FIELD_TO: &str = "to";
pub(crate) const FIELD_LONGITUDE: &str = "longitude";
pub(crate) const FIELD_LATITUDE: &str = "latitude";

/// Structural role of a record, derived from its fields.
///
/// Exactly one role applies. When several field patterns are present at once
/// (malformed data), precedence is line, then configuration, then child.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Relationship {
    /// Connects two named nodes via `from`/`to` (transformer, overhead line,
    /// underground line, regulator, …).
    Line,
    /// Non-geometric module/include/settings record with no `object` type.
    ConfigurationNode,
    /// Owned by another node through a `parent` name reference.
    ChildNode,
    /// None of the above.
    IndependentNode,
}

/// One record of a feeder: a mapping from attribute names to values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeederObject {
    fields: BTreeMap<String, FieldValue>,
}

impl FeederObject {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Sets `field` to `value`, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes `field` entirely, returning its previous value.
    pub fn unset(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    /// Iterates over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields on this record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns a field's text content when it is present and not a sentinel.
    fn reference(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .filter(|v| !v.is_sentinel())
            .and_then(FieldValue::as_text)
    }

    /// The record's display name, when present and valid.
    ///
    /// Sentinel spellings (`null`/`undefined` in any letter case, or a null
    /// value) count as absent and are never indexed.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.reference(FIELD_NAME)
    }

    /// The owning node's name, when present and valid.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.reference(FIELD_PARENT)
    }

    /// The source endpoint name of a line record, when present and valid.
    #[must_use]
    pub fn from_node(&self) -> Option<&str> {
        self.reference(FIELD_FROM)
    }

    /// The target endpoint name of a line record, when present and valid.
    #[must_use]
    pub fn to_node(&self) -> Option<&str> {
        self.reference(FIELD_TO)
    }

    /// The `object` type discriminator, e.g. `node`, `house`, `transformer`.
    #[must_use]
    pub fn object_type(&self) -> Option<&str> {
        self.reference(FIELD_OBJECT)
    }

    /// Longitude, when stored as a number.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.fields.get(FIELD_LONGITUDE).and_then(FieldValue::as_number)
    }

    /// Latitude, when stored as a number.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.fields.get(FIELD_LATITUDE).and_then(FieldValue::as_number)
    }

    /// True when both coordinates are present as numbers.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.longitude().is_some() && self.latitude().is_some()
    }

    /// True when the record carries both `from` and `to` fields.
    ///
    /// Field *presence* decides; a line whose endpoints are sentinels is
    /// still a line, it just never links to anything.
    #[must_use]
    pub fn is_line(&self) -> bool {
        self.fields.contains_key(FIELD_FROM) && self.fields.contains_key(FIELD_TO)
    }

    /// True for module/include/settings records: no usable `object` type, or
    /// an explicit `omftype`/`module` marker.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.object_type().is_none()
            || self.fields.contains_key("omftype")
            || self.fields.contains_key("module")
    }

    /// True when the record names a valid parent.
    #[must_use]
    pub fn is_child(&self) -> bool {
        self.parent().is_some()
    }

    /// Classifies the record from its current fields.
    #[must_use]
    pub fn relationship(&self) -> Relationship {
        if self.is_line() {
            Relationship::Line
        } else if self.is_configuration() {
            Relationship::ConfigurationNode
        } else if self.is_child() {
            Relationship::ChildNode
        } else {
            Relationship::IndependentNode
        }
    }

    /// Converts numeric-looking `longitude`/`latitude` strings into numbers.
    ///
    /// Input files mix spellings ("594.48…" next to 594.48); the store only
    /// ever holds the numeric form. Values that do not pass
    /// [`is_number_string`] are left as-is.
    pub fn normalize_coordinates(&mut self) {
        for field in [FIELD_LONGITUDE, FIELD_LATITUDE] {
            if let Some(FieldValue::Text(s)) = self.fields.get(field) {
                if is_number_string(s) {
                    if let Ok(n) = s.parse::<f64>() {
                        self.fields.insert(field.to_owned(), FieldValue::Number(n));
                    }
                }
            }
        }
    }
}

impl FromIterator<(String, FieldValue)> for FeederObject {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, FieldValue)> for FeederObject {
    fn from_iter<T: IntoIterator<Item = (&'a str, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
        }
    }
}
