// SPDX-License-Identifier: Apache-2.0
//! The authoritative keyed store of feeder records.
//!
//! [`FeederTree`] owns the raw record map and the [`LinkMap`] derived from
//! it, and keeps the two consistent across every mutation path. Callers
//! never touch the index directly; each store operation patches it in the
//! same call that changes the records.

use std::collections::BTreeMap;

use tracing::debug;

use crate::key::{next_free_key, InvalidKey, ObjectKey};
use crate::linkmap::{LinkMap, Records};
use crate::object::{FeederObject, FIELD_FROM, FIELD_LATITUDE, FIELD_LONGITUDE, FIELD_NAME, FIELD_PARENT, FIELD_TO};
use crate::subtree::{removal_closure, RenderSelection};
use crate::value::FieldValue;

/// Failures surfaced by [`FeederTree`] operations.
///
/// Every variant is a hard failure raised before the store is touched; a
/// failed operation leaves the tree exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The key is not a string-encoded non-negative integer.
    #[error(transparent)]
    InvalidKey(#[from] InvalidKey),

    /// No record exists at the addressed key.
    #[error("no record exists at key {key:?}")]
    NotFound {
        /// The key as the caller supplied it.
        key: String,
    },

    /// In-place replacement across the line/node boundary is not allowed
    /// because the two sides carry incompatible link structure.
    #[error("the record at key {key} cannot be replaced across the line/node boundary")]
    ReplacedLine {
        /// The addressed key.
        key: ObjectKey,
    },

    /// A configuration record can only be replaced by another configuration
    /// record, and vice versa.
    #[error("the replacement for key {key} does not match the record's configuration status")]
    ConfigMismatch {
        /// The addressed key.
        key: ObjectKey,
    },

    /// The record still has children or connected lines and cannot be
    /// removed on its own.
    #[error("the record at key {key} still has children or connected lines")]
    NotRemovable {
        /// The addressed key.
        key: ObjectKey,
    },
}

/// The canonical keyed collection of feeder records.
///
/// Construction normalizes coordinate fields and derives the relationship
/// index; thereafter `insert`, `create`, `replace_node`, field edits, and
/// the removal operations all re-register the affected keys synchronously,
/// so the index is consistent with the records after every public call.
#[derive(Clone, Debug, Default)]
pub struct FeederTree {
    objects: Records,
    links: LinkMap,
}

impl FeederTree {
    /// Builds a tree from an external string-keyed record map.
    ///
    /// Keys must parse as string-encoded non-negative integers. Coordinate
    /// fields arriving as numeric-looking strings are converted to numbers
    /// on the way in.
    pub fn from_records(raw: BTreeMap<String, FeederObject>) -> Result<Self, TreeError> {
        let mut objects = Records::new();
        for (raw_key, mut object) in raw {
            let key = ObjectKey::parse(&raw_key)?;
            object.normalize_coordinates();
            objects.insert(key, object);
        }
        let links = LinkMap::build(&objects);
        debug!(records = objects.len(), "feeder tree constructed");
        Ok(Self { objects, links })
    }

    /// Returns the record at `key`, or [`TreeError::NotFound`].
    pub fn get(&self, key: &str) -> Result<&FeederObject, TreeError> {
        let key = ObjectKey::parse(key)?;
        self.objects.get(&key).ok_or_else(|| TreeError::NotFound {
            key: key.as_str().to_owned(),
        })
    }

    /// Whether a record exists at `key`. Malformed keys address nothing.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        ObjectKey::parse(key).is_ok_and(|key| self.objects.contains_key(&key))
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates over records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectKey, &FeederObject)> {
        self.objects.iter()
    }

    /// Resolves a display name to the key that owns it.
    #[must_use]
    pub fn key_of(&self, name: &str) -> Option<&ObjectKey> {
        self.links.key_of(name)
    }

    /// Stores `object` at `key`, overwriting any existing record there, and
    /// re-registers the key in the relationship index.
    pub fn insert(&mut self, key: ObjectKey, mut object: FeederObject) {
        object.normalize_coordinates();
        if self.objects.contains_key(&key) {
            self.links.remove(std::slice::from_ref(&key), &self.objects);
        }
        self.objects.insert(key.clone(), object);
        self.links.add(&key, &self.objects);
    }

    /// Stores `object` under a freshly assigned key and returns that key.
    ///
    /// The key is the lowest non-negative integer not already in use. If the
    /// record's name collides with an existing one, `_<n>` suffixes are
    /// tried (n = 1, 2, ...) until unique; the record already holding the
    /// base name keeps it.
    pub fn create(&mut self, mut object: FeederObject) -> ObjectKey {
        let key = next_free_key(self.objects.keys());
        if let Some(base) = object.name().map(str::to_owned) {
            if self.links.key_of(&base).is_some() {
                let mut n = 1u32;
                let unique = loop {
                    let candidate = format!("{base}_{n}");
                    if self.links.key_of(&candidate).is_none() {
                        break candidate;
                    }
                    n += 1;
                };
                object.set(FIELD_NAME, unique);
            }
        }
        self.insert(key.clone(), object);
        key
    }

    /// Replaces a non-line record's content in place, preserving the key,
    /// its coordinates, and every structural link to the rest of the graph.
    ///
    /// The existing record's coordinates are copied onto the replacement,
    /// its parent reference is forced onto (or stripped from) the
    /// replacement to match, and the replacement is renamed to
    /// `<object-type><key>` unless it is a configuration record. Lines and
    /// children elsewhere in the store that referenced the old name are
    /// rewritten to the new one.
    ///
    /// Neither side of the replacement may be a line, and a configuration
    /// record can only replace a configuration record. All validation runs
    /// before the first mutation, so a failed call changes nothing.
    pub fn replace_node(&mut self, key: &str, mut replacement: FeederObject) -> Result<(), TreeError> {
        let key = ObjectKey::parse(key)?;
        let existing = self.objects.get(&key).ok_or_else(|| TreeError::NotFound {
            key: key.as_str().to_owned(),
        })?;
        if existing.is_line() || replacement.is_line() {
            return Err(TreeError::ReplacedLine { key });
        }
        if existing.is_configuration() != replacement.is_configuration() {
            return Err(TreeError::ConfigMismatch { key });
        }

        for field in [FIELD_LONGITUDE, FIELD_LATITUDE] {
            match existing.get(field) {
                Some(value) => replacement.set(field, value.clone()),
                None => {
                    replacement.unset(field);
                }
            }
        }
        match existing.parent() {
            Some(parent) => replacement.set(FIELD_PARENT, parent.to_owned()),
            None => {
                // Strips even a sentinel "null" parent the caller left in.
                replacement.unset(FIELD_PARENT);
            }
        }
        let old_name = existing.name().map(str::to_owned);
        let new_name = if replacement.is_configuration() {
            None
        } else {
            replacement.object_type().map(|ty| format!("{ty}{key}"))
        };
        if let Some(name) = &new_name {
            replacement.set(FIELD_NAME, name.clone());
        }

        // The index entry for the outgoing record must come out while the
        // record is still intact; it is what the unmapping resolves against.
        self.links.remove(std::slice::from_ref(&key), &self.objects);
        if let (Some(old), Some(new)) = (&old_name, &new_name) {
            if old != new {
                self.rewrite_references(old, new);
            }
        }
        replacement.normalize_coordinates();
        self.objects.insert(key.clone(), replacement);
        self.links.add(&key, &self.objects);
        Ok(())
    }

    /// Rewrites every `to`/`from`/`parent` field equal to `old` to `new`.
    ///
    /// Link buckets are keyed by the renamed record's key, not its name, so
    /// the rewrite leaves the index untouched.
    fn rewrite_references(&mut self, old: &str, new: &str) {
        for object in self.objects.values_mut() {
            for field in [FIELD_TO, FIELD_FROM, FIELD_PARENT] {
                if object.get(field).and_then(FieldValue::as_text) == Some(old) {
                    object.set(field, new.to_owned());
                }
            }
        }
    }

    /// Sets one field on the record at `key`, keeping the index in step.
    pub fn set_field(&mut self, key: &str, field: &str, value: FieldValue) -> Result<(), TreeError> {
        self.edit(key, |object| {
            object.set(field, value);
            object.normalize_coordinates();
        })
    }

    /// Removes one field from the record at `key`, keeping the index in step.
    pub fn unset_field(&mut self, key: &str, field: &str) -> Result<(), TreeError> {
        self.edit(key, |object| {
            object.unset(field);
        })
    }

    fn edit(&mut self, key: &str, apply: impl FnOnce(&mut FeederObject)) -> Result<(), TreeError> {
        let key = ObjectKey::parse(key)?;
        if !self.objects.contains_key(&key) {
            return Err(TreeError::NotFound {
                key: key.as_str().to_owned(),
            });
        }
        self.links.remove(std::slice::from_ref(&key), &self.objects);
        if let Some(object) = self.objects.get_mut(&key) {
            apply(object);
        }
        self.links.add(&key, &self.objects);
        Ok(())
    }

    /// Whether the record at `key` has neither children nor connected lines
    /// and can therefore be removed on its own.
    pub fn is_removable(&self, key: &str) -> Result<bool, TreeError> {
        let key = ObjectKey::parse(key)?;
        if !self.objects.contains_key(&key) {
            return Err(TreeError::NotFound {
                key: key.as_str().to_owned(),
            });
        }
        Ok(self.links.children_of(&key).is_none() && self.links.lines_of(&key).is_none())
    }

    /// The set of keys that would have to be removed along with `key`:
    /// the transitive closure of child and line edges below it, in
    /// first-visit order, excluding `key` itself.
    pub fn subtree_to_remove(&self, key: &str) -> Result<Vec<ObjectKey>, TreeError> {
        let key = ObjectKey::parse(key)?;
        if !self.objects.contains_key(&key) {
            return Err(TreeError::NotFound {
                key: key.as_str().to_owned(),
            });
        }
        Ok(removal_closure(&key, &self.links))
    }

    /// Removes the record at `key` alone. Fails with
    /// [`TreeError::NotRemovable`] while children or lines still hang off
    /// it; use [`Self::remove_subtree`] to take them along.
    pub fn remove(&mut self, key: &str) -> Result<FeederObject, TreeError> {
        if !self.is_removable(key)? {
            return Err(TreeError::NotRemovable {
                // Validated by is_removable just above.
                key: ObjectKey::parse(key)?,
            });
        }
        let key = ObjectKey::parse(key)?;
        self.links.remove(std::slice::from_ref(&key), &self.objects);
        self.objects.remove(&key).ok_or_else(|| TreeError::NotFound {
            key: key.as_str().to_owned(),
        })
    }

    /// Removes the record at `key` together with its entire removal
    /// closure, returning the removed records in `(key, record)` pairs with
    /// the seed first.
    pub fn remove_subtree(&mut self, key: &str) -> Result<Vec<(ObjectKey, FeederObject)>, TreeError> {
        let closure = self.subtree_to_remove(key)?;
        let seed = ObjectKey::parse(key)?;
        let mut doomed = Vec::with_capacity(closure.len() + 1);
        doomed.push(seed);
        doomed.extend(closure);
        self.links.remove(&doomed, &self.objects);
        let mut removed = Vec::with_capacity(doomed.len());
        for key in doomed {
            if let Some(object) = self.objects.remove(&key) {
                removed.push((key, object));
            }
        }
        debug!(removed = removed.len(), "subtree removed");
        Ok(removed)
    }

    /// Builds the redraw set for a group of changed keys: the keys
    /// themselves plus one hop of visual context around each.
    #[must_use]
    pub fn redraw_selection<I: IntoIterator<Item = ObjectKey>>(&self, primary: I) -> RenderSelection {
        let mut selection = RenderSelection::new(primary);
        selection.expand_for_redraw(&self.objects, &self.links);
        selection
    }

    pub(crate) fn records(&self) -> &Records {
        &self.objects
    }

    /// Coordinate-only mutable access. Callers must not change `name`,
    /// `parent`, `to`, or `from` through this path; those edits go through
    /// [`Self::set_field`] so the index stays consistent.
    pub(crate) fn records_mut(&mut self) -> &mut Records {
        &mut self.objects
    }

    #[cfg(test)]
    pub(crate) fn links(&self) -> &LinkMap {
        &self.links
    }
}
