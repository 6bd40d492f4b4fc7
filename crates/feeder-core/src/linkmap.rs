// SPDX-License-Identifier: Apache-2.0
//! Derived relationship index over a feeder record set.
//!
//! Three maps, all re-derivable from the records alone:
//!
//! - `names`: object name → key,
//! - `children`: key → keys of records whose `parent` resolves to it,
//! - `lines`: key → keys of line records with an endpoint resolving to it.
//!
//! The index has no write path of its own. Every store mutation calls the
//! incremental primitives here synchronously, and [`LinkMap::build`] can
//! always recompute the whole thing for recovery or testing. `children` and
//! `lines` hold an entry only while at least one link exists; an empty bucket
//! is deleted rather than kept, so "has children" checks stay branch-free.

use std::collections::BTreeMap;

use tracing::warn;

use crate::key::ObjectKey;
use crate::object::FeederObject;

/// Record set type shared with the store.
pub(crate) type Records = BTreeMap<ObjectKey, FeederObject>;

/// Name, parent/child, and node/line maps derived from a record set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkMap {
    names: BTreeMap<String, ObjectKey>,
    children: BTreeMap<ObjectKey, Vec<ObjectKey>>,
    lines: BTreeMap<ObjectKey, Vec<ObjectKey>>,
}

impl LinkMap {
    /// Builds the full index from scratch.
    ///
    /// Names are registered first so that links resolve regardless of key
    /// order (a child routinely precedes its parent in the file).
    #[must_use]
    pub fn build(records: &Records) -> Self {
        let mut map = Self::default();
        for (key, object) in records {
            if let Some(name) = object.name() {
                map.names.insert(name.to_owned(), key.clone());
            }
        }
        for key in records.keys() {
            map.map_child(key, records);
            map.map_line(key, records);
        }
        map
    }

    /// Discards and recomputes the index in place.
    pub fn rebuild(&mut self, records: &Records) {
        *self = Self::build(records);
    }

    /// Resolves a name to the key that owns it.
    #[must_use]
    pub fn key_of(&self, name: &str) -> Option<&ObjectKey> {
        self.names.get(name)
    }

    /// Keys of the records owned by `key` through `parent` references.
    #[must_use]
    pub fn children_of(&self, key: &ObjectKey) -> Option<&[ObjectKey]> {
        self.children.get(key).map(Vec::as_slice)
    }

    /// Keys of the line records with an endpoint at `key`.
    #[must_use]
    pub fn lines_of(&self, key: &ObjectKey) -> Option<&[ObjectKey]> {
        self.lines.get(key).map(Vec::as_slice)
    }

    /// True when `key` has at least one child or connected line.
    #[must_use]
    pub fn is_linked(&self, key: &ObjectKey) -> bool {
        self.children.contains_key(key) || self.lines.contains_key(key)
    }

    /// Registers `key` in its parent's children bucket.
    ///
    /// Idempotent: a key already present in the bucket is not duplicated.
    /// Records without a resolvable parent are silently skipped; a parent
    /// whose name is a sentinel is not in `names`, so pointing at it links
    /// nothing (documented omission, not an error).
    pub fn map_child(&mut self, key: &ObjectKey, records: &Records) {
        let Some(parent_key) = records
            .get(key)
            .and_then(FeederObject::parent)
            .and_then(|name| self.names.get(name))
            .cloned()
        else {
            return;
        };
        let bucket = self.children.entry(parent_key).or_default();
        if !bucket.contains(key) {
            bucket.push(key.clone());
        }
    }

    /// Registers a line `key` in both endpoints' line buckets.
    ///
    /// Same idempotence and silent-omission rules as [`Self::map_child`];
    /// each endpoint resolves independently, so a line with one dangling end
    /// still links the other.
    pub fn map_line(&mut self, key: &ObjectKey, records: &Records) {
        let Some(object) = records.get(key) else {
            return;
        };
        let endpoints = [object.from_node(), object.to_node()];
        for name in endpoints.into_iter().flatten() {
            if let Some(node_key) = self.names.get(name).cloned() {
                let bucket = self.lines.entry(node_key).or_default();
                if !bucket.contains(key) {
                    bucket.push(key.clone());
                }
            }
        }
    }

    /// Removes `key` from its parent's children bucket.
    ///
    /// When the bucket empties, the parent's entry is deleted entirely. If
    /// the record is not currently mapped as anyone's child, a warning is
    /// emitted and the index is left unchanged.
    pub fn unmap_child(&mut self, key: &ObjectKey, records: &Records) {
        if !self.unlink_child(key, records) {
            warn!(key = %key, "unmap_child: record is not mapped as any object's child");
        }
    }

    /// Removes a line `key` from both endpoints' line buckets.
    ///
    /// Empty buckets are deleted. If the record is not mapped as a connected
    /// line of any node, a warning is emitted and the index is unchanged.
    pub fn unmap_line(&mut self, key: &ObjectKey, records: &Records) {
        if !self.unlink_line(key, records) {
            warn!(key = %key, "unmap_line: record is not mapped as a connected line of any node");
        }
    }

    fn unlink_child(&mut self, key: &ObjectKey, records: &Records) -> bool {
        records
            .get(key)
            .and_then(FeederObject::parent)
            .and_then(|name| self.names.get(name))
            .cloned()
            .is_some_and(|parent| Self::drop_link(&mut self.children, &parent, key))
    }

    fn unlink_line(&mut self, key: &ObjectKey, records: &Records) -> bool {
        let Some(object) = records.get(key) else {
            return false;
        };
        let mut removed = false;
        let endpoints = [object.from_node(), object.to_node()];
        for name in endpoints.into_iter().flatten() {
            if let Some(node_key) = self.names.get(name).cloned() {
                removed |= Self::drop_link(&mut self.lines, &node_key, key);
            }
        }
        removed
    }

    /// Unregisters a set of keys ahead of record removal or replacement.
    ///
    /// Each key's name entry is dropped, and its links are unmapped per
    /// role. A record can hold both roles at once (a line carrying a
    /// `parent` field), so both are checked independently, mirroring
    /// [`Self::build`]. Unlinked records (independent nodes, orphan lines)
    /// pass through without a diagnostic; the warning channel is reserved
    /// for direct unmap calls.
    pub fn remove(&mut self, keys: &[ObjectKey], records: &Records) {
        for key in keys {
            let Some(object) = records.get(key) else {
                continue;
            };
            if object.is_line() {
                self.unlink_line(key, records);
            }
            if object.parent().is_some() {
                self.unlink_child(key, records);
            }
            if let Some(name) = object.name() {
                if self.names.get(name) == Some(key) {
                    self.names.remove(name);
                }
            }
        }
    }

    /// Re-registers a single key after its record changed in place.
    ///
    /// Both roles are mapped when the record holds both, as in
    /// [`Self::build`].
    pub fn add(&mut self, key: &ObjectKey, records: &Records) {
        let Some(object) = records.get(key) else {
            return;
        };
        if let Some(name) = object.name() {
            self.names.insert(name.to_owned(), key.clone());
        }
        if object.is_line() {
            self.map_line(key, records);
        }
        if object.parent().is_some() {
            self.map_child(key, records);
        }
    }

    /// Removes one link from a bucket, deleting the bucket when it empties.
    /// Returns whether the link existed.
    fn drop_link(
        buckets: &mut BTreeMap<ObjectKey, Vec<ObjectKey>>,
        owner: &ObjectKey,
        key: &ObjectKey,
    ) -> bool {
        let Some(bucket) = buckets.get_mut(owner) else {
            return false;
        };
        let before = bucket.len();
        bucket.retain(|k| k != key);
        let removed = bucket.len() != before;
        if bucket.is_empty() {
            buckets.remove(owner);
        }
        removed
    }

    /// True when no names, children, or lines are registered at all.
    #[must_use]
    pub fn is_unlinked(&self) -> bool {
        self.names.is_empty() && self.children.is_empty() && self.lines.is_empty()
    }

    /// Iterates over all registered `(name, key)` pairs.
    pub fn names(&self) -> impl Iterator<Item = (&str, &ObjectKey)> {
        self.names.iter().map(|(n, k)| (n.as_str(), k))
    }

    #[cfg(test)]
    pub(crate) fn has_no_links(&self) -> bool {
        self.children.is_empty() && self.lines.is_empty()
    }
}
