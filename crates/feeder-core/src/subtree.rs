// SPDX-License-Identifier: Apache-2.0
//! Subtree resolution: which keys are structurally entangled with a record.
//!
//! Two consumers share the machinery. Removal needs the full transitive
//! closure of ownership (`children`) and connection (`lines`) edges so a
//! record and everything hanging off it can be deleted as one unit. The
//! render layer needs a much shallower set: one hop of visual context around
//! each changed record, so only the affected circles and lines are redrawn.
//!
//! The feeder data model claims to be acyclic but real files are not (mutual
//! parent references have been observed in the wild), so both traversals run
//! with an explicit visited set and work queue, never call-depth recursion.

use std::collections::{BTreeSet, VecDeque};

use tracing::warn;

use crate::key::ObjectKey;
use crate::linkmap::{LinkMap, Records};
use crate::object::FeederObject;

/// Computes the transitive closure of child and line edges below `seed`.
///
/// Only outward edges are followed: the children of a visited key and the
/// lines connected to it. Parents and the far endpoints of merely-connected
/// lines are never pulled in. The result is in first-visit order and always
/// excludes `seed` itself, even when a reference cycle leads back to it; a
/// cycle that does so is reported as a data-integrity warning.
#[must_use]
pub(crate) fn removal_closure(seed: &ObjectKey, links: &LinkMap) -> Vec<ObjectKey> {
    let mut visited: BTreeSet<ObjectKey> = BTreeSet::new();
    visited.insert(seed.clone());
    let mut order: Vec<ObjectKey> = Vec::new();
    let mut queue: VecDeque<ObjectKey> = VecDeque::new();
    enqueue_links(seed, links, &mut queue);

    while let Some(key) = queue.pop_front() {
        if !visited.insert(key.clone()) {
            if key == *seed {
                warn!(
                    seed = %seed,
                    "removal traversal cycled back to its starting record; the graph is not a tree"
                );
            }
            continue;
        }
        order.push(key.clone());
        enqueue_links(&key, links, &mut queue);
    }
    order
}

fn enqueue_links(key: &ObjectKey, links: &LinkMap, queue: &mut VecDeque<ObjectKey>) {
    if let Some(children) = links.children_of(key) {
        queue.extend(children.iter().cloned());
    }
    if let Some(lines) = links.lines_of(key) {
        queue.extend(lines.iter().cloned());
    }
}

/// A set of records selected for redraw: the primary keys that changed plus
/// the one-hop visual context around them.
///
/// The render surface consumes this read-only; the selection holds no record
/// data, only keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSelection {
    primary: Vec<ObjectKey>,
    subtree: BTreeSet<ObjectKey>,
}

impl RenderSelection {
    /// Starts a selection from the keys that changed. The subtree set
    /// initially equals the primary set.
    #[must_use]
    pub fn new<I: IntoIterator<Item = ObjectKey>>(primary: I) -> Self {
        let primary: Vec<ObjectKey> = primary.into_iter().collect();
        let subtree = primary.iter().cloned().collect();
        Self { primary, subtree }
    }

    /// The keys the selection was seeded with, in seed order.
    #[must_use]
    pub fn primary_keys(&self) -> &[ObjectKey] {
        &self.primary
    }

    /// The full redraw set, sorted by key.
    #[must_use]
    pub fn subtree_keys(&self) -> &BTreeSet<ObjectKey> {
        &self.subtree
    }

    /// Expands the subtree set one hop around every primary key.
    ///
    /// Per primary key `p`:
    /// - the children of `p` join the set;
    /// - if `p` is a line, both of its endpoints join;
    /// - if `p` has a parent, the parent joins; a parent that is itself a
    ///   line additionally pulls in its two endpoints and its children;
    /// - every line connected to `p` joins, along with that line's endpoints
    ///   and children.
    ///
    /// Unlike removal, this never descends further: grandchildren and the
    /// lines of children stay out unless one of the rules above reaches them
    /// directly. Lines, however, always arrive with both endpoints so the
    /// render layer can redraw them end to end.
    pub fn expand_for_redraw(&mut self, records: &Records, links: &LinkMap) {
        let primary = self.primary.clone();
        for key in &primary {
            let Some(object) = records.get(key) else {
                continue;
            };
            if let Some(children) = links.children_of(key) {
                self.subtree.extend(children.iter().cloned());
            }
            if object.is_line() {
                self.insert_endpoints(object, links);
            }
            if let Some(parent_key) = object.parent().and_then(|name| links.key_of(name)) {
                self.subtree.insert(parent_key.clone());
                if let Some(parent) = records.get(parent_key) {
                    if parent.is_line() {
                        self.insert_endpoints(parent, links);
                        if let Some(children) = links.children_of(parent_key) {
                            self.subtree.extend(children.iter().cloned());
                        }
                    }
                }
            }
            for line_key in links.lines_of(key).unwrap_or(&[]) {
                self.subtree.insert(line_key.clone());
                if let Some(line) = records.get(line_key) {
                    self.insert_endpoints(line, links);
                }
                if let Some(children) = links.children_of(line_key) {
                    self.subtree.extend(children.iter().cloned());
                }
            }
        }
    }

    fn insert_endpoints(&mut self, line: &FeederObject, links: &LinkMap) {
        for name in [line.from_node(), line.to_node()].into_iter().flatten() {
            if let Some(key) = links.key_of(name) {
                self.subtree.insert(key.clone());
            }
        }
    }
}
