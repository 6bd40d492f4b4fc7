// SPDX-License-Identifier: Apache-2.0
//! Linear-scan search over the store.
//!
//! A record matches when its key, any of its field names, or any of its
//! rendered field values matches the term. Numbers compare through the same
//! textual rendering the UI shows, so searching for `240` finds a record
//! whose voltage is stored as the number `240`.

use crate::key::ObjectKey;
use crate::tree::FeederTree;

/// Keys of records with an exact key, field-name, or field-value match for
/// `term`, in key order. Whitespace around the term is ignored; an empty or
/// whitespace-only term matches nothing.
#[must_use]
pub fn find_exact_matching_objects(tree: &FeederTree, term: &str) -> Vec<ObjectKey> {
    find_matching_objects(tree, term, |candidate, term| candidate == term)
}

/// Keys of records where the key, a field name, or a rendered field value
/// contains `term` as a substring, in key order. The same empty-term rule as
/// [`find_exact_matching_objects`] applies.
#[must_use]
pub fn find_substring_matching_objects(tree: &FeederTree, term: &str) -> Vec<ObjectKey> {
    find_matching_objects(tree, term, |candidate, term| candidate.contains(term))
}

fn find_matching_objects(
    tree: &FeederTree,
    term: &str,
    matches: impl Fn(&str, &str) -> bool,
) -> Vec<ObjectKey> {
    let term = term.trim();
    if term.is_empty() {
        return Vec::new();
    }
    tree.iter()
        .filter(|(key, object)| {
            matches(key.as_str(), term)
                || object
                    .iter()
                    .any(|(name, value)| matches(name, term) || matches(&value.render(), term))
        })
        .map(|(key, _)| key.clone())
        .collect()
}
