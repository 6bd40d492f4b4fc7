// SPDX-License-Identifier: Apache-2.0
//! Object keys: string-encoded non-negative integers.
//!
//! Feeder files address every object by a decimal string key. Leading zeros
//! are preserved ("00900" and "900" are distinct keys), so the raw spelling
//! is the identity. Ordering is numeric first, then by raw spelling, which
//! keeps store iteration aligned with the ascending-integer order the
//! upstream data was written in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of one object inside a feeder tree.
///
/// Invariants
/// - The spelling is non-empty and consists of ASCII digits only.
/// - Two keys with the same numeric value but different spellings (leading
///   zeros) are distinct keys.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Parses a raw key, rejecting anything that is not a string-encoded
    /// non-negative integer.
    pub fn parse(raw: &str) -> Result<Self, InvalidKey> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidKey {
                key: raw.to_owned(),
            });
        }
        Ok(Self(raw.to_owned()))
    }

    /// Returns the raw spelling of the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The spelling with leading zeros stripped (the canonical numeric form).
    ///
    /// `"00900"` and `"900"` share the digits `"900"`; the all-zeros key
    /// canonicalizes to `"0"`.
    #[must_use]
    pub(crate) fn digits(&self) -> &str {
        let stripped = self.0.trim_start_matches('0');
        if stripped.is_empty() {
            "0"
        } else {
            stripped
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialOrd for ObjectKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectKey {
    /// Numeric order first (digit-count then lexicographic on the stripped
    /// digits, which never overflows), raw spelling as the tiebreak.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.digits(), other.digits());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

/// Error returned when a raw key is not a string-encoded non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("the key {key:?} is not a string-encoded non-negative integer")]
pub struct InvalidKey {
    /// The offending raw key.
    pub key: String,
}

/// Returns the lowest non-negative integer (as a key) not already in use.
///
/// "In use" compares numeric values, so a stored `"007"` occupies 7. The
/// returned key is always spelled without leading zeros.
#[must_use]
pub fn next_free_key<'a, I>(keys: I) -> ObjectKey
where
    I: IntoIterator<Item = &'a ObjectKey>,
{
    let used: std::collections::BTreeSet<&str> = keys.into_iter().map(ObjectKey::digits).collect();
    let mut candidate: u64 = 0;
    loop {
        let spelled = candidate.to_string();
        if !used.contains(spelled.as_str()) {
            return ObjectKey(spelled);
        }
        candidate += 1;
    }
}
