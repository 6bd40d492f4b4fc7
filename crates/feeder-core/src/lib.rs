// SPDX-License-Identifier: Apache-2.0
//! feeder-core: the tree/graph data model behind a distribution-feeder
//! viewer.
//!
//! An electrical distribution feeder arrives as a flat map of keyed records:
//! nodes, the lines connecting them, child equipment hanging off nodes, and
//! non-geometric configuration records. [`FeederTree`] stores those records,
//! validates keys, normalizes coordinates, and maintains the derived
//! [`LinkMap`] relationship index (name lookup, parent→children,
//! node→connected-lines) through every mutation. On top of the store sit the
//! subtree resolver — which records must be deleted or redrawn together —
//! and thin view-projection helpers for grid layout, drag transforms, and
//! search.
//!
//! The graph is supposed to be a tree but is not guaranteed acyclic; every
//! traversal here is cycle-safe by construction.
#![forbid(unsafe_code)]

mod key;
mod layout;
mod linkmap;
mod object;
mod search;
mod subtree;
mod tree;
mod value;

pub use key::{next_free_key, InvalidKey, ObjectKey};
pub use layout::{insert_coordinates, move_selection, Pointer, ViewTransform};
pub use linkmap::LinkMap;
pub use object::{FeederObject, Relationship};
pub use search::{find_exact_matching_objects, find_substring_matching_objects};
pub use subtree::RenderSelection;
pub use tree::{FeederTree, TreeError};
pub use value::{is_number_string, FieldValue};
