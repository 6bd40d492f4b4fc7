// SPDX-License-Identifier: Apache-2.0
//! Spatial projection helpers for the render surface.
//!
//! Feeder files frequently omit coordinates for some or all records.
//! [`insert_coordinates`] gives every coordinate-less non-line record a
//! deterministic position on an expanding square grid so the whole feeder is
//! visible on first load. [`move_selection`] re-centers a dragged set of
//! records on a pointer position, un-projecting through the current view
//! transform. Lines carry no positions of their own (the render surface
//! draws them between their endpoints), so both helpers skip them, leaving
//! even garbage coordinate values on line records untouched.

use std::collections::BTreeSet;

use crate::key::ObjectKey;
use crate::object::{FIELD_LATITUDE, FIELD_LONGITUDE};
use crate::tree::FeederTree;
use crate::value::FieldValue;

/// The pan/zoom state of the render surface, used to map screen-space
/// pointer positions back into feeder coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Horizontal pan offset, in feeder units.
    pub offset_x: f64,
    /// Vertical pan offset, in feeder units.
    pub offset_y: f64,
    /// Zoom factor; screen units per feeder unit.
    pub scale: f64,
}

/// A pointer position in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Horizontal screen coordinate.
    pub x: f64,
    /// Vertical screen coordinate.
    pub y: f64,
}

/// Assigns grid coordinates to every non-line record that lacks them.
///
/// Placed records spiral outward in square shells from `(init_x, init_y)`:
/// each shell `r` first walks down its left column, then back along its
/// bottom row, so the `r`-th shell finishes at `(init_x + r * spacing,
/// init_y)`. Records that already carry coordinates keep them and do not
/// consume a grid slot.
pub fn insert_coordinates(tree: &mut FeederTree, init_x: f64, init_y: f64, spacing: f64) {
    let mut placed: usize = 0;
    let mut shell: usize = 0;
    for object in tree.records_mut().values_mut() {
        if object.is_line() || object.has_coordinates() {
            continue;
        }
        if (shell + 1) * (shell + 1) <= placed {
            shell += 1;
        }
        let step = placed - shell * shell;
        let (col, row) = if step <= shell {
            (step, shell)
        } else {
            (shell, 2 * shell - step)
        };
        object.set(
            FIELD_LONGITUDE,
            FieldValue::Number(init_x + to_f64(col) * spacing),
        );
        object.set(
            FIELD_LATITUDE,
            FieldValue::Number(init_y + to_f64(row) * spacing),
        );
        placed += 1;
    }
}

/// Re-centers the selected records on the pointer.
///
/// The pointer position is un-projected through `view` into feeder
/// coordinates, and each selected record is shifted by its offset from the
/// selection's average position, so the group keeps its shape while its
/// centroid lands under the pointer. Selected keys without a record, records
/// without a numeric position, and lines are left alone; records outside the
/// selection never move.
pub fn move_selection(
    tree: &mut FeederTree,
    selection: &[ObjectKey],
    pointer: Pointer,
    view: &ViewTransform,
) {
    let target_x = pointer.x / view.scale + view.offset_x;
    let target_y = view.offset_y - pointer.y / view.scale;

    let selected: BTreeSet<&ObjectKey> = selection.iter().collect();
    let mut count: usize = 0;
    let mut sum_x = 0.0_f64;
    let mut sum_y = 0.0_f64;
    for &key in &selected {
        let Some(object) = tree.records().get(key) else {
            continue;
        };
        if object.is_line() {
            continue;
        }
        if let (Some(lon), Some(lat)) = (object.longitude(), object.latitude()) {
            sum_x += lon;
            sum_y += lat;
            count += 1;
        }
    }
    if count == 0 {
        return;
    }
    let avg_x = sum_x / to_f64(count);
    let avg_y = sum_y / to_f64(count);

    for &key in &selected {
        let Some(object) = tree.records_mut().get_mut(key) else {
            continue;
        };
        if object.is_line() {
            continue;
        }
        if let (Some(lon), Some(lat)) = (object.longitude(), object.latitude()) {
            object.set(FIELD_LONGITUDE, FieldValue::Number(lon - avg_x + target_x));
            object.set(FIELD_LATITUDE, FieldValue::Number(lat - avg_y + target_y));
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(n: usize) -> f64 {
    n as f64
}
