//! Which end of a selection did the user extend last?
//!
//! Hosts don't report the direction of a selection drag, so the boundary
//! closest to the last known pointer x is taken as the active one. Exact
//! ties, and selections made before the pointer ever moved, resolve to the
//! end boundary.

use core_types::{CaretCoordinate, ControlGeometry, PointerPosition};
use input_core::SelectionSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

impl Boundary {
    pub fn offset(self, snapshot: &SelectionSnapshot) -> usize {
        match self {
            Self::Start => snapshot.start(),
            Self::End => snapshot.end(),
        }
    }

    pub fn pick(self, start: CaretCoordinate, end: CaretCoordinate) -> CaretCoordinate {
        match self {
            Self::Start => start,
            Self::End => end,
        }
    }
}

/// Pick the boundary nearest to the pointer. Ties go to [`Boundary::End`].
pub fn active_boundary(
    geometry: &ControlGeometry,
    start: CaretCoordinate,
    end: CaretCoordinate,
    pointer: Option<PointerPosition>,
) -> Boundary {
    let Some(pointer) = pointer else {
        return Boundary::End;
    };

    let to_start = (pointer.x - geometry.caret_x(start)).abs();
    let to_end = (pointer.x - geometry.caret_x(end)).abs();
    if to_end <= to_start {
        Boundary::End
    } else {
        Boundary::Start
    }
}

/// Offset of the boundary the overlay should be anchored to.
pub fn resolve_anchor_offset(
    snapshot: &SelectionSnapshot,
    geometry: &ControlGeometry,
    start: CaretCoordinate,
    end: CaretCoordinate,
    pointer: Option<PointerPosition>,
) -> usize {
    active_boundary(geometry, start, end, pointer).offset(snapshot)
}
