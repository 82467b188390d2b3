//! # input_core
//!
//! UI-agnostic selection state for host text controls.
//!
//! - [`ControlId`] / [`ControlKind`]: which control, and whether it wraps
//! - [`SelectionTracker`]: turns pointer/key release events into [`SelectionSnapshot`]s
//! - [`HostControl`] / [`replace_selection`]: the mutation interface used to
//!   write a translation back into the page
//!
//! Offsets are UTF-16 code units throughout, matching the DOM selection API.
//! This crate depends only on `core_types`, `log` and `thiserror`; DOM or
//! widget specifics live in integration layers.

mod control;
mod id;
mod kind;
mod memory;
mod selection;
mod text;
mod tracker;

pub use control::{EditError, HostControl, replace_selection};
pub use id::{ControlId, ControlIdAllocator};
pub use kind::ControlKind;
pub use memory::MemoryControl;
pub use selection::{SelectionRange, SelectionSnapshot};
pub use tracker::{SelectionOutcome, SelectionTarget, SelectionTracker};

pub use text::{
    byte_index_for_utf16, filter_single_line, normalize_newlines, splice_utf16, split_at_utf16,
    utf16_len,
};
