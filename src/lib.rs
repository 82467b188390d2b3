//! # easywriter
//!
//! Select Chinese text in a page's text field, click the floating
//! "translate" overlay, and the selection is replaced in place by its English
//! translation.
//!
//! [`ContentSession`] owns the whole flow and talks to the page only through
//! [`PageHost`]. On `wasm32` the `web` module provides the DOM host and the
//! content-script entry point; elsewhere any host (tests included) can drive
//! the same session, with [`TranslationWorker`] running its requests.

mod host;
mod session;
#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(not(target_arch = "wasm32"))]
mod worker;

pub use host::PageHost;
pub use session::{ContentSession, SessionConfig};
#[cfg(not(target_arch = "wasm32"))]
pub use worker::{Completion, TranslationWorker};

pub use core_types::{CaretCoordinate, ControlGeometry, Point, PointerPosition, Rect, Size};
pub use input_core::{ControlId, ControlKind, HostControl, SelectionTarget};
pub use overlay::{
    ControllerConfig, Notice, OverlayId, OverlayPhase, Placement, PlacementConfig, PointerTarget,
    Side, Ticket,
};
