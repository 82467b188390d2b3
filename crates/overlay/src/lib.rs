//! # overlay
//!
//! The floating "translate" overlay: where it goes and when it lives.
//!
//! - [`active_boundary`]: which selection boundary the overlay anchors to
//! - [`place`]: viewport-safe position next to the anchor
//! - [`OverlayController`]: a pure state machine from [`OverlayEvent`]s to
//!   [`OverlayAction`]s; hosts execute the actions
//!
//! Nothing here touches a page. All coordinates are viewport CSS pixels.

mod controller;
mod direction;
mod event;
mod placement;

pub use controller::{ControllerConfig, OverlayController, OverlayPhase};
pub use direction::{Boundary, active_boundary, resolve_anchor_offset};
pub use event::{Notice, OverlayAction, OverlayEvent, OverlayId, PointerTarget, Ticket};
pub use placement::{Placement, PlacementConfig, Side, place};
