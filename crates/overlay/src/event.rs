use core_types::{Point, Size};
use input_core::{ControlId, SelectionSnapshot};

use crate::placement::Placement;

/// Identity of one overlay instance. Never reused within a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// Correlates a translation completion with the request that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub overlay: OverlayId,
    pub request: u64,
}

/// What a pointer-down landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Overlay,
    TextControl(ControlId),
    Elsewhere,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    TranslationSucceeded,
    TranslationFailed { reason: String },
}

/// Input to [`OverlayController::handle`](crate::OverlayController::handle).
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    // Selection
    Selected {
        snapshot: SelectionSnapshot,
        /// Viewport point the overlay hangs off (center of the active caret).
        anchor: Point,
    },
    SelectionCollapsed {
        control: ControlId,
    },
    /// A selection was made but its caret geometry could not be resolved.
    SelectionUnmeasurable {
        control: ControlId,
    },
    // Focus / pointer
    FocusChanged {
        control: ControlId,
    },
    PointerDown {
        target: PointerTarget,
    },
    // Overlay element
    OverlayMeasured {
        overlay: OverlayId,
        size: Size,
        viewport: Size,
    },
    OverlayMeasureFailed {
        overlay: OverlayId,
    },
    TranslateInvoked {
        overlay: OverlayId,
    },
    // Translation
    TranslationCompleted {
        ticket: Ticket,
        result: Result<String, String>,
    },
}

/// Effects the host must apply, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayAction {
    /// Insert the overlay element, hidden, so its size can be measured.
    ShowOverlay { overlay: OverlayId },
    /// Position and reveal the overlay.
    PlaceOverlay {
        overlay: OverlayId,
        placement: Placement,
    },
    SetBusy { overlay: OverlayId, busy: bool },
    RemoveOverlay { overlay: OverlayId },
    Translate { ticket: Ticket, text: String },
    ReplaceSelection {
        snapshot: SelectionSnapshot,
        text: String,
    },
    Notify(Notice),
}
