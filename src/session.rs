//! Content-script session: wires page events through the tracker, caret
//! geometry, directionality heuristic and overlay controller, then executes
//! the controller's actions against a [`PageHost`].

use core_types::{Point, PointerPosition, Size};
use input_core::{
    ControlId, SelectionOutcome, SelectionSnapshot, SelectionTarget, SelectionTracker,
    replace_selection,
};
use layout::{GeometryError, resolve_selection};
use overlay::{
    ControllerConfig, Notice, OverlayAction, OverlayController, OverlayEvent, OverlayId,
    OverlayPhase, PointerTarget, Ticket, active_boundary,
};

use crate::host::PageHost;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionConfig {
    pub overlay: ControllerConfig,
}

pub struct ContentSession<H: PageHost> {
    host: H,
    tracker: SelectionTracker,
    controller: OverlayController,
}

impl<H: PageHost> ContentSession<H> {
    pub fn new(host: H, config: SessionConfig) -> Self {
        Self {
            host,
            tracker: SelectionTracker::new(),
            controller: OverlayController::new(config.overlay),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn current_overlay(&self) -> Option<OverlayId> {
        self.controller.current()
    }

    pub fn overlay_phase(&self) -> Option<OverlayPhase> {
        self.controller.phase()
    }

    // =========================================================================
    // Page events
    // =========================================================================

    pub fn pointer_moved(&mut self, pos: PointerPosition) {
        self.tracker.pointer_moved(pos);
    }

    /// Pointer or key release on `target` with the element's current
    /// selection offsets.
    pub fn selection_event(&mut self, target: SelectionTarget<'_>, start: usize, end: usize) {
        let event = match self.tracker.on_selection_event(&target, start, end) {
            SelectionOutcome::Ignored => return,
            SelectionOutcome::Collapsed { control } => OverlayEvent::SelectionCollapsed { control },
            SelectionOutcome::Selected(snapshot) => match self.anchor(&snapshot, target.value) {
                Ok(anchor) => OverlayEvent::Selected { snapshot, anchor },
                Err(e) => {
                    log::warn!(target: "easywriter.session", "no caret geometry: {e}");
                    OverlayEvent::SelectionUnmeasurable {
                        control: snapshot.control(),
                    }
                }
            },
        };
        self.dispatch(event);
    }

    pub fn pointer_down(&mut self, target: PointerTarget) {
        self.dispatch(OverlayEvent::PointerDown { target });
    }

    pub fn focus_changed(&mut self, control: ControlId) {
        self.dispatch(OverlayEvent::FocusChanged { control });
    }

    // =========================================================================
    // Overlay / collaborator callbacks
    // =========================================================================

    pub fn overlay_measured(&mut self, overlay: OverlayId, size: Size, viewport: Size) {
        self.dispatch(OverlayEvent::OverlayMeasured {
            overlay,
            size,
            viewport,
        });
    }

    pub fn overlay_measure_failed(&mut self, overlay: OverlayId) {
        self.dispatch(OverlayEvent::OverlayMeasureFailed { overlay });
    }

    pub fn translate_invoked(&mut self, overlay: OverlayId) {
        self.dispatch(OverlayEvent::TranslateInvoked { overlay });
    }

    pub fn translation_completed(&mut self, ticket: Ticket, result: Result<String, String>) {
        self.dispatch(OverlayEvent::TranslationCompleted { ticket, result });
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Viewport point the overlay hangs off: the vertical center of the
    /// boundary the user most likely extended last.
    fn anchor(
        &mut self,
        snapshot: &SelectionSnapshot,
        value: &str,
    ) -> Result<Point, GeometryError> {
        let geometry = self
            .host
            .control_geometry(snapshot.control())
            .ok_or(GeometryError::ControlDetached(snapshot.control()))?;
        let (start, end) = resolve_selection(&mut self.host, snapshot, value)?;
        let boundary = active_boundary(&geometry, start, end, self.tracker.pointer());
        Ok(geometry.caret_center(boundary.pick(start, end)))
    }

    fn dispatch(&mut self, event: OverlayEvent) {
        let mut edit_failure: Option<String> = None;

        for action in self.controller.handle(event) {
            match action {
                OverlayAction::ShowOverlay { overlay } => self.host.show_overlay(overlay),
                OverlayAction::PlaceOverlay { overlay, placement } => {
                    self.host.place_overlay(overlay, placement)
                }
                OverlayAction::SetBusy { overlay, busy } => {
                    self.host.set_overlay_busy(overlay, busy)
                }
                OverlayAction::RemoveOverlay { overlay } => self.host.remove_overlay(overlay),
                OverlayAction::Translate { ticket, text } => {
                    log::debug!(
                        target: "easywriter.session",
                        "translate {} chars for {ticket:?}",
                        text.chars().count()
                    );
                    self.host.dispatch_translation(ticket, text);
                }
                OverlayAction::ReplaceSelection { snapshot, text } => {
                    edit_failure = self.replace(&snapshot, &text).err();
                }
                // The translation arrived but could not be written back.
                OverlayAction::Notify(Notice::TranslationSucceeded) if edit_failure.is_some() => {
                    let reason = edit_failure.take().unwrap_or_default();
                    self.host.notify(&Notice::TranslationFailed { reason });
                }
                OverlayAction::Notify(notice) => self.host.notify(&notice),
            }
        }
    }

    fn replace(&mut self, snapshot: &SelectionSnapshot, text: &str) -> Result<usize, String> {
        let Some(control) = self.host.control(snapshot.control()) else {
            log::warn!(
                target: "easywriter.session",
                "{:?} is gone; translation dropped",
                snapshot.control()
            );
            return Err(format!("{:?} is no longer in the page", snapshot.control()));
        };
        match replace_selection(control, snapshot, text) {
            Ok(caret) => {
                log::debug!(target: "easywriter.edit", "replaced, caret at {caret}");
                Ok(caret)
            }
            Err(e) => {
                log::warn!(target: "easywriter.edit", "translation not applied: {e}");
                Err(e.to_string())
            }
        }
    }
}
