//! Overlay lifecycle.
//!
//! At most one overlay exists at a time. Its lifecycle:
//!
//! ```text
//! (absent) --Selected--> Positioning --Measured--> Ready --Invoked--> Busy
//!                                                    ^                  |
//!                                                    +----- failure ----+
//! Busy --success--> (absent)
//! ```
//!
//! Any new selection disposes the current overlay first. Completions carry a
//! [`Ticket`]; ones that don't match the current busy overlay are dropped.

use core_types::Point;
use input_core::{ControlId, SelectionSnapshot};

use crate::event::{Notice, OverlayAction, OverlayEvent, OverlayId, PointerTarget, Ticket};
use crate::placement::{Placement, PlacementConfig, Side, place};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerConfig {
    pub placement: PlacementConfig,
    pub preferred_side: Side,
}

/// Externally visible phase of the current overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPhase {
    Positioning,
    Ready,
    Busy(Ticket),
}

#[derive(Debug)]
enum Phase {
    Positioning,
    Ready(Placement),
    Busy { placement: Placement, ticket: Ticket },
}

#[derive(Debug)]
struct Current {
    id: OverlayId,
    snapshot: SelectionSnapshot,
    anchor: Point,
    phase: Phase,
}

#[derive(Debug)]
pub struct OverlayController {
    config: ControllerConfig,
    current: Option<Current>,
    next_overlay: u64,
    next_request: u64,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl OverlayController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            current: None,
            next_overlay: 1,
            next_request: 1,
        }
    }

    pub fn current(&self) -> Option<OverlayId> {
        self.current.as_ref().map(|c| c.id)
    }

    pub fn phase(&self) -> Option<OverlayPhase> {
        self.current.as_ref().map(|c| match c.phase {
            Phase::Positioning => OverlayPhase::Positioning,
            Phase::Ready(_) => OverlayPhase::Ready,
            Phase::Busy { ticket, .. } => OverlayPhase::Busy(ticket),
        })
    }

    pub fn handle(&mut self, event: OverlayEvent) -> Vec<OverlayAction> {
        match event {
            OverlayEvent::Selected { snapshot, anchor } => self.on_selected(snapshot, anchor),
            OverlayEvent::SelectionCollapsed { control } => self.on_collapsed(control),
            OverlayEvent::SelectionUnmeasurable { control } => {
                log::debug!(
                    target: "easywriter.overlay",
                    "selection in {control:?} could not be measured"
                );
                self.dispose()
            }
            OverlayEvent::FocusChanged { control } => self.on_focus(control),
            OverlayEvent::PointerDown { target } => match target {
                PointerTarget::Elsewhere => self.dispose(),
                PointerTarget::Overlay | PointerTarget::TextControl(_) => Vec::new(),
            },
            OverlayEvent::OverlayMeasured {
                overlay,
                size,
                viewport,
            } => {
                let config = self.config;
                let Some(cur) = self.current_if(overlay) else {
                    return Vec::new();
                };
                if !matches!(cur.phase, Phase::Positioning) {
                    return Vec::new();
                }
                let placement = place(
                    cur.anchor,
                    size,
                    viewport,
                    config.preferred_side,
                    &config.placement,
                );
                cur.phase = Phase::Ready(placement);
                vec![OverlayAction::PlaceOverlay { overlay, placement }]
            }
            OverlayEvent::OverlayMeasureFailed { overlay } => {
                if self.current_if(overlay).is_none() {
                    return Vec::new();
                }
                log::warn!(
                    target: "easywriter.overlay",
                    "overlay {overlay:?} could not be measured"
                );
                self.dispose()
            }
            OverlayEvent::TranslateInvoked { overlay } => self.on_invoked(overlay),
            OverlayEvent::TranslationCompleted { ticket, result } => {
                self.on_completed(ticket, result)
            }
        }
    }

    fn current_if(&mut self, overlay: OverlayId) -> Option<&mut Current> {
        self.current.as_mut().filter(|c| c.id == overlay)
    }

    fn dispose(&mut self) -> Vec<OverlayAction> {
        match self.current.take() {
            Some(cur) => {
                log::debug!(target: "easywriter.overlay", "dispose {:?}", cur.id);
                vec![OverlayAction::RemoveOverlay { overlay: cur.id }]
            }
            None => Vec::new(),
        }
    }

    fn on_selected(&mut self, snapshot: SelectionSnapshot, anchor: Point) -> Vec<OverlayAction> {
        let mut actions = self.dispose();

        let id = OverlayId::from_raw(self.next_overlay);
        self.next_overlay += 1;
        log::debug!(
            target: "easywriter.overlay",
            "show {id:?} for {:?} [{}, {})",
            snapshot.control(),
            snapshot.start(),
            snapshot.end()
        );
        self.current = Some(Current {
            id,
            snapshot,
            anchor,
            phase: Phase::Positioning,
        });
        actions.push(OverlayAction::ShowOverlay { overlay: id });
        actions
    }

    fn on_collapsed(&mut self, control: ControlId) -> Vec<OverlayAction> {
        // A busy overlay outlives its selection collapsing in the same control.
        let keep = self.current.as_ref().is_some_and(|cur| {
            matches!(cur.phase, Phase::Busy { .. }) && cur.snapshot.control() == control
        });
        if keep { Vec::new() } else { self.dispose() }
    }

    fn on_focus(&mut self, control: ControlId) -> Vec<OverlayAction> {
        let elsewhere = self
            .current
            .as_ref()
            .is_some_and(|cur| cur.snapshot.control() != control);
        if elsewhere { self.dispose() } else { Vec::new() }
    }

    fn on_invoked(&mut self, overlay: OverlayId) -> Vec<OverlayAction> {
        let request = self.next_request;
        let Some(cur) = self.current_if(overlay) else {
            return Vec::new();
        };
        let placement = match cur.phase {
            Phase::Ready(p) => p,
            Phase::Busy { .. } => {
                log::debug!(target: "easywriter.overlay", "{overlay:?} already translating");
                return Vec::new();
            }
            Phase::Positioning => return Vec::new(),
        };

        let ticket = Ticket { overlay, request };
        cur.phase = Phase::Busy { placement, ticket };
        let text = cur.snapshot.text().to_owned();
        self.next_request += 1;

        vec![
            OverlayAction::SetBusy {
                overlay,
                busy: true,
            },
            OverlayAction::Translate { ticket, text },
        ]
    }

    fn on_completed(
        &mut self,
        ticket: Ticket,
        result: Result<String, String>,
    ) -> Vec<OverlayAction> {
        let matches = matches!(
            &self.current,
            Some(Current { phase: Phase::Busy { ticket: t, .. }, .. }) if *t == ticket
        );
        if !matches {
            log::debug!(target: "easywriter.overlay", "dropping stale completion {ticket:?}");
            return Vec::new();
        }

        match result {
            Ok(text) => {
                let Some(cur) = self.current.take() else {
                    return Vec::new();
                };
                vec![
                    OverlayAction::RemoveOverlay { overlay: cur.id },
                    OverlayAction::ReplaceSelection {
                        snapshot: cur.snapshot,
                        text,
                    },
                    OverlayAction::Notify(Notice::TranslationSucceeded),
                ]
            }
            Err(reason) => {
                let Some(cur) = self.current.as_mut() else {
                    return Vec::new();
                };
                if let Phase::Busy { placement, .. } = cur.phase {
                    cur.phase = Phase::Ready(placement);
                }
                vec![
                    OverlayAction::SetBusy {
                        overlay: cur.id,
                        busy: false,
                    },
                    OverlayAction::Notify(Notice::TranslationFailed { reason }),
                ]
            }
        }
    }
}
