//! Selection tracking for pointer/key release events.
//!
//! The tracker is pure: it inspects the event target and the reported
//! selection offsets and says what the selection now is. Showing or hiding
//! the overlay is the caller's job.
//!
//! Hosts must feed it on pointer release *and* key release, since keyboard
//! selection (shift+arrows, select-all) produces no pointer events.

use core_types::PointerPosition;

use crate::id::ControlId;
use crate::kind::ControlKind;
use crate::selection::{SelectionRange, SelectionSnapshot};
use crate::text::utf16_len;

/// The element a selection event was dispatched to.
#[derive(Clone, Copy, Debug)]
pub struct SelectionTarget<'a> {
    pub control: ControlId,
    /// `None` when the element is not an accepted text control.
    pub kind: Option<ControlKind>,
    /// The control's current value.
    pub value: &'a str,
}

/// Result of inspecting one selection event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Target is not a tracked control; nothing to do.
    Ignored,
    /// The control has no usable selection; any overlay for it should go away.
    Collapsed { control: ControlId },
    /// A new non-empty selection.
    Selected(SelectionSnapshot),
}

impl SelectionOutcome {
    pub fn snapshot(&self) -> Option<&SelectionSnapshot> {
        match self {
            Self::Selected(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn into_snapshot(self) -> Option<SelectionSnapshot> {
        match self {
            Self::Selected(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Observes selection events and remembers the latest pointer position.
#[derive(Clone, Debug, Default)]
pub struct SelectionTracker {
    pointer: Option<PointerPosition>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move. Last write wins.
    #[inline]
    pub fn pointer_moved(&mut self, pos: PointerPosition) {
        self.pointer = Some(pos);
    }

    /// The latest pointer position, if the pointer has moved since startup.
    #[inline]
    pub fn pointer(&self) -> Option<PointerPosition> {
        self.pointer
    }

    /// Inspect the selection reported by `target` after a pointer or key release.
    ///
    /// Offsets are UTF-16 code units. They are normalized and clamped to the
    /// value length. Whitespace-only selections count as collapsed.
    pub fn on_selection_event(
        &self,
        target: &SelectionTarget<'_>,
        selection_start: usize,
        selection_end: usize,
    ) -> SelectionOutcome {
        let Some(kind) = target.kind else {
            return SelectionOutcome::Ignored;
        };

        let range =
            SelectionRange::new(selection_start, selection_end).clamped(utf16_len(target.value));
        if range.is_empty() || range.slice(target.value).trim().is_empty() {
            log::trace!(
                target: "easywriter.tracker",
                "selection collapsed in {:?}",
                target.control
            );
            return SelectionOutcome::Collapsed {
                control: target.control,
            };
        }

        match SelectionSnapshot::capture(target.control, kind, target.value, range) {
            Some(snapshot) => {
                log::debug!(
                    target: "easywriter.tracker",
                    "selection {}..{} in {:?}",
                    snapshot.start(),
                    snapshot.end(),
                    snapshot.control()
                );
                SelectionOutcome::Selected(snapshot)
            }
            None => SelectionOutcome::Collapsed {
                control: target.control,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textarea(value: &str) -> SelectionTarget<'_> {
        SelectionTarget {
            control: ControlId::from_raw(7),
            kind: Some(ControlKind::MultiLine),
            value,
        }
    }

    #[test]
    fn non_text_targets_are_ignored() {
        let tracker = SelectionTracker::new();
        let target = SelectionTarget {
            control: ControlId::from_raw(1),
            kind: None,
            value: "whatever",
        };
        assert_eq!(tracker.on_selection_event(&target, 0, 3), SelectionOutcome::Ignored);
    }

    #[test]
    fn collapsed_selection_reports_control() {
        let tracker = SelectionTracker::new();
        let outcome = tracker.on_selection_event(&textarea("你好世界"), 2, 2);
        assert_eq!(
            outcome,
            SelectionOutcome::Collapsed {
                control: ControlId::from_raw(7)
            }
        );
        assert!(outcome.snapshot().is_none());
    }

    #[test]
    fn whitespace_only_selection_is_collapsed() {
        let tracker = SelectionTracker::new();
        let outcome = tracker.on_selection_event(&textarea("a  \n b"), 1, 5);
        assert!(matches!(outcome, SelectionOutcome::Collapsed { .. }));
    }

    #[test]
    fn selection_produces_snapshot() {
        let tracker = SelectionTracker::new();
        let outcome = tracker.on_selection_event(&textarea("你好世界"), 0, 2);
        let snap = outcome.into_snapshot().expect("selected");
        assert_eq!(snap.text(), "你好");
        assert_eq!(snap.kind(), ControlKind::MultiLine);
    }

    #[test]
    fn reversed_and_overlong_offsets_are_normalized() {
        let tracker = SelectionTracker::new();
        let snap = tracker
            .on_selection_event(&textarea("你好世界"), 40, 2)
            .into_snapshot()
            .expect("selected");
        assert_eq!((snap.start(), snap.end()), (2, 4));
    }

    #[test]
    fn pointer_is_last_write_wins() {
        let mut tracker = SelectionTracker::new();
        assert_eq!(tracker.pointer(), None);
        tracker.pointer_moved(PointerPosition::new(1.0, 2.0));
        tracker.pointer_moved(PointerPosition::new(3.0, 4.0));
        assert_eq!(tracker.pointer(), Some(PointerPosition::new(3.0, 4.0)));
    }
}
