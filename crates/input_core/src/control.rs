//! Host control mutation interface.
//!
//! This trait is the only way the core changes page content. Integration
//! layers implement it over their native control (a DOM `<textarea>`, a
//! widget, or [`MemoryControl`](crate::MemoryControl) in tests).
//!
//! All offsets are UTF-16 code units, matching the DOM selection API.

use crate::kind::ControlKind;
use crate::selection::SelectionSnapshot;
use crate::text::{filter_single_line, normalize_newlines, splice_utf16, utf16_len};

/// Operations needed to replace a selection inside a host text control.
pub trait HostControl {
    // =========================================================================
    // Read-Only Getters
    // =========================================================================

    /// The control's current value.
    fn value(&self) -> String;

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Assign a new value, as if by `control.value = value`.
    fn set_value(&mut self, value: &str);

    /// Tell the page the value changed so reactive frameworks pick it up
    /// (`input` and `change` events on the DOM).
    fn notify_value_changed(&mut self);

    /// Set the selection; `start == end` places a caret.
    fn set_selection_range(&mut self, start: usize, end: usize);

    /// Give the control keyboard focus.
    fn focus(&mut self);
}

/// Why a replacement was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("selection {start}..{end} is outside the control value (length {len})")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    #[error("control content changed since the selection was made")]
    ContentChanged,
}

/// Replace the snapshot's range inside `control` with `replacement`.
///
/// The control must still hold the snapshot's text at the snapshot's range;
/// otherwise nothing is touched and [`EditError::ContentChanged`] is returned.
/// On success the page is notified, the caret is collapsed right after the
/// inserted text and the control is focused. Returns the new caret offset.
pub fn replace_selection<C: HostControl + ?Sized>(
    control: &mut C,
    snapshot: &SelectionSnapshot,
    replacement: &str,
) -> Result<usize, EditError> {
    let value = control.value();
    let len = utf16_len(&value);
    let range = snapshot.range();
    if range.end > len {
        return Err(EditError::RangeOutOfBounds {
            start: range.start,
            end: range.end,
            len,
        });
    }
    if range.slice(&value) != snapshot.text() {
        return Err(EditError::ContentChanged);
    }

    let replacement = match snapshot.kind() {
        ControlKind::SingleLine => filter_single_line(replacement),
        ControlKind::MultiLine => normalize_newlines(replacement),
    };

    let (new_value, caret) = splice_utf16(&value, range.start, range.end, &replacement);
    control.set_value(&new_value);
    control.notify_value_changed();
    control.set_selection_range(caret, caret);
    control.focus();

    log::debug!(
        target: "easywriter.edit",
        "replaced {}..{} with {} code units",
        range.start,
        range.end,
        utf16_len(&replacement)
    );
    Ok(caret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ControlId;
    use crate::memory::MemoryControl;
    use crate::selection::SelectionRange;

    fn snapshot(kind: ControlKind, value: &str, start: usize, end: usize) -> SelectionSnapshot {
        SelectionSnapshot::capture(ControlId::from_raw(1), kind, value, SelectionRange::new(start, end))
            .expect("valid selection")
    }

    #[test]
    fn replaces_selection_and_moves_caret() {
        let mut control = MemoryControl::new(ControlKind::MultiLine, "你好世界");
        let snap = snapshot(ControlKind::MultiLine, "你好世界", 0, 2);

        let caret = replace_selection(&mut control, &snap, "Hello").expect("replaced");

        assert_eq!(caret, 5);
        assert_eq!(control.value(), "Hello世界");
        assert_eq!(control.selection(), SelectionRange::new(5, 5));
        assert_eq!(control.change_notifications(), 1);
        assert!(control.is_focused());
    }

    #[test]
    fn single_line_controls_drop_newlines() {
        let mut control = MemoryControl::new(ControlKind::SingleLine, "标题");
        let snap = snapshot(ControlKind::SingleLine, "标题", 0, 2);

        replace_selection(&mut control, &snap, "A\r\ntitle").expect("replaced");
        assert_eq!(control.value(), "Atitle");
    }

    #[test]
    fn multi_line_controls_normalize_newlines() {
        let mut control = MemoryControl::new(ControlKind::MultiLine, "标题");
        let snap = snapshot(ControlKind::MultiLine, "标题", 0, 2);

        let caret = replace_selection(&mut control, &snap, "a\r\nb").expect("replaced");
        assert_eq!(control.value(), "a\nb");
        assert_eq!(caret, 3);
    }

    #[test]
    fn edited_control_is_left_untouched() {
        let mut control = MemoryControl::new(ControlKind::MultiLine, "你好世界");
        let snap = snapshot(ControlKind::MultiLine, "你好世界", 0, 2);
        control.set_value("再见世界");

        assert_eq!(
            replace_selection(&mut control, &snap, "Hello"),
            Err(EditError::ContentChanged)
        );
        assert_eq!(control.value(), "再见世界");
        assert_eq!(control.change_notifications(), 0);
    }

    #[test]
    fn shortened_control_is_out_of_bounds() {
        let mut control = MemoryControl::new(ControlKind::MultiLine, "你好世界");
        let snap = snapshot(ControlKind::MultiLine, "你好世界", 2, 4);
        control.set_value("你");

        assert!(matches!(
            replace_selection(&mut control, &snap, "x"),
            Err(EditError::RangeOutOfBounds { len: 1, .. })
        ));
    }
}
