//! In-memory text control.
//!
//! Behaves like a DOM text control for the operations the core needs:
//! value assignment (with the single-line newline rule), selection clamping,
//! focus and change notifications. Used by native hosts and tests.

use crate::control::HostControl;
use crate::kind::ControlKind;
use crate::selection::SelectionRange;
use crate::text::{filter_single_line, normalize_newlines, utf16_len};

#[derive(Clone, Debug)]
pub struct MemoryControl {
    kind: ControlKind,
    value: String,
    selection: SelectionRange,
    focused: bool,
    change_notifications: u32,
}

impl MemoryControl {
    /// A control holding `value` with the caret at the end.
    pub fn new(kind: ControlKind, value: &str) -> Self {
        let mut control = Self {
            kind,
            value: String::new(),
            selection: SelectionRange::new(0, 0),
            focused: false,
            change_notifications: 0,
        };
        control.assign(value);
        control
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    /// Select `[start, end)` the way a user drag would (no notification).
    pub fn select(&mut self, start: usize, end: usize) {
        self.set_selection_range(start, end);
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Number of times the page was told the value changed.
    pub fn change_notifications(&self) -> u32 {
        self.change_notifications
    }

    fn assign(&mut self, value: &str) {
        self.value = match self.kind {
            ControlKind::SingleLine => filter_single_line(value).into_owned(),
            ControlKind::MultiLine => normalize_newlines(value).into_owned(),
        };
        // Assigning a value moves the caret to the end, as in the DOM.
        let end = utf16_len(&self.value);
        self.selection = SelectionRange::new(end, end);
    }
}

impl HostControl for MemoryControl {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.assign(value);
    }

    fn notify_value_changed(&mut self) {
        self.change_notifications += 1;
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        self.selection = SelectionRange::new(start, end).clamped(utf16_len(&self.value));
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_control_places_caret_at_end() {
        let control = MemoryControl::new(ControlKind::MultiLine, "你好");
        assert_eq!(control.selection(), SelectionRange::new(2, 2));
        assert!(!control.is_focused());
    }

    #[test]
    fn selection_is_clamped_to_value() {
        let mut control = MemoryControl::new(ControlKind::SingleLine, "abc");
        control.select(5, 1);
        assert_eq!(control.selection(), SelectionRange::new(1, 3));
    }

    #[test]
    fn single_line_assignment_strips_newlines() {
        let mut control = MemoryControl::new(ControlKind::SingleLine, "");
        control.set_value("a\nb");
        assert_eq!(control.as_str(), "ab");
    }
}
