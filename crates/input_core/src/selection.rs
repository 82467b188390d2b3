//! Selections inside text controls, in DOM offsets.

use crate::id::ControlId;
use crate::kind::ControlKind;
use crate::text::{byte_index_for_utf16, utf16_len};

/// `selectionStart..selectionEnd` as UTF-16 code units, ordered so that
/// `start <= end` whichever way the user dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, focus: usize) -> Self {
        if anchor <= focus {
            Self { start: anchor, end: focus }
        } else {
            Self { start: focus, end: anchor }
        }
    }

    /// Caret only, nothing selected.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Pull both ends back inside a value of `len` code units.
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }

    /// The part of `value` this range covers. Ends past the value clamp.
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        let from = byte_index_for_utf16(value, self.start);
        let to = byte_index_for_utf16(value, self.end).max(from);
        &value[from..to]
    }
}

/// A non-empty selection inside a specific control, captured at one instant.
///
/// Snapshots are values: a newer selection event produces a new snapshot
/// rather than mutating an old one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSnapshot {
    control: ControlId,
    kind: ControlKind,
    range: SelectionRange,
    text: String,
}

impl SelectionSnapshot {
    /// Capture `range` of `value`.
    ///
    /// Returns `None` when the range is empty or does not fit inside `value`.
    pub fn capture(
        control: ControlId,
        kind: ControlKind,
        value: &str,
        range: SelectionRange,
    ) -> Option<Self> {
        if range.is_empty() || range.end > utf16_len(value) {
            return None;
        }
        Some(Self {
            control,
            kind,
            range,
            text: range.slice(value).to_owned(),
        })
    }

    pub fn control(&self) -> ControlId {
        self.control
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn range(&self) -> SelectionRange {
        self.range
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    /// The selected text as it was when the snapshot was taken.
    pub fn text(&self) -> &str {
        &self.text
    }
}
