//! UTF-8/UTF-16 text utilities for selection handling.
//!
//! Host controls report selection offsets in UTF-16 code units (that is what
//! `selectionStart`/`selectionEnd` count), while Rust strings are indexed by
//! UTF-8 bytes. Every offset that crosses the host boundary goes through the
//! conversions in this module.

use std::borrow::Cow;

/// Length of `s` in UTF-16 code units.
///
/// ```
/// use input_core::utf16_len;
///
/// assert_eq!(utf16_len("你好"), 2);
/// assert_eq!(utf16_len("a😀"), 3); // astral plane char is a surrogate pair
/// ```
#[inline]
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Convert a UTF-16 offset into a byte index into `s`.
///
/// Offsets past the end clamp to `s.len()`. An offset that lands between the
/// two halves of a surrogate pair resolves to the start of that character.
///
/// ```
/// use input_core::byte_index_for_utf16;
///
/// let s = "你好world";
/// assert_eq!(byte_index_for_utf16(s, 2), 6);
/// assert_eq!(byte_index_for_utf16(s, 99), s.len());
/// ```
pub fn byte_index_for_utf16(s: &str, offset: usize) -> usize {
    let mut units = 0usize;
    for (idx, ch) in s.char_indices() {
        if units >= offset {
            return idx;
        }
        let next = units + ch.len_utf16();
        if next > offset {
            return idx;
        }
        units = next;
    }
    s.len()
}

/// Split `s` at a UTF-16 offset.
pub fn split_at_utf16(s: &str, offset: usize) -> (&str, &str) {
    s.split_at(byte_index_for_utf16(s, offset))
}

/// What a single-line control keeps of assigned text: line breaks are dropped.
///
/// ```
/// use input_core::filter_single_line;
///
/// assert_eq!(filter_single_line("第一行\r\n第二行"), "第一行第二行");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r']) {
        Cow::Owned(s.replace(['\n', '\r'], ""))
    } else {
        Cow::Borrowed(s)
    }
}

/// What a multi-line control keeps of assigned text: `\r\n` and lone `\r`
/// both become `\n`.
///
/// ```
/// use input_core::normalize_newlines;
///
/// assert_eq!(normalize_newlines("甲\r\n乙\r丙"), "甲\n乙\n丙");
/// ```
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if s.contains('\r') {
        Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Replace the UTF-16 range `[start, end)` of `value` with `replacement`.
///
/// Returns the new value and the UTF-16 offset just past the inserted text.
pub fn splice_utf16(value: &str, start: usize, end: usize, replacement: &str) -> (String, usize) {
    let start_b = byte_index_for_utf16(value, start);
    let end_b = byte_index_for_utf16(value, end).max(start_b);

    let mut out = String::with_capacity(value.len() - (end_b - start_b) + replacement.len());
    out.push_str(&value[..start_b]);
    out.push_str(replacement);
    out.push_str(&value[end_b..]);

    let caret = utf16_len(&value[..start_b]) + utf16_len(replacement);
    (out, caret)
}
