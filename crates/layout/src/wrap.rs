//! Software line layout for mirrored control text.
//!
//! This preserves:
//! - explicit `\n` / `\r\n` line breaks (as hard breaks)
//! - sequences of spaces (no collapsing; trailing spaces hang)
//! - tab stops
//! - break opportunities after spaces and around CJK characters
//! - break-word for runs wider than the content box

use crate::style::{MirrorStyle, OverflowWrap};
use crate::text::{TextMeasurer, breaks_around};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    Word,
    Space,
    Tab,
    HardBreak,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

fn tokenize(value: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    fn flush(tokens: &mut Vec<Token>, word_start: &mut Option<usize>, end: usize) {
        if let Some(start) = word_start.take()
            && start < end
        {
            tokens.push(Token {
                kind: TokenKind::Word,
                start,
                end,
            });
        }
    }

    let mut it = value.char_indices().peekable();
    while let Some((idx, ch)) = it.next() {
        match ch {
            '\n' => {
                flush(&mut tokens, &mut word_start, idx);
                tokens.push(Token {
                    kind: TokenKind::HardBreak,
                    start: idx,
                    end: idx + 1,
                });
            }
            '\r' => {
                flush(&mut tokens, &mut word_start, idx);
                let mut end = idx + 1;
                if let Some((next_idx, '\n')) = it.peek().copied() {
                    let _ = it.next();
                    end = next_idx + 1;
                }
                tokens.push(Token {
                    kind: TokenKind::HardBreak,
                    start: idx,
                    end,
                });
            }
            ' ' => {
                flush(&mut tokens, &mut word_start, idx);
                tokens.push(Token {
                    kind: TokenKind::Space,
                    start: idx,
                    end: idx + 1,
                });
            }
            '\t' => {
                flush(&mut tokens, &mut word_start, idx);
                tokens.push(Token {
                    kind: TokenKind::Tab,
                    start: idx,
                    end: idx + 1,
                });
            }
            _ if breaks_around(ch) => {
                flush(&mut tokens, &mut word_start, idx);
                tokens.push(Token {
                    kind: TokenKind::Word,
                    start: idx,
                    end: idx + ch.len_utf8(),
                });
            }
            _ => {
                if word_start.is_none() {
                    word_start = Some(idx);
                }
            }
        }
    }
    flush(&mut tokens, &mut word_start, value.len());

    tokens
}

/// Where a byte index of the laid-out text lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapPosition {
    /// Horizontal offset from the start of the content box.
    pub x: f32,
    /// Zero-based visual line.
    pub line: usize,
    /// Total number of visual lines in the text.
    pub line_count: usize,
}

struct Cursor<'a> {
    measurer: &'a dyn TextMeasurer,
    style: &'a MirrorStyle,
    width: f32,
    wraps: bool,
    x: f32,
    line: usize,
    line_has_content: bool,
    boundary: usize,
    found: Option<(f32, usize)>,
}

impl Cursor<'_> {
    fn new_line(&mut self) {
        self.line += 1;
        self.x = 0.0;
        self.line_has_content = false;
    }

    fn mark(&mut self, x: f32) {
        if self.found.is_none() {
            self.found = Some((x, self.line));
        }
    }

    fn tab_width(&self) -> f32 {
        let stop = self.measurer.measure(" ", self.style) * self.style.tab_size;
        if stop <= 0.0 {
            return 0.0;
        }
        ((self.x / stop).floor() + 1.0) * stop - self.x
    }

    fn word(&mut self, text: &str, start: usize, end: usize) {
        let word = &text[start..end];
        let w = self.measurer.measure(word, self.style);

        if self.wraps && self.line_has_content && self.x + w > self.width {
            self.new_line();
        }

        let overlong = self.wraps && w > self.width;
        if overlong && self.style.overflow_wrap == OverflowWrap::BreakWord {
            self.broken_word(text, start, end);
            return;
        }

        if self.boundary >= start && self.boundary < end {
            let prefix = self.measurer.measure(&text[start..self.boundary], self.style);
            self.mark(self.x + prefix);
        }
        self.x += w;
        self.line_has_content = true;
    }

    /// Lay out a word that cannot fit any line, breaking between characters.
    fn broken_word(&mut self, text: &str, start: usize, end: usize) {
        let mut seg_start = start;
        while seg_start < end {
            let avail = (self.width - self.x).max(0.0);
            let fits = break_prefix_end(self.measurer, self.style, &text[seg_start..end], avail);
            let mut seg_end = seg_start + fits;
            if seg_end == seg_start {
                // Nothing fits on this line.
                if self.line_has_content {
                    self.new_line();
                    continue;
                }
                seg_end = seg_start + text[seg_start..].chars().next().map_or(1, char::len_utf8);
            }

            if self.boundary >= seg_start && self.boundary < seg_end {
                let prefix = self.measurer.measure(&text[seg_start..self.boundary], self.style);
                self.mark(self.x + prefix);
            }
            self.x += self.measurer.measure(&text[seg_start..seg_end], self.style);
            self.line_has_content = true;
            seg_start = seg_end;

            if seg_start < end {
                self.new_line();
            }
        }
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Largest byte prefix of `text` (at a char boundary) whose width fits in `max_w`.
fn break_prefix_end(
    measurer: &dyn TextMeasurer,
    style: &MirrorStyle,
    text: &str,
    max_w: f32,
) -> usize {
    let ends: Vec<usize> = text.char_indices().map(|(i, ch)| i + ch.len_utf8()).collect();

    let mut lo = 0usize;
    let mut hi = ends.len();
    let mut best = 0usize;
    while lo < hi {
        let mid = (lo + hi) / 2;
        let w = measurer.measure(&text[..ends[mid]], style);
        if w.is_finite() && w <= max_w {
            best = ends[mid];
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    best
}

/// Lay out `text` inside the content box of `style` and locate byte index `boundary`.
///
/// A boundary that sits right where a line wraps belongs to the new line, as a
/// caret would. Trailing hanging whitespace is clamped to the content width.
/// A `boundary` inside a multi-byte character snaps back to that character's
/// start.
pub fn locate(
    measurer: &dyn TextMeasurer,
    style: &MirrorStyle,
    text: &str,
    boundary: usize,
) -> WrapPosition {
    let mut cursor = Cursor {
        measurer,
        style,
        width: style.content_width(),
        wraps: style.wraps(),
        x: style.text_indent,
        line: 0,
        line_has_content: false,
        boundary: floor_char_boundary(text, boundary),
        found: None,
    };

    for token in tokenize(text) {
        match token.kind {
            TokenKind::Word => cursor.word(text, token.start, token.end),
            TokenKind::Space | TokenKind::Tab => {
                if cursor.boundary == token.start {
                    cursor.mark(cursor.x);
                }
                let advance = if token.kind == TokenKind::Tab {
                    cursor.tab_width()
                } else {
                    measurer.measure(" ", style)
                };
                cursor.x += advance;
                cursor.line_has_content = true;
            }
            TokenKind::HardBreak => {
                if cursor.boundary >= token.start && cursor.boundary < token.end {
                    cursor.mark(cursor.x);
                }
                cursor.new_line();
            }
        }
    }
    cursor.mark(cursor.x);

    let (x, line) = cursor.found.unwrap_or((cursor.x, cursor.line));
    let x = if cursor.wraps { x.min(cursor.width) } else { x };
    WrapPosition {
        x: x.max(0.0),
        line,
        line_count: cursor.line + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::WhiteSpace;

    /// Every char is 10px wide.
    struct TestMeasurer;

    impl TextMeasurer for TestMeasurer {
        fn measure(&self, text: &str, _style: &MirrorStyle) -> f32 {
            text.chars().count() as f32 * 10.0
        }

        fn line_height(&self, style: &MirrorStyle) -> f32 {
            style.font_size * 1.2
        }
    }

    fn style(content_width: f32) -> MirrorStyle {
        MirrorStyle {
            width: content_width,
            box_sizing: crate::style::BoxSizing::ContentBox,
            ..MirrorStyle::default()
        }
    }

    fn at(text: &str, boundary: usize, width: f32) -> (f32, usize) {
        let p = locate(&TestMeasurer, &style(width), text, boundary);
        (p.x, p.line)
    }

    #[test]
    fn tokenizes_cjk_per_character() {
        let kinds: Vec<(TokenKind, usize, usize)> = tokenize("ab 你好\nc")
            .into_iter()
            .map(|t| (t.kind, t.start, t.end))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (TokenKind::Word, 0, 2),
                (TokenKind::Space, 2, 3),
                (TokenKind::Word, 3, 6),
                (TokenKind::Word, 6, 9),
                (TokenKind::HardBreak, 9, 10),
                (TokenKind::Word, 10, 11),
            ]
        );
    }

    #[test]
    fn single_line_positions() {
        assert_eq!(at("hello", 0, 500.0), (0.0, 0));
        assert_eq!(at("hello", 2, 500.0), (20.0, 0));
        assert_eq!(at("hello", 5, 500.0), (50.0, 0));
    }

    #[test]
    fn boundary_inside_a_character_snaps_to_its_start() {
        assert_eq!(at("你好", 4, 500.0), (10.0, 0));
        assert_eq!(at("你好", 1, 500.0), (0.0, 0));
        assert_eq!(at("你好", 99, 500.0), (20.0, 0));
    }

    #[test]
    fn hard_breaks_start_new_lines() {
        let text = "ab\ncd";
        assert_eq!(at(text, 2, 500.0), (20.0, 0));
        assert_eq!(at(text, 3, 500.0), (0.0, 1));
        assert_eq!(at(text, 4, 500.0), (10.0, 1));
        assert_eq!(locate(&TestMeasurer, &style(500.0), text, 0).line_count, 2);
    }

    #[test]
    fn words_wrap_as_units() {
        // "aaa bbb" in 50px: "aaa " fits (40), "bbb" would end at 70 -> wraps.
        let text = "aaa bbb";
        assert_eq!(at(text, 4, 50.0), (0.0, 1));
        assert_eq!(at(text, 6, 50.0), (20.0, 1));
        assert_eq!(at(text, 3, 50.0), (30.0, 0));
    }

    #[test]
    fn cjk_wraps_between_ideographs() {
        // 6 ideographs in 40px -> 4 on the first line, 2 on the second.
        let text = "你好世界你好";
        let fifth = "你好世界".len();
        assert_eq!(at(text, fifth, 40.0), (0.0, 1));
        assert_eq!(at(text, text.len(), 40.0), (20.0, 1));
    }

    #[test]
    fn overlong_words_break_between_characters() {
        let text = "abcdefgh";
        assert_eq!(at(text, 3, 30.0), (0.0, 1));
        assert_eq!(at(text, 7, 30.0), (10.0, 2));
        assert_eq!(locate(&TestMeasurer, &style(30.0), text, 0).line_count, 3);
    }

    #[test]
    fn hanging_spaces_are_clamped() {
        let text = "abc      ";
        assert_eq!(at(text, text.len(), 50.0), (50.0, 0));
    }

    #[test]
    fn pre_never_wraps() {
        let mut s = style(20.0);
        s.white_space = WhiteSpace::Pre;
        let p = locate(&TestMeasurer, &s, "abcdef ghi", 10);
        assert_eq!((p.x, p.line), (100.0, 0));
    }

    #[test]
    fn tabs_advance_to_next_stop() {
        let mut s = style(500.0);
        s.tab_size = 4.0;
        // stop every 40px: "a" ends at 10, tab jumps to 40.
        let p = locate(&TestMeasurer, &s, "a\tb", 2);
        assert_eq!(p.x, 40.0);
    }
}
