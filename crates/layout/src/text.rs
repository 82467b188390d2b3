use crate::style::{MirrorStyle, TextTransform};

/// Layout can depend on this without knowing how glyphs are shaped.
pub trait TextMeasurer {
    /// Return the width of `text` in CSS px when rendered with `style`,
    /// including letter and word spacing.
    fn measure(&self, text: &str, style: &MirrorStyle) -> f32;

    /// Return the `line-height: normal` value in CSS px for `style`.
    fn line_height(&self, style: &MirrorStyle) -> f32;
}

/// Deterministic measurer: every glyph advances a fixed fraction of the font size.
///
/// East Asian wide characters advance a full em, everything else `narrow` em.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvanceMeasurer {
    pub narrow: f32,
    pub wide: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            narrow: 0.6,
            wide: 1.0,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: &MirrorStyle) -> f32 {
        let mut w = 0.0;
        for ch in text.chars() {
            let advance = if is_wide(ch) { self.wide } else { self.narrow };
            // Uppercasing can change glyph count (e.g. 'ß' -> "SS").
            let glyphs = match style.text_transform {
                TextTransform::Uppercase => ch.to_uppercase().count(),
                TextTransform::Lowercase => ch.to_lowercase().count(),
                TextTransform::None => 1,
            };
            w += glyphs as f32 * (advance * style.font_size + style.letter_spacing);
            if ch == ' ' || ch == '\u{00A0}' {
                w += style.word_spacing;
            }
        }
        w.max(0.0)
    }

    fn line_height(&self, style: &MirrorStyle) -> f32 {
        style.font_size * 1.2
    }
}

/// East Asian wide/fullwidth characters (CJK ideographs, kana, hangul, fullwidth forms).
pub fn is_wide(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x20000..=0x3FFFD
    )
}

/// Whether a line may break before and after `ch` without whitespace.
///
/// CJK text has no spaces between words; every ideograph and kana is its
/// own break opportunity.
pub fn breaks_around(ch: char) -> bool {
    is_wide(ch) && !matches!(ch as u32, 0xFF01..=0xFF0F | 0xFF1A..=0xFF20)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx_eq(got: f32, want: f32) {
        assert!((got - want).abs() <= 0.01, "expected {want:.4}, got {got:.4}");
    }

    #[test]
    fn fixed_advance_widths() {
        let m = FixedAdvanceMeasurer::default();
        let style = MirrorStyle {
            font_size: 10.0,
            ..MirrorStyle::default()
        };
        assert_approx_eq(m.measure("ab", &style), 12.0);
        assert_approx_eq(m.measure("你好", &style), 20.0);
        assert_eq!(m.measure("", &style), 0.0);
    }

    #[test]
    fn letter_and_word_spacing_apply_per_glyph() {
        let m = FixedAdvanceMeasurer::default();
        let style = MirrorStyle {
            font_size: 10.0,
            letter_spacing: 1.0,
            word_spacing: 2.0,
            ..MirrorStyle::default()
        };
        // 3 glyphs * (6 + 1) + one space * 2
        assert_approx_eq(m.measure("a b", &style), 23.0);
    }

    #[test]
    fn cjk_is_wide_latin_is_not() {
        assert!(is_wide('你'));
        assert!(is_wide('。'));
        assert!(!is_wide('a'));
        assert!(breaks_around('好'));
        assert!(!breaks_around('！'));
    }
}
