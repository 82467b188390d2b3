//! The subset of computed style that decides where text wraps inside a
//! text control, and therefore where a caret renders.

/// Computed CSS properties a measurement surface must copy from the control
/// so its text wraps exactly like the control's.
///
/// `white-space` and `overflow-wrap` are not copied; surfaces set them from
/// the control kind (textareas wrap, single-line inputs don't).
pub const MIRRORED_PROPERTIES: &[&str] = &[
    "direction",
    "box-sizing",
    "width",
    "height",
    "overflow-x",
    "overflow-y",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-style",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "font-style",
    "font-variant",
    "font-weight",
    "font-stretch",
    "font-size",
    "font-size-adjust",
    "line-height",
    "font-family",
    "text-align",
    "text-transform",
    "text-indent",
    "text-decoration",
    "letter-spacing",
    "word-spacing",
    "tab-size",
];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn all(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineHeight {
    #[default]
    Normal,
    Px(f32),
    /// Unitless multiplier of the font size.
    Factor(f32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

/// Only the distinction that matters for caret placement: does text wrap?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhiteSpace {
    /// Preserved whitespace, no soft wrapping (`pre`, `nowrap`).
    Pre,
    /// Preserved whitespace, soft wrapping (`pre-wrap`, and what textareas use).
    #[default]
    PreWrap,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowWrap {
    Normal,
    /// Overlong words break between characters.
    #[default]
    BreakWord,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
}

/// Mirrored computed style of a text control.
#[derive(Clone, Debug, PartialEq)]
pub struct MirrorStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub italic: bool,
    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub line_height: LineHeight,
    pub padding: Edges,
    pub border: Edges,
    /// `width` as computed, interpreted through `box_sizing`.
    pub width: f32,
    pub box_sizing: BoxSizing,
    pub white_space: WhiteSpace,
    pub overflow_wrap: OverflowWrap,
    /// Tab stop distance in space widths.
    pub tab_size: f32,
    pub text_transform: TextTransform,
    pub text_indent: f32,
}

impl Default for MirrorStyle {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 14.0,
            font_weight: 400,
            italic: false,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            line_height: LineHeight::Normal,
            padding: Edges::all(8.0),
            border: Edges::all(1.0),
            width: 400.0,
            box_sizing: BoxSizing::BorderBox,
            white_space: WhiteSpace::PreWrap,
            overflow_wrap: OverflowWrap::BreakWord,
            tab_size: 8.0,
            text_transform: TextTransform::None,
            text_indent: 0.0,
        }
    }
}

impl MirrorStyle {
    /// Width available to text inside the content box.
    pub fn content_width(&self) -> f32 {
        let w = match self.box_sizing {
            BoxSizing::ContentBox => self.width,
            BoxSizing::BorderBox => {
                self.width - self.padding.horizontal() - self.border.horizontal()
            }
        };
        w.max(0.0)
    }

    /// Offset of the content box inside the border box.
    pub fn content_origin(&self) -> (f32, f32) {
        (
            self.border.left + self.padding.left,
            self.border.top + self.padding.top,
        )
    }

    /// Resolved line height; `normal` defers to the measurer's font metrics.
    pub fn line_height_px(&self, normal: f32) -> f32 {
        match self.line_height {
            LineHeight::Normal => normal,
            LineHeight::Px(px) => px,
            LineHeight::Factor(f) => f * self.font_size,
        }
    }

    /// Height of the content box for a control whose border box is
    /// `border_box_height` tall.
    pub fn content_height(&self, border_box_height: f32) -> f32 {
        (border_box_height - self.padding.vertical() - self.border.vertical()).max(0.0)
    }

    pub fn wraps(&self) -> bool {
        self.white_space == WhiteSpace::PreWrap
    }

    /// Build a style from computed CSS values (`getComputedStyle`-style strings).
    ///
    /// Unknown or missing properties keep their defaults, so a partially
    /// readable style still produces a usable mirror.
    pub fn from_computed(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut style = Self::default();
        let px = |name: &str| get(name).as_deref().and_then(parse_px);

        if let Some(family) = get("font-family").filter(|s| !s.is_empty()) {
            style.font_family = family;
        }
        if let Some(v) = px("font-size") {
            style.font_size = v;
        }
        if let Some(v) = get("font-weight").as_deref().and_then(parse_font_weight) {
            style.font_weight = v;
        }
        style.italic = matches!(get("font-style").as_deref(), Some("italic" | "oblique"));
        style.letter_spacing = px("letter-spacing").unwrap_or(0.0);
        style.word_spacing = px("word-spacing").unwrap_or(0.0);
        if let Some(v) = get("line-height").as_deref().map(parse_line_height) {
            style.line_height = v;
        }

        style.padding = Edges {
            top: px("padding-top").unwrap_or(0.0),
            right: px("padding-right").unwrap_or(0.0),
            bottom: px("padding-bottom").unwrap_or(0.0),
            left: px("padding-left").unwrap_or(0.0),
        };
        style.border = Edges {
            top: px("border-top-width").unwrap_or(0.0),
            right: px("border-right-width").unwrap_or(0.0),
            bottom: px("border-bottom-width").unwrap_or(0.0),
            left: px("border-left-width").unwrap_or(0.0),
        };
        if let Some(v) = px("width") {
            style.width = v;
        }
        style.box_sizing = match get("box-sizing").as_deref() {
            Some("border-box") => BoxSizing::BorderBox,
            _ => BoxSizing::ContentBox,
        };
        if let Some(ws) = get("white-space") {
            style.white_space = match ws.as_str() {
                "pre" | "nowrap" => WhiteSpace::Pre,
                _ => WhiteSpace::PreWrap,
            };
        }
        if let Some(ow) = get("overflow-wrap").or_else(|| get("word-wrap")) {
            style.overflow_wrap = match ow.as_str() {
                "normal" => OverflowWrap::Normal,
                _ => OverflowWrap::BreakWord,
            };
        }
        if let Some(v) = get("tab-size").and_then(|s| s.trim().parse::<f32>().ok()) {
            style.tab_size = v.max(0.0);
        }
        style.text_transform = match get("text-transform").as_deref() {
            Some("uppercase") => TextTransform::Uppercase,
            Some("lowercase") => TextTransform::Lowercase,
            _ => TextTransform::None,
        };
        style.text_indent = px("text-indent").unwrap_or(0.0);

        style
    }
}

/// `overflow-y` for a mirror of a control with the given scroll and client
/// heights. Controls that scroll vertically show a scrollbar, and the mirror
/// must reserve the same gutter.
pub fn mirror_overflow_y(scroll_height: i32, client_height: i32) -> &'static str {
    if scroll_height > client_height {
        "scroll"
    } else {
        "hidden"
    }
}

/// Parse a computed `<length>` in px. `normal` and other keywords yield `None`.
pub fn parse_px(s: &str) -> Option<f32> {
    let s = s.trim();
    let num = s.strip_suffix("px").unwrap_or(s);
    num.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_font_weight(s: &str) -> Option<u16> {
    match s.trim() {
        "normal" => Some(400),
        "bold" => Some(700),
        other => other.parse::<u16>().ok(),
    }
}

fn parse_line_height(s: &str) -> LineHeight {
    let s = s.trim();
    if s == "normal" {
        return LineHeight::Normal;
    }
    if s.ends_with("px") {
        return parse_px(s).map(LineHeight::Px).unwrap_or_default();
    }
    s.parse::<f32>()
        .ok()
        .map(LineHeight::Factor)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn content_width_respects_box_sizing() {
        let mut style = MirrorStyle {
            width: 200.0,
            padding: Edges::all(10.0),
            border: Edges::all(1.0),
            ..MirrorStyle::default()
        };
        style.box_sizing = BoxSizing::BorderBox;
        assert_eq!(style.content_width(), 178.0);
        style.box_sizing = BoxSizing::ContentBox;
        assert_eq!(style.content_width(), 200.0);
    }

    #[test]
    fn parses_computed_style_strings() {
        let css: HashMap<&str, &str> = [
            ("font-family", "ui-monospace, SFMono-Regular, monospace"),
            ("font-size", "14px"),
            ("font-weight", "bold"),
            ("line-height", "21px"),
            ("padding-top", "8px"),
            ("padding-left", "12px"),
            ("border-top-width", "1px"),
            ("width", "640.5px"),
            ("box-sizing", "border-box"),
            ("white-space", "pre-wrap"),
            ("letter-spacing", "normal"),
            ("tab-size", "4"),
        ]
        .into_iter()
        .collect();

        let style = MirrorStyle::from_computed(|name| css.get(name).map(|v| v.to_string()));

        assert_eq!(style.font_size, 14.0);
        assert_eq!(style.font_weight, 700);
        assert_eq!(style.line_height, LineHeight::Px(21.0));
        assert_eq!(style.padding.top, 8.0);
        assert_eq!(style.padding.left, 12.0);
        assert_eq!(style.padding.right, 0.0);
        assert_eq!(style.border.top, 1.0);
        assert_eq!(style.width, 640.5);
        assert_eq!(style.box_sizing, BoxSizing::BorderBox);
        assert_eq!(style.letter_spacing, 0.0);
        assert_eq!(style.tab_size, 4.0);
        assert!(style.wraps());
    }

    #[test]
    fn line_height_forms() {
        assert_eq!(parse_line_height("normal"), LineHeight::Normal);
        assert_eq!(parse_line_height("1.5"), LineHeight::Factor(1.5));
        assert_eq!(parse_line_height("18px"), LineHeight::Px(18.0));

        let style = MirrorStyle {
            font_size: 10.0,
            line_height: LineHeight::Factor(1.5),
            ..MirrorStyle::default()
        };
        assert_eq!(style.line_height_px(12.0), 15.0);
    }

    #[test]
    fn single_line_content_height_excludes_padding_and_border() {
        let css: HashMap<&str, &str> = [
            ("padding-top", "6px"),
            ("padding-bottom", "4px"),
            ("border-top-width", "2px"),
            ("border-bottom-width", "2px"),
        ]
        .into_iter()
        .collect();
        let style = MirrorStyle::from_computed(|name| css.get(name).map(|v| v.to_string()));

        assert_eq!(style.content_height(34.0), 20.0);
        assert_eq!(style.content_height(8.0), 0.0);
    }

    #[test]
    fn scrolling_controls_get_a_scrollbar_gutter() {
        assert_eq!(mirror_overflow_y(480, 200), "scroll");
        assert_eq!(mirror_overflow_y(200, 200), "hidden");
        assert_eq!(mirror_overflow_y(0, 0), "hidden");
    }

    #[test]
    fn nowrap_maps_to_pre() {
        let style = MirrorStyle::from_computed(|name| {
            (name == "white-space").then(|| "nowrap".to_string())
        });
        assert!(!style.wraps());
    }
}
