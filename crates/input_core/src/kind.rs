/// The kinds of text control whose selections are tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// `<input>` of a text-like type. Never wraps; newlines are stripped on assignment.
    SingleLine,
    /// `<textarea>`. Wraps and keeps newlines.
    MultiLine,
}

/// `<input type=...>` values that expose the selection API and hold free text.
///
/// `password` is deliberately absent: its content must never leave the page.
const TEXT_INPUT_TYPES: &[&str] = &["text", "search", "url", "tel"];

impl ControlKind {
    /// Classify a host element by tag name and `type` attribute.
    ///
    /// Returns `None` for anything outside the accepted set. A missing or empty
    /// `type` on `<input>` means `text`, as in HTML.
    pub fn classify(tag: &str, input_type: Option<&str>) -> Option<Self> {
        if tag.eq_ignore_ascii_case("textarea") {
            return Some(Self::MultiLine);
        }
        if !tag.eq_ignore_ascii_case("input") {
            return None;
        }

        let ty = input_type.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("text");
        TEXT_INPUT_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(ty))
            .then_some(Self::SingleLine)
    }

    pub fn is_multi_line(self) -> bool {
        matches!(self, Self::MultiLine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textarea_is_multi_line_regardless_of_case() {
        assert_eq!(ControlKind::classify("TEXTAREA", None), Some(ControlKind::MultiLine));
        assert_eq!(ControlKind::classify("textarea", Some("text")), Some(ControlKind::MultiLine));
    }

    #[test]
    fn input_types() {
        assert_eq!(ControlKind::classify("INPUT", None), Some(ControlKind::SingleLine));
        assert_eq!(ControlKind::classify("input", Some("")), Some(ControlKind::SingleLine));
        assert_eq!(ControlKind::classify("input", Some("Search")), Some(ControlKind::SingleLine));
        assert_eq!(ControlKind::classify("input", Some("password")), None);
        assert_eq!(ControlKind::classify("input", Some("checkbox")), None);
        assert_eq!(ControlKind::classify("input", Some("email")), None);
    }

    #[test]
    fn other_elements_are_rejected() {
        assert_eq!(ControlKind::classify("div", None), None);
        assert_eq!(ControlKind::classify("button", None), None);
    }
}
