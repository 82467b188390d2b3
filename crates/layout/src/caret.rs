//! Caret geometry: where a character offset renders inside a text control.
//!
//! Controls expose no API for this, so the control is mirrored into a
//! measurement surface with a marker at the offset, and the marker is measured.

use core_types::CaretCoordinate;
use input_core::{ControlId, ControlKind, SelectionSnapshot, split_at_utf16, utf16_len};

use crate::surface::{GeometryError, MeasurementSurface, SurfaceFactory};

/// Stand-in for an empty remainder, so the marker's line is laid out the
/// same way it would be with trailing text.
pub const PLACEHOLDER_GLYPH: &str = ".";

/// Resolve the position of UTF-16 `offset` within `value`, relative to the
/// control's border box.
///
/// The surface exists only for the duration of this call.
pub fn resolve_caret<F: SurfaceFactory + ?Sized>(
    factory: &mut F,
    control: ControlId,
    kind: ControlKind,
    value: &str,
    offset: usize,
) -> Result<CaretCoordinate, GeometryError> {
    let len = utf16_len(value);
    if offset > len {
        return Err(GeometryError::OffsetOutOfRange { offset, len });
    }

    let (before, after) = split_at_utf16(value, offset);
    // Single-line controls render spaces without collapsing; the surface
    // gets no-break spaces so its text lines up with the control's.
    let before = match kind {
        ControlKind::SingleLine => before.replace(' ', "\u{00A0}"),
        ControlKind::MultiLine => before.to_owned(),
    };
    let after = if after.is_empty() { PLACEHOLDER_GLYPH } else { after };

    let mut surface = factory.acquire(control, kind)?;
    surface.set_content(&before, after)?;
    let caret = surface.marker_position()?;

    log::trace!(
        target: "easywriter.caret",
        "offset {offset} of {control:?} at left={:.1} top={:.1}",
        caret.left,
        caret.top
    );
    Ok(caret)
}

/// Resolve both boundaries of a selection against the control's current value.
pub fn resolve_selection<F: SurfaceFactory + ?Sized>(
    factory: &mut F,
    snapshot: &SelectionSnapshot,
    value: &str,
) -> Result<(CaretCoordinate, CaretCoordinate), GeometryError> {
    let (control, kind) = (snapshot.control(), snapshot.kind());
    let start = resolve_caret(factory, control, kind, value, snapshot.start())?;
    let end = resolve_caret(factory, control, kind, value, snapshot.end())?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::SoftwareMirror;
    use crate::style::{BoxSizing, Edges, LineHeight, MirrorStyle};
    use crate::text::FixedAdvanceMeasurer;
    use proptest::prelude::*;

    const ID: ControlId = ControlId::from_raw(1);

    fn textarea_style(width: f32) -> MirrorStyle {
        MirrorStyle {
            font_size: 10.0,
            line_height: LineHeight::Px(20.0),
            padding: Edges::all(4.0),
            border: Edges::all(1.0),
            width,
            box_sizing: BoxSizing::BorderBox,
            ..MirrorStyle::default()
        }
    }

    fn mirror(width: f32) -> SoftwareMirror<FixedAdvanceMeasurer> {
        let mut m = SoftwareMirror::new(FixedAdvanceMeasurer::default());
        m.attach(ID, textarea_style(width));
        m
    }

    fn assert_approx_eq(got: f32, want: f32) {
        assert!((got - want).abs() <= 0.01, "expected {want:.4}, got {got:.4}");
    }

    #[test]
    fn caret_includes_padding_and_border() {
        let mut m = mirror(200.0);
        let c = resolve_caret(&mut m, ID, ControlKind::MultiLine, "你好世界", 2).expect("measured");
        assert_approx_eq(c.left, 5.0 + 20.0);
        assert_approx_eq(c.top, 5.0);
        assert_approx_eq(c.height, 20.0);
        assert_eq!(m.live_surfaces(), 0);
    }

    #[test]
    fn wrapped_offset_lands_on_second_line() {
        // Content box is 40px: four 10px ideographs per line.
        let mut m = mirror(50.0);
        let c = resolve_caret(&mut m, ID, ControlKind::MultiLine, "你好世界你好", 5).expect("measured");
        assert_approx_eq(c.top, 5.0 + 20.0);
        assert_approx_eq(c.left, 5.0 + 10.0);
    }

    #[test]
    fn single_line_controls_never_wrap() {
        let mut m = mirror(50.0);
        let c = resolve_caret(&mut m, ID, ControlKind::SingleLine, "你好世界你好", 6).expect("measured");
        assert_approx_eq(c.top, 5.0);
        assert_approx_eq(c.left, 5.0 + 60.0);
    }

    #[test]
    fn offset_past_end_is_rejected_without_a_surface() {
        let mut m = mirror(200.0);
        let err = resolve_caret(&mut m, ID, ControlKind::MultiLine, "abc", 4).unwrap_err();
        assert_eq!(err, GeometryError::OffsetOutOfRange { offset: 4, len: 3 });
        assert_eq!(m.live_surfaces(), 0);
    }

    #[test]
    fn detached_control_fails() {
        let mut m = mirror(200.0);
        m.detach(ID);
        let err = resolve_caret(&mut m, ID, ControlKind::MultiLine, "abc", 1).unwrap_err();
        assert_eq!(err, GeometryError::ControlDetached(ID));
    }

    #[test]
    fn resolves_both_selection_boundaries() {
        let mut m = mirror(200.0);
        let value = "你好世界";
        let snap = SelectionSnapshot::capture(
            ID,
            ControlKind::MultiLine,
            value,
            input_core::SelectionRange::new(1, 3),
        )
        .expect("selection");
        let (start, end) = resolve_selection(&mut m, &snap, value).expect("measured");
        assert_approx_eq(end.left - start.left, 20.0);
    }

    #[test]
    fn resolving_is_idempotent() {
        let mut m = mirror(80.0);
        let value = "第一行\n第二行 and some english";
        let a = resolve_caret(&mut m, ID, ControlKind::MultiLine, value, 9).expect("measured");
        let b = resolve_caret(&mut m, ID, ControlKind::MultiLine, value, 9).expect("measured");
        assert_eq!(a, b);
    }

    fn text_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                Just("你"),
                Just("好"),
                Just("世界"),
                Just("word"),
                Just(" "),
                Just("\n"),
                Just("x"),
            ],
            0..40,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn caret_stays_inside_auto_sized_box(
            text in text_strategy(),
            width in 40.0f32..400.0,
            pick in 0usize..1000,
        ) {
            let mut m = mirror(width);
            let len = utf16_len(&text);
            let offset = if len == 0 { 0 } else { pick % (len + 1) };
            let height = m.content_height(ID, &text).expect("attached");

            let c = resolve_caret(&mut m, ID, ControlKind::MultiLine, &text, offset).expect("measured");

            prop_assert!(c.left >= 0.0 && c.left <= width);
            prop_assert!(c.top >= 0.0);
            prop_assert!(c.top <= height + c.height);
            prop_assert_eq!(m.live_surfaces(), 0);
        }
    }
}
