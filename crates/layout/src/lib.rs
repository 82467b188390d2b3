//! Caret geometry for native text controls.
//!
//! Text controls do not say where a character offset renders. This crate
//! answers that by mirroring the control into a [`MeasurementSurface`] with
//! the same box model and wrapping-relevant style, placing a zero-width
//! marker at the offset, and measuring the marker.
//!
//! Surfaces come from a [`SurfaceFactory`]: the DOM adapter builds hidden
//! elements; [`SoftwareMirror`] lays text out with a [`TextMeasurer`] so the
//! same code runs (and is tested) outside a browser.

mod caret;
mod mirror;
mod style;
mod surface;
mod text;
pub mod wrap;

pub use caret::{PLACEHOLDER_GLYPH, resolve_caret, resolve_selection};
pub use mirror::{SoftwareMirror, SoftwareSurface};
pub use style::{
    BoxSizing, Edges, LineHeight, MIRRORED_PROPERTIES, MirrorStyle, OverflowWrap, TextTransform,
    WhiteSpace, mirror_overflow_y, parse_px,
};
pub use surface::{GeometryError, MeasurementSurface, SurfaceFactory, SurfaceGuard};
pub use text::{FixedAdvanceMeasurer, TextMeasurer, breaks_around, is_wide};

/// Text inserted into the marker node. WORD JOINER has no width and adds no
/// break opportunity, so the marker cannot change how the line wraps.
pub const MARKER_TEXT: &str = "\u{2060}";
