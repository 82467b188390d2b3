//! Viewport-safe placement of the overlay next to its anchor point.

use core_types::{Point, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    /// Overlay's left edge sits `gap` right of the anchor.
    #[default]
    Right,
    /// Overlay's right edge sits `gap` left of the anchor.
    Left,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementConfig {
    /// Horizontal distance between anchor and overlay edge.
    pub gap: f32,
    /// Minimum distance between overlay and viewport edges.
    pub margin: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            gap: 12.0,
            margin: 10.0,
        }
    }
}

/// Final overlay position in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub left: f32,
    pub top: f32,
    /// Side of the anchor the overlay ended up on.
    pub side: Side,
}

/// Place an overlay of `overlay` size next to `anchor`.
///
/// The overlay is vertically centered on `anchor.y`. If the preferred side
/// lacks room it flips to the other side, then both axes are clamped to
/// `[margin, viewport - size - margin]`. An overlay larger than the viewport
/// minus margins is pinned at `margin` and may overhang the far edge.
pub fn place(
    anchor: Point,
    overlay: Size,
    viewport: Size,
    preferred: Side,
    config: &PlacementConfig,
) -> Placement {
    let PlacementConfig { gap, margin } = *config;
    let w = overlay.width.max(0.0);
    let h = overlay.height.max(0.0);

    let on_right = anchor.x + gap;
    let on_left = anchor.x - gap - w;

    let (side, left) = match preferred {
        Side::Right if on_right + w + margin > viewport.width => (Side::Left, on_left),
        Side::Right => (Side::Right, on_right),
        Side::Left if on_left < margin => (Side::Right, on_right),
        Side::Left => (Side::Left, on_left),
    };
    let top = anchor.y - h / 2.0;

    Placement {
        left: clamp_axis(left, w, viewport.width, margin),
        top: clamp_axis(top, h, viewport.height, margin),
        side,
    }
}

fn clamp_axis(v: f32, size: f32, extent: f32, margin: f32) -> f32 {
    v.min(extent - size - margin).max(margin)
}
