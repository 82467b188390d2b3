//! Geometry value types shared by the selection, layout and overlay crates.
//!
//! All coordinates are CSS px. "Viewport" coordinates are relative to the top-left
//! corner of the visible page area; "control" coordinates are relative to the
//! border box of a text control.

/// A point in CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair in CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangle in CSS px units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Latest known pointer location in viewport coordinates.
///
/// Only the most recent value matters; there is no history.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<PointerPosition> for Point {
    fn from(p: PointerPosition) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Where a character offset renders inside a control, relative to the
/// control's border box.
///
/// `height` is the line height at that offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CaretCoordinate {
    pub top: f32,
    pub left: f32,
    pub height: f32,
}

/// Viewport placement of a text control.
///
/// `rect` is the border box as reported by the host (e.g. `getBoundingClientRect`);
/// `scroll` is the control's own scroll offset (`scrollLeft`, `scrollTop`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlGeometry {
    pub rect: Rect,
    pub scroll: Point,
}

impl ControlGeometry {
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            scroll: Point::new(0.0, 0.0),
        }
    }

    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.scroll = scroll;
        self
    }

    /// Viewport x of a caret's left edge.
    pub fn caret_x(&self, caret: CaretCoordinate) -> f32 {
        self.rect.x + caret.left - self.scroll.x
    }

    /// Viewport position of the caret's top-left corner.
    pub fn caret_to_viewport(&self, caret: CaretCoordinate) -> Point {
        Point::new(self.caret_x(caret), self.rect.y + caret.top - self.scroll.y)
    }

    /// Viewport position of the vertical middle of the caret line.
    pub fn caret_center(&self, caret: CaretCoordinate) -> Point {
        let top_left = self.caret_to_viewport(caret);
        Point::new(top_left.x, top_left.y + caret.height / 2.0)
    }
}
