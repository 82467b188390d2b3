use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use core_types::CaretCoordinate;
use input_core::{ControlId, ControlKind};

use crate::style::{MirrorStyle, WhiteSpace};
use crate::surface::{GeometryError, MeasurementSurface, SurfaceFactory};
use crate::text::TextMeasurer;
use crate::wrap::locate;

/// Surface factory that lays mirrored text out in software.
///
/// Controls are registered with their computed style; a control that was never
/// registered (or has been detached) cannot be measured.
pub struct SoftwareMirror<M> {
    measurer: Rc<M>,
    styles: HashMap<ControlId, MirrorStyle>,
    live: Rc<Cell<usize>>,
}

impl<M: TextMeasurer> SoftwareMirror<M> {
    pub fn new(measurer: M) -> Self {
        Self {
            measurer: Rc::new(measurer),
            styles: HashMap::new(),
            live: Rc::new(Cell::new(0)),
        }
    }

    pub fn attach(&mut self, control: ControlId, style: MirrorStyle) {
        self.styles.insert(control, style);
    }

    pub fn detach(&mut self, control: ControlId) {
        self.styles.remove(&control);
    }

    pub fn style(&self, control: ControlId) -> Option<&MirrorStyle> {
        self.styles.get(&control)
    }

    /// Number of surfaces currently alive. Zero outside a measurement.
    pub fn live_surfaces(&self) -> usize {
        self.live.get()
    }

    /// Border-box height the control needs to show `value` without scrolling.
    pub fn content_height(&self, control: ControlId, value: &str) -> Option<f32> {
        let style = self.styles.get(&control)?;
        let line_h = style.line_height_px(self.measurer.line_height(style));
        let lines = locate(self.measurer.as_ref(), style, value, 0).line_count;
        Some(lines as f32 * line_h + style.padding.vertical() + style.border.vertical())
    }
}

impl<M: TextMeasurer> SurfaceFactory for SoftwareMirror<M> {
    type Surface = SoftwareSurface<M>;

    fn create_surface(
        &mut self,
        control: ControlId,
        kind: ControlKind,
    ) -> Result<Self::Surface, GeometryError> {
        let mut style = self
            .styles
            .get(&control)
            .cloned()
            .ok_or(GeometryError::ControlDetached(control))?;
        if !kind.is_multi_line() {
            style.white_space = WhiteSpace::Pre;
        }

        self.live.set(self.live.get() + 1);
        Ok(SoftwareSurface {
            measurer: self.measurer.clone(),
            style,
            text: String::new(),
            boundary: 0,
            live: Some(self.live.clone()),
        })
    }
}

pub struct SoftwareSurface<M> {
    measurer: Rc<M>,
    style: MirrorStyle,
    text: String,
    boundary: usize,
    live: Option<Rc<Cell<usize>>>,
}

impl<M: TextMeasurer> MeasurementSurface for SoftwareSurface<M> {
    fn set_content(&mut self, before: &str, after: &str) -> Result<(), GeometryError> {
        if self.live.is_none() {
            return Err(GeometryError::Measurement("surface already released".into()));
        }
        self.text.clear();
        self.text.push_str(before);
        self.boundary = self.text.len();
        self.text.push_str(after);
        Ok(())
    }

    fn marker_position(&mut self) -> Result<CaretCoordinate, GeometryError> {
        if self.live.is_none() {
            return Err(GeometryError::Measurement("surface already released".into()));
        }
        let measurer = self.measurer.as_ref();
        let pos = locate(measurer, &self.style, &self.text, self.boundary);
        let line_h = self.style.line_height_px(measurer.line_height(&self.style));
        let (origin_x, origin_y) = self.style.content_origin();

        Ok(CaretCoordinate {
            top: origin_y + pos.line as f32 * line_h,
            left: origin_x + pos.x,
            height: line_h,
        })
    }

    fn release(&mut self) {
        if let Some(live) = self.live.take() {
            live.set(live.get().saturating_sub(1));
        }
    }
}
