use core_types::CaretCoordinate;
use input_core::{ControlId, ControlKind};
use layout::{
    GeometryError, MARKER_TEXT, MIRRORED_PROPERTIES, MeasurementSurface, MirrorStyle,
    mirror_overflow_y,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

fn js(e: JsValue) -> GeometryError {
    GeometryError::Measurement(format!("{e:?}"))
}

fn not_html(e: Element) -> GeometryError {
    js(e.into())
}

/// Hidden `<div>` copying a control's box and text style, appended to
/// `<body>` for one measurement.
pub struct DomSurface {
    document: Document,
    mirror: Option<HtmlElement>,
    border: (f32, f32),
}

impl DomSurface {
    pub fn create(
        window: &Window,
        document: &Document,
        control: ControlId,
        source: &HtmlElement,
        kind: ControlKind,
    ) -> Result<Self, GeometryError> {
        if !source.is_connected() {
            return Err(GeometryError::ControlDetached(control));
        }
        let computed = window
            .get_computed_style(source)
            .map_err(js)?
            .ok_or_else(|| GeometryError::Measurement("no computed style".into()))?;
        let body = document
            .body()
            .ok_or_else(|| GeometryError::Measurement("document has no body".into()))?;

        let mirror: HtmlElement = document
            .create_element("div")
            .map_err(js)?
            .dyn_into()
            .map_err(not_html)?;
        let style = mirror.style();
        for name in MIRRORED_PROPERTIES {
            let value = computed.get_property_value(name).map_err(js)?;
            style.set_property(name, &value).map_err(js)?;
        }
        let box_model = MirrorStyle::from_computed(|name| computed.get_property_value(name).ok());
        let rect = source.get_bounding_client_rect();
        let (white_space, overflow_wrap) = match kind {
            ControlKind::MultiLine => ("pre-wrap", "break-word"),
            ControlKind::SingleLine => ("pre", "normal"),
        };
        for (name, value) in [
            ("position", "absolute"),
            ("visibility", "hidden"),
            ("overflow", "hidden"),
            ("top", "0"),
            ("left", "-9999px"),
            ("white-space", white_space),
            ("overflow-wrap", overflow_wrap),
        ] {
            style.set_property(name, value).map_err(js)?;
        }
        // A visible scrollbar narrows the content box; the mirror needs the
        // same gutter to wrap at the same places.
        let overflow_y = mirror_overflow_y(source.scroll_height(), source.client_height());
        style.set_property("overflow-y", overflow_y).map_err(js)?;
        if kind == ControlKind::SingleLine {
            // Inputs center their line in the content box.
            let line = box_model.content_height(rect.height() as f32);
            style
                .set_property("line-height", &format!("{line}px"))
                .map_err(js)?;
        }

        body.append_child(&mirror).map_err(js)?;
        Ok(Self {
            document: document.clone(),
            mirror: Some(mirror),
            border: (box_model.border.left, box_model.border.top),
        })
    }

    fn mirror(&self) -> Result<&HtmlElement, GeometryError> {
        self.mirror
            .as_ref()
            .ok_or_else(|| GeometryError::Measurement("surface already released".into()))
    }

    fn marker(&self) -> Result<HtmlElement, GeometryError> {
        let mirror = self.mirror()?;
        mirror
            .query_selector("span[data-marker]")
            .map_err(js)?
            .ok_or_else(|| GeometryError::Measurement("marker missing".into()))?
            .dyn_into()
            .map_err(not_html)
    }
}

impl MeasurementSurface for DomSurface {
    fn set_content(&mut self, before: &str, after: &str) -> Result<(), GeometryError> {
        let mirror = self.mirror()?;
        mirror.set_text_content(None);

        let head = self.document.create_element("span").map_err(js)?;
        head.set_text_content(Some(before));
        let marker = self.document.create_element("span").map_err(js)?;
        marker.set_attribute("data-marker", "").map_err(js)?;
        marker.set_text_content(Some(MARKER_TEXT));
        let tail = self.document.create_element("span").map_err(js)?;
        tail.set_text_content(Some(after));

        mirror.append_child(&head).map_err(js)?;
        mirror.append_child(&marker).map_err(js)?;
        mirror.append_child(&tail).map_err(js)?;
        Ok(())
    }

    fn marker_position(&mut self) -> Result<CaretCoordinate, GeometryError> {
        let marker = self.marker()?;
        // offsetTop/offsetLeft are measured from the mirror's padding edge.
        let (border_left, border_top) = self.border;
        Ok(CaretCoordinate {
            top: marker.offset_top() as f32 + border_top,
            left: marker.offset_left() as f32 + border_left,
            height: marker.offset_height() as f32,
        })
    }

    fn release(&mut self) {
        if let Some(mirror) = self.mirror.take() {
            mirror.remove();
        }
    }
}
