use std::collections::HashMap;

use core_types::{ControlGeometry, Point, Rect, Size};
use input_core::{ControlId, ControlIdAllocator, ControlKind};
use js_sys::Function;
use layout::{GeometryError, SurfaceFactory};
use net::{ApiProvider, Settings, TranslateError, Translation, mymemory};
use overlay::{Notice, OverlayId, Placement, Ticket};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, Response, Window};

use super::control::DomControl;
use super::surface::DomSurface;
use super::with_session;
use crate::host::PageHost;

const CONTROL_ATTR: &str = "data-easywriter-id";
const OVERLAY_CLASS: &str = "easywriter-overlay";
const LABEL_IDLE: &str = "翻译为英文";
const LABEL_BUSY: &str = "翻译中...";
const NOTICE_MS: i32 = 3000;

struct OverlayElement {
    id: OverlayId,
    root: HtmlElement,
    button: HtmlButtonElement,
    _on_click: Closure<dyn FnMut()>,
}

pub struct DomHost {
    window: Window,
    document: Document,
    ids: ControlIdAllocator,
    controls: HashMap<ControlId, DomControl>,
    overlay: Option<OverlayElement>,
    settings: Settings,
}

impl DomHost {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            ids: ControlIdAllocator::new(),
            controls: HashMap::new(),
            overlay: None,
            settings: Settings::default(),
        }
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Register `el` if it is an accepted text control, reusing the id stamped
    /// on it the first time it was seen.
    pub fn register(&mut self, el: &Element) -> Option<(ControlId, ControlKind)> {
        let input_type = el.get_attribute("type");
        let kind = ControlKind::classify(&el.tag_name(), input_type.as_deref())?;

        // Clones of a registered element carry its attribute too; the id
        // only counts when it still maps to this very element.
        let stamped = el
            .get_attribute(CONTROL_ATTR)
            .and_then(|v| v.parse::<u64>().ok())
            .map(ControlId::from_raw)
            .filter(|id| {
                self.controls
                    .get(id)
                    .is_some_and(|c| c.element().is_same_node(Some(el.as_ref())))
            });
        let id = match stamped {
            Some(id) => id,
            None => {
                let control = DomControl::from_element(el)?;
                let id = self.ids.allocate();
                if el.set_attribute(CONTROL_ATTR, &id.as_raw().to_string()).is_err() {
                    return None;
                }
                self.controls.insert(id, control);
                id
            }
        };
        self.controls.retain(|_, c| c.element().is_connected());
        Some((id, kind))
    }

    pub fn control_ref(&self, id: ControlId) -> Option<&DomControl> {
        self.controls.get(&id)
    }

    pub fn is_overlay(&self, el: &Element) -> bool {
        self.overlay
            .as_ref()
            .is_some_and(|o| o.root.contains(Some(el.as_ref())))
    }

    fn build_overlay(&self, id: OverlayId) -> Result<OverlayElement, JsValue> {
        let root: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        root.set_class_name(OVERLAY_CLASS);
        let style = root.style();
        for (name, value) in [
            ("position", "fixed"),
            ("z-index", "2147483647"),
            ("visibility", "hidden"),
            ("left", "0"),
            ("top", "0"),
            ("padding", "6px"),
            ("border-radius", "12px"),
            ("background", "rgba(255, 255, 255, 0.95)"),
            ("box-shadow", "0 4px 20px rgba(0, 0, 0, 0.1)"),
        ] {
            style.set_property(name, value)?;
        }

        let button: HtmlButtonElement = self.document.create_element("button")?.dyn_into()?;
        button.set_type("button");
        button.set_text_content(Some(LABEL_IDLE));
        let on_click = Closure::<dyn FnMut()>::new(move || {
            with_session(|s| s.translate_invoked(id));
        });
        button.add_event_listener_with_callback(
            "click",
            on_click.as_ref().unchecked_ref::<Function>(),
        )?;
        root.append_child(&button)?;

        Ok(OverlayElement {
            id,
            root,
            button,
            _on_click: on_click,
        })
    }

    /// Measure the overlay after the page has laid it out.
    fn measure_next_frame(&self, overlay: OverlayId, root: HtmlElement) {
        let window = self.window.clone();
        let cb = Closure::once_into_js(move || {
            let rect = root.get_bounding_client_rect();
            let size = Size::new(rect.width() as f32, rect.height() as f32);
            let dim = |v: Result<JsValue, JsValue>| {
                v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
            };
            let viewport = Size::new(dim(window.inner_width()), dim(window.inner_height()));
            with_session(|s| {
                if size.width > 0.0 && viewport.width > 0.0 {
                    s.overlay_measured(overlay, size, viewport);
                } else {
                    s.overlay_measure_failed(overlay);
                }
            });
        });
        if self.window.request_animation_frame(cb.unchecked_ref::<Function>()).is_err() {
            log::warn!(target: "easywriter.overlay", "requestAnimationFrame unavailable");
        }
    }

    fn show_notice(&self, text: &str, ok: bool) -> Result<(), JsValue> {
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let toast: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        toast.set_text_content(Some(text));
        let style = toast.style();
        for (name, value) in [
            ("position", "fixed"),
            ("z-index", "2147483647"),
            ("top", "20px"),
            ("right", "20px"),
            ("padding", "10px 16px"),
            ("border-radius", "10px"),
            ("color", "#fff"),
            ("background", if ok { "#34c759" } else { "#ff3b30" }),
        ] {
            style.set_property(name, value)?;
        }
        body.append_child(&toast)?;

        let expire = Closure::once_into_js(move || toast.remove());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                expire.unchecked_ref::<Function>(),
                NOTICE_MS,
            )?;
        Ok(())
    }
}

impl SurfaceFactory for DomHost {
    type Surface = DomSurface;

    fn create_surface(
        &mut self,
        control: ControlId,
        kind: ControlKind,
    ) -> Result<DomSurface, GeometryError> {
        let source = self
            .controls
            .get(&control)
            .ok_or(GeometryError::ControlDetached(control))?;
        DomSurface::create(&self.window, &self.document, control, source.element(), kind)
    }
}

impl PageHost for DomHost {
    type Control = DomControl;

    fn control(&mut self, id: ControlId) -> Option<&mut DomControl> {
        self.controls
            .get_mut(&id)
            .filter(|c| c.element().is_connected())
    }

    fn control_geometry(&self, id: ControlId) -> Option<ControlGeometry> {
        let el = self.controls.get(&id)?.element();
        if !el.is_connected() {
            return None;
        }
        let r = el.get_bounding_client_rect();
        let rect = Rect::new(r.x() as f32, r.y() as f32, r.width() as f32, r.height() as f32);
        let scroll = Point::new(el.scroll_left() as f32, el.scroll_top() as f32);
        Some(ControlGeometry::new(rect).with_scroll(scroll))
    }

    fn show_overlay(&mut self, overlay: OverlayId) {
        let result = self.build_overlay(overlay).and_then(|el| {
            let body = self
                .document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?;
            body.append_child(&el.root)?;
            Ok(el)
        });
        match result {
            Ok(el) => {
                self.measure_next_frame(overlay, el.root.clone());
                self.overlay = Some(el);
            }
            Err(e) => {
                log::warn!(target: "easywriter.overlay", "could not attach overlay: {e:?}");
                let window = self.window.clone();
                // Report asynchronously: the session is mid-dispatch.
                let cb = Closure::once_into_js(move || {
                    with_session(|s| s.overlay_measure_failed(overlay));
                });
                let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.unchecked_ref::<Function>(),
                    0,
                );
                if let Err(e) = scheduled {
                    log::warn!(
                        target: "easywriter.overlay",
                        "could not report overlay {overlay:?} as unmeasurable: {e:?}"
                    );
                }
            }
        }
    }

    fn place_overlay(&mut self, overlay: OverlayId, placement: Placement) {
        let Some(el) = self.overlay.as_ref().filter(|o| o.id == overlay) else {
            return;
        };
        let style = el.root.style();
        let result = style
            .set_property("left", &format!("{}px", placement.left))
            .and_then(|_| style.set_property("top", &format!("{}px", placement.top)))
            .and_then(|_| style.set_property("visibility", "visible"));
        if let Err(e) = result {
            log::warn!(target: "easywriter.overlay", "could not place overlay: {e:?}");
        }
    }

    fn set_overlay_busy(&mut self, overlay: OverlayId, busy: bool) {
        let Some(el) = self.overlay.as_ref().filter(|o| o.id == overlay) else {
            return;
        };
        el.button.set_disabled(busy);
        el.button
            .set_text_content(Some(if busy { LABEL_BUSY } else { LABEL_IDLE }));
    }

    fn remove_overlay(&mut self, overlay: OverlayId) {
        if self.overlay.as_ref().is_some_and(|o| o.id == overlay)
            && let Some(el) = self.overlay.take()
        {
            el.root.remove();
        }
    }

    fn dispatch_translation(&mut self, ticket: Ticket, text: String) {
        let provider = self.settings.api_provider;
        spawn_local(async move {
            let result = match provider {
                ApiProvider::MyMemory => fetch_translation(&text).await,
                ApiProvider::Custom => Err(TranslateError::ProviderNotConfigured),
            };
            let result = result
                .map(|t| t.translated_text)
                .map_err(|e| e.to_string());
            with_session(|s| s.translation_completed(ticket, result));
        });
    }

    fn notify(&mut self, notice: &Notice) {
        let result = match notice {
            Notice::TranslationSucceeded => self.show_notice("翻译完成！", true),
            Notice::TranslationFailed { reason } => {
                log::warn!(target: "easywriter.session", "translation failed: {reason}");
                self.show_notice("翻译失败，请重试", false)
            }
        };
        if let Err(e) = result {
            log::debug!(target: "easywriter.session", "notice not shown: {e:?}");
        }
    }
}

fn network(e: JsValue) -> TranslateError {
    TranslateError::Network(format!("{e:?}"))
}

async fn fetch_translation(text: &str) -> Result<Translation, TranslateError> {
    let url = mymemory::request_url(mymemory::MYMEMORY_ENDPOINT, text)?;
    let window = web_sys::window().ok_or_else(|| TranslateError::Network("no window".into()))?;

    let resp = JsFuture::from(window.fetch_with_str(url.as_str()))
        .await
        .map_err(network)?;
    let resp: Response = resp.dyn_into().map_err(network)?;
    if !resp.ok() {
        return Err(TranslateError::Status {
            status: resp.status(),
            details: resp.status_text(),
        });
    }

    let body = JsFuture::from(resp.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .ok_or_else(|| TranslateError::Malformed("body is not text".into()))?;
    mymemory::parse_response(&body)
}
