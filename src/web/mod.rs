//! Content-script entry point: DOM listeners feeding a [`ContentSession`].

mod control;
mod host;
mod surface;

use std::cell::RefCell;
use std::rc::Rc;

use core_types::PointerPosition;
use input_core::{HostControl, SelectionTarget};
use js_sys::Function;
use net::Settings;
use overlay::PointerTarget;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, MouseEvent};

use crate::session::{ContentSession, SessionConfig};
use host::DomHost;

thread_local! {
    static SESSION: RefCell<Option<Rc<RefCell<ContentSession<DomHost>>>>> =
        const { RefCell::new(None) };
}

/// Run `f` against the live session.
///
/// Events raised while the session is already borrowed (our own `focus()`
/// or `dispatchEvent` calls) are dropped.
pub(crate) fn with_session(f: impl FnOnce(&mut ContentSession<DomHost>)) {
    let session = SESSION.with(|s| s.borrow().clone());
    let Some(session) = session else {
        return;
    };
    match session.try_borrow_mut() {
        Ok(mut s) => f(&mut s),
        Err(_) => log::trace!(target: "easywriter.session", "re-entrant event skipped"),
    };
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn on_selection_end(event: &Event) {
    let Some(el) = target_element(event) else {
        return;
    };
    with_session(|s| {
        let Some((control, kind)) = s.host_mut().register(&el) else {
            return;
        };
        let Some(dom) = s.host().control_ref(control) else {
            return;
        };
        let Some((start, end)) = dom.selection() else {
            return;
        };
        let value = dom.value();
        let target = SelectionTarget {
            control,
            kind: Some(kind),
            value: &value,
        };
        s.selection_event(target, start, end);
    });
}

fn on_pointer_down(event: &Event) {
    let Some(el) = target_element(event) else {
        return;
    };
    with_session(|s| {
        let target = if s.host().is_overlay(&el) {
            PointerTarget::Overlay
        } else if let Some((control, _)) = s.host_mut().register(&el) {
            PointerTarget::TextControl(control)
        } else {
            PointerTarget::Elsewhere
        };
        s.pointer_down(target);
    });
}

fn on_focus_in(event: &Event) {
    let Some(el) = target_element(event) else {
        return;
    };
    with_session(|s| {
        if let Some((control, _)) = s.host_mut().register(&el) {
            s.focus_changed(control);
        }
    });
}

fn listen(
    document: &Document,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    // Capture phase, so pages that stop propagation don't hide events from us.
    document.add_event_listener_with_callback_and_bool(
        kind,
        closure.as_ref().unchecked_ref::<Function>(),
        true,
    )?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"easywriter: logger already installed".into());
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let session = ContentSession::new(
        DomHost::new(window, document.clone()),
        SessionConfig::default(),
    );
    SESSION.with(|s| *s.borrow_mut() = Some(Rc::new(RefCell::new(session))));

    listen(&document, "mousemove", |e| {
        if let Some(m) = e.dyn_ref::<MouseEvent>() {
            let pos = PointerPosition::new(m.client_x() as f32, m.client_y() as f32);
            with_session(|s| s.pointer_moved(pos));
        }
    })?;
    listen(&document, "mouseup", |e| on_selection_end(&e))?;
    listen(&document, "keyup", |e| on_selection_end(&e))?;
    listen(&document, "mousedown", |e| on_pointer_down(&e))?;
    listen(&document, "focusin", |e| on_focus_in(&e))?;

    log::info!(target: "easywriter.session", "selection listener started");
    Ok(())
}

/// Apply the settings JSON read from extension storage. Unreadable values
/// fall back to the defaults.
#[wasm_bindgen]
pub fn apply_settings(json: Option<String>) {
    let settings = Settings::from_storage(json.as_deref());
    with_session(|s| s.host_mut().set_settings(settings));
}
