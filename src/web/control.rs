use input_core::HostControl;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventInit, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

/// A page text control the session may read and rewrite.
pub enum DomControl {
    TextArea(HtmlTextAreaElement),
    Input(HtmlInputElement),
}

impl DomControl {
    pub fn from_element(el: &Element) -> Option<Self> {
        if let Some(ta) = el.dyn_ref::<HtmlTextAreaElement>() {
            return Some(Self::TextArea(ta.clone()));
        }
        el.dyn_ref::<HtmlInputElement>().map(|i| Self::Input(i.clone()))
    }

    pub fn element(&self) -> &HtmlElement {
        match self {
            Self::TextArea(ta) => ta,
            Self::Input(i) => i,
        }
    }

    /// Current `[selectionStart, selectionEnd)`, if the control exposes one.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let (start, end) = match self {
            Self::TextArea(ta) => (ta.selection_start(), ta.selection_end()),
            Self::Input(i) => (i.selection_start(), i.selection_end()),
        };
        match (start, end) {
            (Ok(Some(s)), Ok(Some(e))) => Some((s as usize, e as usize)),
            _ => None,
        }
    }

    fn fire(&self, kind: &str) {
        let init = EventInit::new();
        init.set_bubbles(true);
        match Event::new_with_event_init_dict(kind, &init) {
            Ok(event) => {
                if let Err(e) = self.element().dispatch_event(&event) {
                    log::warn!(target: "easywriter.edit", "dispatching {kind} failed: {e:?}");
                }
            }
            Err(e) => log::warn!(target: "easywriter.edit", "creating {kind} event failed: {e:?}"),
        }
    }
}

impl HostControl for DomControl {
    fn value(&self) -> String {
        match self {
            Self::TextArea(ta) => ta.value(),
            Self::Input(i) => i.value(),
        }
    }

    fn set_value(&mut self, value: &str) {
        match self {
            Self::TextArea(ta) => ta.set_value(value),
            Self::Input(i) => i.set_value(value),
        }
    }

    fn notify_value_changed(&mut self) {
        self.fire("input");
        self.fire("change");
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        let (start, end) = (start as u32, end as u32);
        let result = match self {
            Self::TextArea(ta) => ta.set_selection_range(start, end),
            Self::Input(i) => i.set_selection_range(start, end),
        };
        if let Err(e) = result {
            log::debug!(target: "easywriter.edit", "setSelectionRange rejected: {e:?}");
        }
    }

    fn focus(&mut self) {
        if let Err(e) = self.element().focus() {
            log::debug!(target: "easywriter.edit", "focus rejected: {e:?}");
        }
    }
}
