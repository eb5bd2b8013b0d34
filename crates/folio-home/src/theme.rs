//! Live theme binding: reads CSS custom properties from the document root
//! and forwards mutation, storage and `theme-changed` triggers to the hub.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, MutationObserver, MutationObserverInit, MutationRecord, StorageEvent};

use folio_theme::{ThemeHub, ThemeSource, ThemeTrigger, THEME_CHANGED_EVENT, WATCHED_ATTRIBUTES};

use crate::dom;

/// Computed style of `document.documentElement`.
pub struct CssThemeSource {
    style: Option<CssStyleDeclaration>,
}

impl CssThemeSource {
    pub fn current() -> Self {
        let style = dom::window().zip(dom::root_element()).and_then(|(w, root)| {
            w.get_computed_style(&root).ok().flatten()
        });
        Self { style }
    }
}

impl ThemeSource for CssThemeSource {
    fn custom_property(&self, name: &str) -> Option<String> {
        let value = self.style.as_ref()?.get_property_value(name).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

type MutationFn = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

/// Owns the shared hub and every listener feeding it.
pub struct ThemeBinding {
    hub: Rc<RefCell<ThemeHub>>,
    observer: Option<MutationObserver>,
    _mutations: Option<MutationFn>,
    _listeners: Vec<EventListener>,
}

impl ThemeBinding {
    pub fn install() -> Self {
        let hub = Rc::new(RefCell::new(ThemeHub::from_source(&CssThemeSource::current())));
        let scheduled = Rc::new(Cell::new(false));

        let trigger = {
            let hub = hub.clone();
            move |t: ThemeTrigger| {
                if hub.borrow_mut().notify(&t) {
                    schedule_flush(&hub, &scheduled);
                }
            }
        };

        let mut listeners = Vec::new();
        let mut observer = None;
        let mut mutations = None;

        if let Some(root) = dom::root_element() {
            let on_mutation = trigger.clone();
            let callback: MutationFn = Closure::wrap(Box::new(move |records: js_sys::Array, _| {
                for record in records.iter().filter_map(|r| r.dyn_into::<MutationRecord>().ok()) {
                    if let Some(name) = record.attribute_name() {
                        on_mutation(ThemeTrigger::Attribute(name));
                    }
                }
            }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

            if let Ok(obs) = MutationObserver::new(callback.as_ref().unchecked_ref()) {
                let init = MutationObserverInit::new();
                init.set_attributes(true);
                let filter: js_sys::Array = WATCHED_ATTRIBUTES.iter().map(|a| JsValue::from_str(a)).collect();
                init.set_attribute_filter(&filter);
                if obs.observe_with_options(&root, &init).is_ok() {
                    observer = Some(obs);
                    mutations = Some(callback);
                }
            }
        }

        if let Some(window) = dom::window() {
            let on_storage = trigger.clone();
            listeners.push(EventListener::new(&window, "storage", move |event| {
                let key = event.dyn_ref::<StorageEvent>().and_then(|e| e.key());
                on_storage(ThemeTrigger::Storage(key));
            }));
        }
        if let Some(doc) = dom::document() {
            let on_changed = trigger;
            listeners.push(EventListener::new(&doc, THEME_CHANGED_EVENT, move |_| {
                on_changed(ThemeTrigger::ThemeChanged);
            }));
        }

        Self {
            hub,
            observer,
            _mutations: mutations,
            _listeners: listeners,
        }
    }

    pub fn hub(&self) -> &Rc<RefCell<ThemeHub>> {
        &self.hub
    }
}

impl Drop for ThemeBinding {
    fn drop(&mut self) {
        if let Some(obs) = &self.observer {
            obs.disconnect();
        }
    }
}

/// One recompute per frame, however many triggers arrived.
fn schedule_flush(hub: &Rc<RefCell<ThemeHub>>, scheduled: &Rc<Cell<bool>>) {
    if scheduled.replace(true) {
        return;
    }
    let Some(window) = dom::window() else {
        scheduled.set(false);
        return;
    };
    let hub = hub.clone();
    let flag = scheduled.clone();
    let cb = Closure::once_into_js(move || {
        flag.set(false);
        if hub.borrow_mut().flush(&CssThemeSource::current()) {
            debug!("theme palette republished");
        }
    });
    if window.request_animation_frame(cb.unchecked_ref()).is_err() {
        scheduled.set(false);
    }
}
