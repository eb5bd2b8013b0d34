//! IntersectionObserver wrapper feeding visibility ratios to a callback.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use folio_motion::VISIBILITY_THRESHOLD;

type EntriesFn = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Observes one element; disconnects on drop.
pub struct VisibilityWatch {
    observer: IntersectionObserver,
    _callback: EntriesFn,
}

impl VisibilityWatch {
    pub fn new(target: &Element, mut on_ratio: impl FnMut(f64) + 'static) -> Option<Self> {
        let callback: EntriesFn = Closure::wrap(Box::new(move |entries: js_sys::Array, _| {
            // Only the latest entry matters when several queue up.
            let latest = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .last();
            if let Some(entry) = latest {
                let ratio = if entry.is_intersecting() {
                    entry.intersection_ratio()
                } else {
                    0.0
                };
                on_ratio(ratio);
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        let thresholds = js_sys::Array::of2(&JsValue::from_f64(0.0), &JsValue::from_f64(VISIBILITY_THRESHOLD));
        options.set_threshold(&thresholds);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
        observer.observe(target);
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
