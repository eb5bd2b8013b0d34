//! Cancellable `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom;

type FrameFn = Closure<dyn FnMut(f64)>;

/// Calls `tick(now)` every frame while started. The loop stops on its own
/// when `tick` returns false.
pub struct FrameLoop {
    callback: Rc<RefCell<Option<FrameFn>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new(mut tick: impl FnMut(f64) -> bool + 'static) -> Rc<Self> {
        let f: Rc<RefCell<Option<FrameFn>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let h = handle.clone();

        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            h.set(None);
            if tick(now) {
                h.set(request(&f));
            }
        }) as Box<dyn FnMut(f64)>));

        Rc::new(Self {
            callback: g,
            handle,
        })
    }

    pub fn start(&self) {
        if self.handle.get().is_none() {
            self.handle.set(request(&self.callback));
        }
    }

    pub fn stop(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = dom::window() {
                w.cancel_animation_frame(id).ok();
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        // Breaks the closure's reference to its own cell.
        self.callback.borrow_mut().take();
    }
}

fn request(callback: &Rc<RefCell<Option<FrameFn>>>) -> Option<i32> {
    let window = dom::window()?;
    let slot = callback.borrow();
    let f = slot.as_ref()?;
    window
        .request_animation_frame(f.as_ref().unchecked_ref())
        .ok()
}
