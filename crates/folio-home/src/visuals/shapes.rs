use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::Element;

use folio_motion::{ShapeShuffle, SHAPE_COUNT};
use folio_theme::PaletteRequest;

use super::{paint, MountCtx, Mounted, Subscription, VisualKind};
use crate::dom;
use crate::frame_loop::FrameLoop;

pub fn mount(root: &Element, ctx: &MountCtx) -> Option<Mounted> {
    let shapes = dom::parts(root, "shape");
    if shapes.len() != SHAPE_COUNT {
        debug!("shapes visual needs {SHAPE_COUNT} shapes, found {}", shapes.len());
        return None;
    }
    let shuffle = Rc::new(RefCell::new(ShapeShuffle::default()));
    let reduced = ctx.reduced_motion;

    let place = {
        let shapes = shapes.clone();
        move |positions: [(f64, f64); SHAPE_COUNT]| {
            for (el, (x, y)) in shapes.iter().zip(positions) {
                dom::set_attr(el, "transform", format!("translate({x:.2} {y:.2})"));
            }
        }
    };
    place(shuffle.borrow().settled_positions());

    let frame = FrameLoop::new({
        let shuffle = shuffle.clone();
        let place = place.clone();
        move |now| {
            let s = shuffle.borrow();
            place(s.positions(now));
            s.is_animating(now)
        }
    });

    let click = {
        let frame = frame.clone();
        EventListener::new(root, "click", move |_| {
            let now = dom::now();
            shuffle.borrow_mut().trigger(now, &mut rand::thread_rng());
            if reduced {
                place(shuffle.borrow().settled_positions());
            } else {
                frame.start();
            }
            apply_random_theme();
        })
    };

    let paint_root = root.clone();
    let mut mounted = Mounted::new(VisualKind::Shapes);
    mounted.subscription = Some(Subscription::new(
        ctx,
        PaletteRequest::default(),
        move |p| paint(&paint_root, p),
    ));
    mounted.listeners.push(click);
    mounted.frame = Some(frame);
    Some(mounted)
}

/// `window.applyRandomTheme()`, if the theming layer defines it.
fn apply_random_theme() {
    let Some(window) = dom::window() else {
        return;
    };
    let Ok(f) = js_sys::Reflect::get(&window, &"applyRandomTheme".into()) else {
        return;
    };
    if let Some(f) = f.dyn_ref::<js_sys::Function>() {
        if let Err(e) = f.call0(&window) {
            debug!("applyRandomTheme failed: {e:?}");
        }
    }
}
