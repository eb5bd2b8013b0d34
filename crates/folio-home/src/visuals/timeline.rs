use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, PointerEvent, TouchEvent};

use folio_motion::{Transition, VisibilityGate};
use folio_theme::PaletteRequest;
use folio_timeline::{CameraParams, LayoutParams, ScrollMode, TimelineCamera, TimelineLayout};

use super::{paint, MountCtx, Mounted, Subscription, VisualKind};
use crate::dom;
use crate::frame_loop::FrameLoop;
use crate::visibility::VisibilityWatch;

/// Opacity of a period bar that is not under the pointer.
const PERIOD_IDLE_OPACITY: f64 = 0.6;

struct TimelineView {
    layout: TimelineLayout,
    camera: TimelineCamera,
    gate: VisibilityGate,
    reduced: bool,
    track: Element,
    /// Period bars by period id.
    periods: Vec<(String, Element)>,
}

impl TimelineView {
    fn frame(&mut self, now: f64) -> bool {
        if self.reduced && self.camera.mode() == ScrollMode::Autoplay {
            self.render(self.camera.rest_scroll());
            return false;
        }
        let scroll = self.camera.frame(now);
        self.render(scroll);
        self.gate.is_visible()
    }

    fn render(&self, scroll: f64) {
        dom::set_attr(&self.track, "transform", format!("translate({:.2} 0)", -scroll));
    }

    /// Brighten the period under viewport x; `None` clears the highlight.
    fn highlight(&self, x: Option<f64>) {
        let active = x.and_then(|x| self.layout.period_at(x + self.camera.scroll()));
        for (id, bar) in &self.periods {
            let on = active.is_some_and(|p| &p.id == id);
            dom::set_num(bar, "opacity", if on { 1.0 } else { PERIOD_IDLE_OPACITY });
        }
    }
}

pub fn mount(root: &Element, ctx: &MountCtx) -> Option<Mounted> {
    let Some(config) = ctx.timeline.clone() else {
        warn!("timeline visual present but no #timeline-data; skipping");
        return None;
    };
    let doc = dom::document()?;
    let (width, height) = measure(root);
    dom::set_view_box(root, width, height);

    let layout = TimelineLayout::new(config, LayoutParams::default());
    let track = match dom::part(root, "track") {
        Some(track) => track,
        None => {
            let g = dom::create_svg(&doc, "g")?;
            root.append_child(&g).ok();
            g
        }
    };
    let periods = draw(&doc, &track, &layout, height)?;

    let camera = TimelineCamera::from_layout(&layout, width, CameraParams::default())
        .with_window_width(dom::viewport_width());
    let view = Rc::new(RefCell::new(TimelineView {
        layout,
        camera,
        gate: VisibilityGate::new(),
        reduced: ctx.reduced_motion,
        track,
        periods,
    }));
    {
        let v = view.borrow();
        v.render(v.camera.rest_scroll());
    }

    let frame = FrameLoop::new({
        let view = view.clone();
        move |now| view.borrow_mut().frame(now)
    });

    let watch = VisibilityWatch::new(root, {
        let view = view.clone();
        let frame = frame.clone();
        move |ratio| {
            let transition = view.borrow_mut().gate.observe(ratio);
            match transition {
                Transition::Entered => {
                    view.borrow_mut().camera.restart(dom::now());
                    frame.start();
                }
                Transition::Exited => frame.stop(),
                Transition::Unchanged => {}
            }
        }
    })?;

    let mut mounted = Mounted::new(VisualKind::Timeline);
    mounted.listeners = listeners(root, &view, &frame);
    let paint_root = root.clone();
    mounted.subscription = Some(Subscription::new(
        ctx,
        PaletteRequest::default().with_accent(0.25).with_muted(0.6),
        move |p| paint(&paint_root, p),
    ));
    mounted.frame = Some(frame);
    mounted.watch = Some(watch);
    Some(mounted)
}

fn measure(root: &Element) -> (f64, f64) {
    dom::pixel_size(root).unwrap_or_else(|| (dom::viewport_width(), 160.0))
}

fn draw(doc: &Document, track: &Element, layout: &TimelineLayout, height: f64) -> Option<Vec<(String, Element)>> {
    let axis_y = (height * 0.6).round();
    let el = |tag: &str, attrs: &[(&str, String)]| -> Option<Element> {
        let e = dom::create_svg(doc, tag)?;
        for (k, v) in attrs {
            e.set_attribute(k, v).ok();
        }
        track.append_child(&e).ok();
        Some(e)
    };

    el(
        "line",
        &[
            ("x1", "0".into()),
            ("x2", format!("{:.2}", layout.content_width())),
            ("y1", axis_y.to_string()),
            ("y2", axis_y.to_string()),
            ("data-stroke", "muted".into()),
        ],
    )?;

    for tick in layout.year_ticks() {
        el(
            "line",
            &[
                ("x1", format!("{:.2}", tick.x)),
                ("x2", format!("{:.2}", tick.x)),
                ("y1", (axis_y - 4.0).to_string()),
                ("y2", (axis_y + 4.0).to_string()),
                ("data-stroke", "muted".into()),
            ],
        )?;
        let label = el(
            "text",
            &[
                ("x", format!("{:.2}", tick.x)),
                ("y", (axis_y + 18.0).to_string()),
                ("text-anchor", "middle".into()),
                ("font-size", "10".into()),
                ("data-part", "label".into()),
                ("data-fill", "muted".into()),
            ],
        )?;
        dom::set_text(&label, &tick.year.to_string());
    }

    let mut periods = Vec::new();
    for span in layout.period_spans() {
        let bar = el(
            "rect",
            &[
                ("x", format!("{:.2}", span.x0)),
                ("y", (axis_y - 22.0).to_string()),
                ("width", format!("{:.2}", span.width())),
                ("height", "12".into()),
                ("rx", "3".into()),
                ("opacity", PERIOD_IDLE_OPACITY.to_string()),
                ("data-fill", "accent".into()),
            ],
        )?;
        periods.push((span.id.clone(), bar));
        let label = el(
            "text",
            &[
                ("x", format!("{:.2}", span.center())),
                ("y", (axis_y - 28.0).to_string()),
                ("text-anchor", "middle".into()),
                ("font-size", "11".into()),
                ("data-part", "label".into()),
                ("data-fill", "text".into()),
            ],
        )?;
        dom::set_text(&label, &span.label);
    }

    for mark in layout.milestone_marks() {
        let (r, role) = if mark.major { (5.0, "text") } else { (3.0, "muted") };
        el(
            "circle",
            &[
                ("cx", format!("{:.2}", mark.x)),
                ("cy", axis_y.to_string()),
                ("r", r.to_string()),
                ("data-fill", role.into()),
            ],
        )?;
        let label = el(
            "text",
            &[
                ("x", format!("{:.2}", mark.x)),
                ("y", (axis_y + if mark.major { 34.0 } else { 30.0 }).to_string()),
                ("text-anchor", "middle".into()),
                ("font-size", (if mark.major { "11" } else { "9" }).into()),
                ("data-part", "label".into()),
                ("data-fill", role.into()),
            ],
        )?;
        dom::set_text(&label, &mark.label);
    }
    debug!(
        "timeline drawn: {} periods, {:.0}px wide",
        layout.period_spans().len(),
        layout.content_width()
    );
    Some(periods)
}

fn listeners(root: &Element, view: &Rc<RefCell<TimelineView>>, frame: &Rc<FrameLoop>) -> Vec<EventListener> {
    let mut out = Vec::new();

    {
        let (view, frame, svg) = (view.clone(), frame.clone(), root.clone());
        out.push(EventListener::new(root, "pointermove", move |event| {
            let Some(e) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            if e.pointer_type() != "mouse" {
                return;
            }
            let (x, _) = dom::to_view_box(&svg, e.client_x() as f64, e.client_y() as f64);
            let mut v = view.borrow_mut();
            v.camera.hover_start(x, dom::now());
            v.highlight(Some(x));
            frame.start();
        }));
    }
    {
        let (view, frame) = (view.clone(), frame.clone());
        out.push(EventListener::new(root, "pointerleave", move |_| {
            let mut v = view.borrow_mut();
            v.camera.hover_end(dom::now());
            v.highlight(None);
            frame.start();
        }));
    }

    let touch_x = |svg: &Element, event: &web_sys::Event| -> Option<f64> {
        let e = event.dyn_ref::<TouchEvent>()?;
        let t = e.touches().get(0)?;
        Some(dom::to_view_box(svg, t.client_x() as f64, t.client_y() as f64).0)
    };
    {
        let (view, svg) = (view.clone(), root.clone());
        out.push(EventListener::new(root, "touchstart", move |event| {
            if let Some(x) = touch_x(&svg, event) {
                view.borrow_mut().camera.touch_start(x);
            }
        }));
    }
    {
        let (view, svg) = (view.clone(), root.clone());
        out.push(EventListener::new(root, "touchmove", move |event| {
            if let Some(x) = touch_x(&svg, event) {
                let mut v = view.borrow_mut();
                v.camera.touch_move(x);
                let scroll = v.camera.scroll();
                v.render(scroll);
            }
        }));
    }
    {
        let (view, frame) = (view.clone(), frame.clone());
        out.push(EventListener::new(root, "touchend", move |_| {
            view.borrow_mut().camera.touch_end(dom::now());
            frame.start();
        }));
    }

    if let Some(window) = dom::window() {
        let (view, svg) = (view.clone(), root.clone());
        out.push(EventListener::new(&window, "resize", move |_| {
            let (width, height) = measure(&svg);
            dom::set_view_box(&svg, width, height);
            view.borrow_mut().camera.resize(width, dom::viewport_width());
        }));
    }
    out
}
