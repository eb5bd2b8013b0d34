use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, PointerEvent};

use folio_graph::{Simulation, SimulationParams, Vec2};
use folio_motion::{Transition, VisibilityGate};
use folio_theme::PaletteRequest;

use super::{paint, MountCtx, Mounted, Subscription, VisualKind};
use crate::dom;
use crate::frame_loop::FrameLoop;
use crate::visibility::VisibilityWatch;

/// Ticks run up front when motion is reduced, so the static layout is
/// already untangled.
const SETTLE_TICKS: usize = 300;

struct GraphView {
    sim: Simulation,
    gate: VisibilityGate,
    reduced: bool,
    nodes: Vec<(Element, Element)>,
    edges: Vec<Element>,
}

impl GraphView {
    fn frame(&mut self, now: f64) -> bool {
        self.sim.tick(now / 1000.0);
        self.render();
        self.sim.dragging().is_some() || (self.gate.is_visible() && !self.reduced)
    }

    fn render(&self) {
        let nodes = self.sim.nodes();
        for (line, edge) in self.edges.iter().zip(self.sim.edges()) {
            let a = nodes[edge.source.0].pos;
            let b = nodes[edge.target.0].pos;
            dom::set_num(line, "x1", a.x);
            dom::set_num(line, "y1", a.y);
            dom::set_num(line, "x2", b.x);
            dom::set_num(line, "y2", b.y);
        }
        for ((circle, label), node) in self.nodes.iter().zip(nodes) {
            dom::set_num(circle, "cx", node.pos.x);
            dom::set_num(circle, "cy", node.pos.y);
            dom::set_num(label, "x", node.pos.x);
            dom::set_num(label, "y", node.pos.y + node.size + 12.0);
        }
    }
}

pub fn mount(root: &Element, ctx: &MountCtx) -> Option<Mounted> {
    let doc = dom::document()?;
    let (width, height) = measure(root);
    dom::set_view_box(root, width, height);

    let mut rng = rand::thread_rng();
    let mut sim = match ctx.graph.build(SimulationParams::new(width, height), &mut rng) {
        Ok(sim) => sim,
        Err(e) => {
            warn!("graph data rejected: {e}");
            return None;
        }
    };

    let edge_group = dom::part(root, "edges").unwrap_or_else(|| root.clone());
    let node_group = dom::part(root, "nodes").unwrap_or_else(|| root.clone());

    let mut edges = Vec::with_capacity(sim.edges().len());
    for _ in sim.edges() {
        let line = dom::create_svg(&doc, "line")?;
        dom::set_attr(&line, "data-stroke", "muted");
        dom::set_attr(&line, "stroke-width", 1);
        edge_group.append_child(&line).ok();
        edges.push(line);
    }

    let mut nodes = Vec::with_capacity(sim.nodes().len());
    for node in sim.nodes() {
        let circle = dom::create_svg(&doc, "circle")?;
        dom::set_num(&circle, "r", node.size);
        dom::set_attr(&circle, "data-fill", "accent");
        dom::set_num(&circle, "opacity", node.base_opacity);
        let label = dom::create_svg(&doc, "text")?;
        label.set_text_content(Some(node.label.as_str()));
        dom::set_attr(&label, "data-part", "label");
        dom::set_attr(&label, "data-fill", "text");
        dom::set_attr(&label, "text-anchor", "middle");
        dom::set_attr(&label, "font-size", 11);
        node_group.append_child(&circle).ok();
        node_group.append_child(&label).ok();
        nodes.push((circle, label));
    }

    if ctx.reduced_motion {
        for i in 0..SETTLE_TICKS {
            sim.tick(i as f64 / 60.0);
        }
    }

    let view = Rc::new(RefCell::new(GraphView {
        sim,
        gate: VisibilityGate::new(),
        reduced: ctx.reduced_motion,
        nodes,
        edges,
    }));
    view.borrow().render();

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
                Transition::Entered => frame.start(),
                Transition::Exited => frame.stop(),
                Transition::Unchanged => {}
            }
        }
    })?;

    let mut mounted = Mounted::new(VisualKind::Graph);
    mounted.listeners = pointer_listeners(root, &view, &frame);
    if let Some(window) = dom::window() {
        let (view, frame, svg) = (view.clone(), frame.clone(), root.clone());
        mounted.listeners.push(EventListener::new(&window, "resize", move |_| {
            let (width, height) = measure(&svg);
            dom::set_view_box(&svg, width, height);
            let mut v = view.borrow_mut();
            v.sim.resize(width, height);
            v.render();
            if v.gate.is_visible() {
                frame.start();
            }
        }));
    }
    let paint_root = root.clone();
    mounted.subscription = Some(Subscription::new(
        ctx,
        PaletteRequest::default().with_accent(0.9).with_muted(0.35),
        move |p| paint(&paint_root, p),
    ));
    mounted.frame = Some(frame);
    mounted.watch = Some(watch);
    Some(mounted)
}

/// CSS-pixel size, falling back to the markup's viewBox before layout.
fn measure(root: &Element) -> (f64, f64) {
    dom::pixel_size(root)
        .or_else(|| dom::view_box(root).map(|(_, _, w, h)| (w, h)))
        .unwrap_or((600.0, 400.0))
}

fn pointer_listeners(root: &Element, view: &Rc<RefCell<GraphView>>, frame: &Rc<FrameLoop>) -> Vec<EventListener> {
    let point = {
        let svg = root.clone();
        move |e: &PointerEvent| {
            let (x, y) = dom::to_view_box(&svg, e.client_x() as f64, e.client_y() as f64);
            Vec2::new(x, y)
        }
    };

    let down = {
        let (view, frame, point, svg) = (view.clone(), frame.clone(), point.clone(), root.clone());
        EventListener::new(root, "pointerdown", move |event| {
            let Some(e) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            if view.borrow_mut().sim.pointer_down(point(e), e.time_stamp()).is_some() {
                svg.set_pointer_capture(e.pointer_id()).ok();
                frame.start();
            }
        })
    };

    let moved = {
        let (view, frame, point) = (view.clone(), frame.clone(), point.clone());
        EventListener::new(root, "pointermove", move |event| {
            let Some(e) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let mut v = view.borrow_mut();
            v.sim.pointer_move(point(e), e.time_stamp());
            if v.sim.dragging().is_some() {
                frame.start();
            }
        })
    };

    let up = {
        let (view, frame) = (view.clone(), frame.clone());
        EventListener::new(root, "pointerup", move |event| {
            if view.borrow_mut().sim.pointer_up(event.time_stamp()).is_some() {
                frame.start();
            }
        })
    };

    let leave = {
        let view = view.clone();
        EventListener::new(root, "pointerleave", move |event| {
            view.borrow_mut().sim.pointer_leave(event.time_stamp());
        })
    };

    vec![down, moved, up, leave]
}
