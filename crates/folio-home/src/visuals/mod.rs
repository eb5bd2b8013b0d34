//! Mounting of individual visuals onto `[data-visual]` elements.

mod cradle;
mod discovery;
mod graph;
mod growth;
mod shapes;
mod timeline;
mod wave;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::Element;

use folio_graph::GraphData;
use folio_motion::{Controller, Transition, Visual};
use folio_theme::{Color, PaletteRequest, ResolvedPalette, SubscriptionId, ThemeHub};
use folio_timeline::TimelineConfig;

use crate::dom;
use crate::frame_loop::FrameLoop;
use crate::visibility::VisibilityWatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Wave,
    Discovery,
    Growth,
    Cradle,
    Graph,
    Timeline,
    Shapes,
}

impl VisualKind {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "wave" => Self::Wave,
            "discovery" => Self::Discovery,
            "growth" => Self::Growth,
            "cradle" => Self::Cradle,
            "graph" => Self::Graph,
            "timeline" => Self::Timeline,
            "shapes" => Self::Shapes,
            _ => return None,
        })
    }
}

/// Shared state handed to every mount.
pub struct MountCtx {
    pub hub: Rc<RefCell<ThemeHub>>,
    pub reduced_motion: bool,
    pub graph: GraphData,
    /// `None` when the page embeds no timeline data.
    pub timeline: Option<TimelineConfig>,
}

/// Hub subscription removed on drop.
pub struct Subscription {
    hub: Rc<RefCell<ThemeHub>>,
    id: SubscriptionId,
}

impl Subscription {
    pub fn new(
        ctx: &MountCtx,
        request: PaletteRequest,
        paint: impl FnMut(&ResolvedPalette) + 'static,
    ) -> Self {
        let id = ctx.hub.borrow_mut().subscribe(request, paint);
        Self {
            hub: ctx.hub.clone(),
            id,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut hub) = self.hub.try_borrow_mut() {
            hub.unsubscribe(self.id);
        }
    }
}

/// Everything a mounted visual keeps alive. Dropping it stops the frame
/// loop, disconnects the observer and removes listeners.
pub struct Mounted {
    pub kind: VisualKind,
    pub frame: Option<Rc<FrameLoop>>,
    pub watch: Option<VisibilityWatch>,
    pub listeners: Vec<EventListener>,
    pub subscription: Option<Subscription>,
}

impl Mounted {
    pub fn new(kind: VisualKind) -> Self {
        Self {
            kind,
            frame: None,
            watch: None,
            listeners: Vec::new(),
            subscription: None,
        }
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Some(frame) = &self.frame {
            frame.stop();
        }
    }
}

pub fn mount(kind: VisualKind, root: &Element, ctx: &MountCtx) -> Option<Mounted> {
    match kind {
        VisualKind::Wave => wave::mount(root, ctx),
        VisualKind::Discovery => discovery::mount(root, ctx),
        VisualKind::Growth => growth::mount(root, ctx),
        VisualKind::Cradle => cradle::mount(root, ctx),
        VisualKind::Shapes => shapes::mount(root, ctx),
        VisualKind::Graph => graph::mount(root, ctx),
        VisualKind::Timeline => timeline::mount(root, ctx),
    }
}

/// Drive a scripted visual from visibility: animate while visible, paint
/// the rest pose once under reduced motion.
pub fn animate<V, R>(
    kind: VisualKind,
    root: &Element,
    visual: V,
    ctx: &MountCtx,
    request: PaletteRequest,
    mut render: R,
) -> Option<Mounted>
where
    V: Visual + 'static,
    R: FnMut(&V::Pose) + 'static,
{
    let controller = Rc::new(RefCell::new(
        Controller::new(visual).with_reduced_motion(ctx.reduced_motion),
    ));

    let frame = FrameLoop::new({
        let controller = controller.clone();
        move |now| {
            let mut c = controller.borrow_mut();
            if let Some(pose) = c.frame(now).into_pose() {
                render(&pose);
            }
            c.is_running()
        }
    });

    let watch = VisibilityWatch::new(root, {
        let controller = controller.clone();
        let frame = frame.clone();
        move |ratio| {
            let transition = controller.borrow_mut().observe(ratio);
            match transition {
                Transition::Entered => frame.start(),
                Transition::Exited => frame.stop(),
                Transition::Unchanged => {}
            }
        }
    })?;
    if ctx.reduced_motion {
        frame.start();
    }

    let paint_root = root.clone();
    let mut mounted = Mounted::new(kind);
    mounted.subscription = Some(Subscription::new(ctx, request, move |p| paint(&paint_root, p)));
    mounted.frame = Some(frame);
    mounted.watch = Some(watch);
    Some(mounted)
}

fn role<'a>(palette: &'a ResolvedPalette, name: &str) -> Option<&'a Color> {
    match name {
        "text" => Some(&palette.text),
        "accent" => Some(&palette.accent),
        "muted" => Some(&palette.muted),
        "background" => Some(&palette.background),
        _ => None,
    }
}

/// Apply palette roles named by `data-fill` / `data-stroke`, and the theme
/// font to `data-font` elements.
pub fn paint(root: &Element, palette: &ResolvedPalette) {
    for (selector, attr) in [("[data-fill]", "fill"), ("[data-stroke]", "stroke")] {
        let data_attr = format!("data-{attr}");
        let targets = root.query_selector_all(selector).ok();
        let count = targets.as_ref().map_or(0, |l| l.length());
        for i in 0..count {
            let Some(el) = targets
                .as_ref()
                .and_then(|l| l.get(i))
                .and_then(|n| wasm_bindgen::JsCast::dyn_into::<Element>(n).ok())
            else {
                continue;
            };
            if let Some(color) = el.get_attribute(&data_attr).and_then(|r| role(palette, &r).copied()) {
                dom::set_attr(&el, attr, color);
            }
        }
    }
    if let Some(font) = &palette.font_family {
        for el in dom::parts(root, "label") {
            dom::set_attr(&el, "font-family", font);
        }
    }
}

/// Opacity declared on an element by `data-opacity`, or `default`.
pub fn base_opacity(el: &Element, default: f64) -> f64 {
    el.get_attribute("data-opacity")
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}
