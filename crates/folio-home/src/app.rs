//! Page-level state: the theme binding plus every mounted visual.

use std::cell::RefCell;

use log::{debug, info, warn};

use folio_graph::GraphData;
use folio_timeline::TimelineConfig;

use crate::dom;
use crate::theme::ThemeBinding;
use crate::visuals::{self, MountCtx, Mounted, VisualKind};

const GRAPH_DATA_ID: &str = "graph-data";
const TIMELINE_DATA_ID: &str = "timeline-data";

struct App {
    // Visuals hold subscriptions into the binding's hub, so they go first.
    visuals: Vec<Mounted>,
    _theme: ThemeBinding,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub fn is_mounted() -> bool {
    APP.with(|app| app.borrow().is_some())
}

pub fn mount() {
    unmount();

    let theme = ThemeBinding::install();
    let ctx = MountCtx {
        hub: theme.hub().clone(),
        reduced_motion: dom::prefers_reduced_motion(),
        graph: load_graph(),
        timeline: load_timeline(),
    };

    let mut visuals = Vec::new();
    for el in dom::all("[data-visual]") {
        let Some(name) = el.get_attribute("data-visual") else {
            continue;
        };
        let Some(kind) = VisualKind::parse(&name) else {
            warn!("unknown visual {name:?}");
            continue;
        };
        if let Some(mounted) = visuals::mount(kind, &el, &ctx) {
            visuals.push(mounted);
        }
    }
    info!(
        "mounted {} visuals (reduced motion: {})",
        visuals.len(),
        ctx.reduced_motion
    );

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            visuals,
            _theme: theme,
        })
    });
}

pub fn unmount() {
    // Drop outside the borrow; teardown may touch listeners that read APP.
    let previous = APP.with(|app| app.borrow_mut().take());
    if let Some(app) = previous {
        let kinds: Vec<VisualKind> = app.visuals.iter().map(|m| m.kind).collect();
        debug!("unmounting {kinds:?}");
        drop(app);
    }
}

fn load_graph() -> GraphData {
    let Some(text) = dom::script_text(GRAPH_DATA_ID) else {
        return GraphData::portfolio();
    };
    GraphData::from_json(&text).unwrap_or_else(|e| {
        warn!("invalid #{GRAPH_DATA_ID}: {e}; using built-in graph");
        GraphData::portfolio()
    })
}

fn load_timeline() -> Option<TimelineConfig> {
    let text = dom::script_text(TIMELINE_DATA_ID)?;
    match TimelineConfig::from_json(&text) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("invalid #{TIMELINE_DATA_ID}: {e}");
            None
        }
    }
}
