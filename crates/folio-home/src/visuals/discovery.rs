use web_sys::Element;

use folio_motion::{DiscoveryDot, DiscoveryPose};
use folio_theme::PaletteRequest;

use super::{animate, MountCtx, Mounted, VisualKind};
use crate::dom;

pub fn mount(root: &Element, ctx: &MountCtx) -> Option<Mounted> {
    let dot = dom::part(root, "dot")?;
    let stages = dom::parts(root, "stage");

    let render = move |pose: &DiscoveryPose| {
        dom::set_num(&dot, "cx", pose.x);
        dom::set_num(&dot, "cy", pose.y);
        dom::set_num(&dot, "r", pose.radius);
        dom::set_num(&dot, "opacity", pose.opacity);
        for (stage, glow) in stages.iter().zip(&pose.stage_glow) {
            dom::set_num(stage, "opacity", 0.4 + 0.6 * glow);
        }
    };

    animate(
        VisualKind::Discovery,
        root,
        DiscoveryDot::default(),
        ctx,
        PaletteRequest::default().with_muted(0.4),
        render,
    )
}
