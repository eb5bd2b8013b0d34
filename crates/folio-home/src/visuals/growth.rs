use web_sys::Element;

use folio_motion::{GrowthCircles, GrowthPose};
use folio_theme::PaletteRequest;

use super::{animate, MountCtx, Mounted, VisualKind};
use crate::dom;

pub fn mount(root: &Element, ctx: &MountCtx) -> Option<Mounted> {
    let rings = dom::parts(root, "ring");
    if rings.is_empty() {
        return None;
    }
    let count = dom::part(root, "count");

    let render = move |pose: &GrowthPose| {
        for (ring, r) in rings.iter().zip(pose.radii) {
            dom::set_num(ring, "r", r);
        }
        if let Some(count) = &count {
            dom::set_text(count, &pose.label.to_string());
            dom::set_num(count, "opacity", pose.label_opacity);
        }
    };

    animate(
        VisualKind::Growth,
        root,
        GrowthCircles::default(),
        ctx,
        PaletteRequest::default().with_accent(0.85).with_muted(0.3),
        render,
    )
}
