use web_sys::Element;

use folio_motion::{LayeredWave, WaveParams, WavePose};
use folio_theme::PaletteRequest;

use super::{animate, base_opacity, MountCtx, Mounted, VisualKind};
use crate::dom;

pub fn mount(root: &Element, ctx: &MountCtx) -> Option<Mounted> {
    let layers = dom::parts(root, "layer");
    if layers.is_empty() {
        return None;
    }
    let bases: Vec<f64> = layers.iter().map(|l| base_opacity(l, 0.8)).collect();

    let mut params = WaveParams::default();
    params.depths.resize(layers.len(), *params.depths.last().unwrap_or(&0.25));

    let render = move |pose: &WavePose| {
        for (i, layer) in layers.iter().enumerate() {
            let offset = pose.offsets.get(i).copied().unwrap_or(0.0);
            let glow = pose.highlights.get(i).copied().unwrap_or(0.0);
            dom::set_attr(layer, "transform", format!("translate(0 {offset:.2})"));
            dom::set_num(layer, "opacity", (bases[i] + glow).min(1.0));
        }
    };

    animate(
        VisualKind::Wave,
        root,
        LayeredWave::new(params),
        ctx,
        PaletteRequest::default().with_muted(0.5),
        render,
    )
}
