use web_sys::Element;

use folio_motion::{Cradle, CradleLabel, CradlePose};
use folio_theme::PaletteRequest;

use super::{animate, MountCtx, Mounted, VisualKind};
use crate::dom;

pub fn mount(root: &Element, ctx: &MountCtx) -> Option<Mounted> {
    let balls = dom::parts(root, "ball");
    if balls.is_empty() {
        return None;
    }
    let strings = dom::parts(root, "string");
    let work = dom::part(root, "work-label");
    let life = dom::part(root, "life-label");
    let cradle = Cradle::default();
    let pivot_y = cradle.params().pivot_y;

    let render = move |pose: &CradlePose| {
        for (i, ball) in pose.balls.iter().enumerate() {
            if let Some(el) = balls.get(i) {
                dom::set_num(el, "cx", ball.x);
                dom::set_num(el, "cy", ball.y);
            }
            if let Some(line) = strings.get(i) {
                dom::set_num(line, "x1", ball.pivot_x);
                dom::set_num(line, "y1", pivot_y);
                dom::set_num(line, "x2", ball.x);
                dom::set_num(line, "y2", ball.y);
            }
        }
        place_label(work.as_ref(), &pose.work);
        place_label(life.as_ref(), &pose.life);
    };

    animate(
        VisualKind::Cradle,
        root,
        cradle,
        ctx,
        PaletteRequest::default().with_muted(0.5),
        render,
    )
}

fn place_label(el: Option<&Element>, label: &CradleLabel) {
    if let Some(el) = el {
        dom::set_attr(el, "transform", format!("translate({:.2} 0)", label.offset_x));
        dom::set_num(el, "opacity", label.opacity);
    }
}
