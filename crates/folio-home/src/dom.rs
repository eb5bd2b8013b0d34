use std::fmt::Display;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlScriptElement, Window};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

/// `document.documentElement`, where the theme lives.
pub fn root_element() -> Option<Element> {
    document()?.document_element()
}

/// Milliseconds on the same clock as rAF timestamps.
pub fn now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0)
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|mq| mq.matches())
}

/// Text of a `<script type="application/json" id=...>` element.
pub fn script_text(id: &str) -> Option<String> {
    let el = document()?.get_element_by_id(id)?;
    el.dyn_into::<HtmlScriptElement>().ok()?.text().ok()
}

pub fn all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

/// First descendant with `data-part="name"`.
pub fn part(root: &Element, name: &str) -> Option<Element> {
    root.query_selector(&format!("[data-part=\"{name}\"]")).ok().flatten()
}

/// Every descendant with `data-part="name"`, in document order.
pub fn parts(root: &Element, name: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(&format!("[data-part=\"{name}\"]")) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_attr(el: &Element, name: &str, value: impl Display) {
    el.set_attribute(name, &value.to_string()).ok();
}

/// Numeric attribute, rounded to keep the DOM diff small.
pub fn set_num(el: &Element, name: &str, value: f64) {
    el.set_attribute(name, &format!("{value:.2}")).ok();
}

pub fn set_text(el: &Element, text: &str) {
    if el.text_content().as_deref() != Some(text) {
        el.set_text_content(Some(text));
    }
}

pub fn create_svg(doc: &Document, tag: &str) -> Option<Element> {
    doc.create_element_ns(Some(SVG_NS), tag).ok()
}

/// Client coordinates mapped into the element's viewBox units.
pub fn to_view_box(svg: &Element, client_x: f64, client_y: f64) -> (f64, f64) {
    let rect = svg.get_bounding_client_rect();
    let (vx, vy, vw, vh) = view_box(svg).unwrap_or((0.0, 0.0, rect.width(), rect.height()));
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return (vx, vy);
    }
    (
        vx + (client_x - rect.left()) / rect.width() * vw,
        vy + (client_y - rect.top()) / rect.height() * vh,
    )
}

/// Rendered CSS-pixel size, or `None` before layout.
pub fn pixel_size(el: &Element) -> Option<(f64, f64)> {
    let rect = el.get_bounding_client_rect();
    (rect.width() > 0.0 && rect.height() > 0.0).then(|| (rect.width(), rect.height()))
}

/// Keep one viewBox unit equal to one CSS pixel.
pub fn set_view_box(svg: &Element, width: f64, height: f64) {
    set_attr(svg, "viewBox", format!("0 0 {width:.0} {height:.0}"));
}

pub fn view_box(svg: &Element) -> Option<(f64, f64, f64, f64)> {
    let raw = svg.get_attribute("viewBox")?;
    let mut it = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok());
    Some((it.next()??, it.next()??, it.next()??, it.next()??))
}
