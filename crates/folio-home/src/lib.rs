//! Browser entry point: mounts every `[data-visual]` element on the page and
//! tears everything down again on `pagehide`.

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;

mod app;
mod dom;
mod frame_loop;
mod theme;
mod visibility;
mod visuals;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook_set();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    app::mount();

    if let Some(window) = dom::window() {
        // Back/forward cache restores the page without rerunning start.
        EventListener::new(&window, "pagehide", |_| app::unmount()).forget();
        EventListener::new(&window, "pageshow", |_| {
            if !app::is_mounted() {
                app::mount();
            }
        })
        .forget();
    }
}

/// Re-scan the page, e.g. after client-side navigation swapped content.
#[wasm_bindgen]
pub fn mount_visuals() {
    app::mount();
}

#[wasm_bindgen]
pub fn unmount_visuals() {
    app::unmount();
}

fn console_error_panic_hook_set() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        web_sys::console::error_1(&msg.into());
    }));
}
