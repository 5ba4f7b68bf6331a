#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod browser;
pub mod components;
pub mod config;
pub mod dom;
pub mod logging;
pub mod view_model;

/// Element the widget mounts into; the body is used when the host page lacks it.
pub const MOUNT_ELEMENT_ID: &str = "app";

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    match dom::document().and_then(|doc| doc.get_element_by_id(MOUNT_ELEMENT_ID)) {
        Some(root) => yew::Renderer::<app::App>::with_root(root).render(),
        None => yew::Renderer::<app::App>::new().render(),
    };
}
