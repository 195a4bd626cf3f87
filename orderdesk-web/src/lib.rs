#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod api;
pub mod app;
pub mod bootstrap;
pub mod components;
pub mod dom;
pub mod i18n;
pub mod pages;
pub mod router;
pub mod state;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let data = bootstrap::load_bootstrap_or_default();
    i18n::init_from_config(&data.config.locale);
    let props = app::Props {
        data: std::rc::Rc::new(data),
    };
    yew::Renderer::<app::App>::with_props(props).render();
}
