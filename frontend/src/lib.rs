pub mod components;
pub mod config;
pub mod error;
pub mod ports;
pub mod state;
mod theme;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod boot;

#[cfg(test)]
mod test_support;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let config = config::SiteConfig::from_window();
    if console_log::init_with_level(config.log_level()).is_err() {
        web_sys::console::warn_1(&"site-theme logger already initialised".into());
    }
    log::info!("starting site-theme {}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = boot::run(config) {
        log::warn!("site controls disabled: {err:#}");
    }
}
