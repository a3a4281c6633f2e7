use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::rc::Rc;

use crate::components::giscus::{self, GiscusFrame};
use crate::components::{copy_code, mobile_menu, theme_toggle};
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::state::theme::ThemeState;
use crate::theme::{watch_system_theme, MediaColorScheme};
use crate::utils::dom::{self, DocumentSurface};
use crate::utils::storage::{self, LocalStoragePreferences};

pub type BrowserThemeState = ThemeState<LocalStoragePreferences, DocumentSurface, GiscusFrame>;

/// Applies the initial theme now and binds the page controls once the DOM is ready.
pub fn run(config: SiteConfig) -> Result<()> {
    let window = storage::window().context("locating window")?;
    let document = window.document().ok_or(SiteError::NoDocument)?;
    let config = Rc::new(config);

    let surface = DocumentSurface::new(document.clone(), &config).context("reading document root")?;
    let state: Rc<BrowserThemeState> = Rc::new(ThemeState::new(
        LocalStoragePreferences::new(config.storage_key.clone()),
        surface,
        GiscusFrame::new(document.clone(), &config.giscus),
        config.fallback_theme,
    ));

    let scheme = MediaColorScheme::new(&window, &config.color_scheme_query);
    let theme = state.init(&scheme);
    info!("theme {theme} applied");

    match watch_system_theme(&scheme, state.clone()) {
        Ok(true) => {}
        Ok(false) => debug!("matchMedia unsupported; system theme not watched"),
        Err(err) => warn!("system theme listener not installed: {err}"),
    }

    let ready_document = document.clone();
    dom::on_ready(&document, move || {
        bind_controls(&ready_document, &window, config, state)
    })
    .context("waiting for DOMContentLoaded")?;
    Ok(())
}

fn bind_controls(
    document: &web_sys::Document,
    window: &web_sys::Window,
    config: Rc<SiteConfig>,
    state: Rc<BrowserThemeState>,
) {
    theme_toggle::bind(document, &config.theme_toggle_id, state.clone());

    if let Err(err) = mobile_menu::bind(document, &config) {
        warn!("mobile menu not bound: {err}");
    }

    match copy_code::bind(document, window, config.clone()) {
        Ok(count) => debug!("{count} copy buttons added"),
        Err(err) => warn!("copy buttons not added: {err}"),
    }

    match giscus::observe(document, &config.giscus, state) {
        Ok(true) => debug!("waiting for giscus frame"),
        Ok(false) => {}
        Err(err) => warn!("giscus observer not installed: {err}"),
    }
}
