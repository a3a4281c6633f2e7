use serde::{Deserialize, Serialize};

use crate::error::SiteError;
use crate::state::theme::Theme;

/// Global a page may define before loading the module to override defaults.
pub const CONFIG_GLOBAL: &str = "__SITE_THEME_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub storage_key: String,
    pub theme_attribute: String,
    pub fallback_theme: Theme,
    pub color_scheme_query: String,
    pub theme_toggle_id: String,
    pub menu_toggle_id: String,
    pub menu_panel_selector: String,
    pub menu_link_selector: String,
    pub code_block_selector: String,
    pub code_selector: String,
    pub copy_button_class: String,
    pub copy: CopyLabels,
    pub giscus: GiscusSettings,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            theme_attribute: "data-theme".into(),
            fallback_theme: Theme::Dark,
            color_scheme_query: "(prefers-color-scheme: dark)".into(),
            theme_toggle_id: "theme-toggle".into(),
            menu_toggle_id: "menu-toggle".into(),
            menu_panel_selector: ".mobile-menu".into(),
            menu_link_selector: ".mobile-menu-link".into(),
            code_block_selector: ".highlight".into(),
            code_selector: "code".into(),
            copy_button_class: "copy-code".into(),
            copy: CopyLabels::default(),
            giscus: GiscusSettings::default(),
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyLabels {
    pub idle: String,
    pub copied: String,
    pub reset_after_ms: u32,
}

impl Default for CopyLabels {
    fn default() -> Self {
        Self {
            idle: "copy".into(),
            copied: "copied!".into(),
            reset_after_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiscusSettings {
    pub origin: String,
    pub script_src: String,
    pub frame_selector: String,
}

impl Default for GiscusSettings {
    fn default() -> Self {
        Self {
            origin: "https://giscus.app".into(),
            script_src: "https://giscus.app/client.js".into(),
            frame_selector: "iframe.giscus-frame".into(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::{SiteConfig, CONFIG_GLOBAL};
    use crate::error::SiteError;

    fn snapshot_from_window() -> Result<Option<String>, SiteError> {
        let window = web_sys::window().ok_or(SiteError::NoWindow)?;
        let any = js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into())?;
        if any.is_undefined() || any.is_null() {
            return Ok(None);
        }
        Ok(js_sys::JSON::stringify(&any)?.as_string())
    }

    impl SiteConfig {
        /// Defaults, overlaid with `window.__SITE_THEME_CONFIG` when present.
        pub fn from_window() -> Self {
            let parsed = snapshot_from_window()
                .and_then(|raw| raw.map(|raw| SiteConfig::from_json(&raw)).transpose());
            match parsed {
                Ok(Some(config)) => config,
                Ok(None) => SiteConfig::default(),
                Err(err) => {
                    web_sys::console::warn_1(&format!("{CONFIG_GLOBAL} ignored: {err}").into());
                    SiteConfig::default()
                }
            }
        }
    }
}
