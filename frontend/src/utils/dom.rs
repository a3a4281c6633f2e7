use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::ports::ThemeSurface;
use crate::state::theme::Theme;

/// The `<html>` theme attribute and the toggle button that mirrors it.
pub struct DocumentSurface {
    document: Document,
    root: Element,
    attribute: String,
    toggle_id: String,
}

impl DocumentSurface {
    pub fn new(document: Document, config: &SiteConfig) -> Result<Self, SiteError> {
        let root = document
            .document_element()
            .ok_or(SiteError::MissingElement("root"))?;
        Ok(Self {
            document,
            root,
            attribute: config.theme_attribute.clone(),
            toggle_id: config.theme_toggle_id.clone(),
        })
    }
}

impl ThemeSurface for DocumentSurface {
    fn theme_attribute(&self) -> Option<String> {
        self.root.get_attribute(&self.attribute)
    }

    fn apply_theme(&self, theme: Theme) {
        if let Err(err) = self.root.set_attribute(&self.attribute, theme.as_str()) {
            log::warn!("theme attribute not set: {}", SiteError::js(&err));
        }
    }

    fn set_toggle_icon(&self, markup: &str) -> bool {
        match self.document.get_element_by_id(&self.toggle_id) {
            Some(button) => {
                button.set_inner_html(markup);
                true
            }
            None => false,
        }
    }
}

/// Runs `f` once the document has been parsed, immediately if that already happened.
pub fn on_ready(document: &Document, f: impl FnOnce() + 'static) -> Result<(), SiteError> {
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let closure: Closure<dyn FnMut()> = Closure::once(f);
    document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
