//! Keeps the embedded giscus discussion frame on the same theme as the page.

use serde::{Deserialize, Serialize};

use crate::ports::{CommentWidget, PreferenceStore, ThemeSurface};
use crate::state::theme::{Theme, ThemeState};

/// `{ giscus: { setConfig: { theme } } }`, as giscus expects it over `postMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiscusMessage {
    giscus: GiscusCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GiscusCommand {
    #[serde(rename = "setConfig")]
    set_config: GiscusSetConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GiscusSetConfig {
    theme: String,
}

impl GiscusMessage {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            giscus: GiscusCommand {
                set_config: GiscusSetConfig {
                    theme: widget_theme(theme).to_string(),
                },
            },
        }
    }

    pub fn theme(&self) -> &str {
        &self.giscus.set_config.theme
    }
}

pub fn widget_theme(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "transparent_dark",
        Theme::Light => "light",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverStep {
    Waiting,
    Done,
}

/// One mutation batch: forward the applied theme once the frame exists.
pub fn catch_up<P, S, W>(state: &ThemeState<P, S, W>) -> ObserverStep
where
    P: PreferenceStore,
    S: ThemeSurface,
    W: CommentWidget,
{
    if state.sync_widget() {
        ObserverStep::Done
    } else {
        ObserverStep::Waiting
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use super::{catch_up, GiscusMessage, ObserverStep};
    use crate::config::GiscusSettings;
    use crate::error::SiteError;
    use crate::ports::{CommentWidget, PreferenceStore, ThemeSurface};
    use crate::state::theme::ThemeState;

    pub struct GiscusFrame {
        document: web_sys::Document,
        frame_selector: String,
        origin: String,
    }

    impl GiscusFrame {
        pub fn new(document: web_sys::Document, settings: &GiscusSettings) -> Self {
            Self {
                document,
                frame_selector: settings.frame_selector.clone(),
                origin: settings.origin.clone(),
            }
        }

        fn content_window(&self) -> Option<web_sys::Window> {
            self.document
                .query_selector(&self.frame_selector)
                .ok()
                .flatten()?
                .dyn_into::<web_sys::HtmlIFrameElement>()
                .ok()?
                .content_window()
        }

        fn send(
            &self,
            target: &web_sys::Window,
            message: &GiscusMessage,
        ) -> Result<(), SiteError> {
            let payload = js_sys::JSON::parse(&serde_json::to_string(message)?)?;
            target.post_message(&payload, &self.origin)?;
            Ok(())
        }
    }

    impl CommentWidget for GiscusFrame {
        fn post(&self, message: &GiscusMessage) -> bool {
            let Some(target) = self.content_window() else {
                return false;
            };
            match self.send(&target, message) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("giscus theme message failed: {err}");
                    false
                }
            }
        }
    }

    /// Installs a self-disconnecting observer when the giscus loader is on the page.
    pub fn observe<P, S, W>(
        document: &web_sys::Document,
        settings: &GiscusSettings,
        state: Rc<ThemeState<P, S, W>>,
    ) -> Result<bool, SiteError>
    where
        P: PreferenceStore + 'static,
        S: ThemeSurface + 'static,
        W: CommentWidget + 'static,
    {
        let loader = format!("script[src=\"{}\"]", settings.script_src);
        if document.query_selector(&loader)?.is_none() {
            return Ok(false);
        }
        let body = document.body().ok_or(SiteError::MissingElement("body"))?;

        let callback = Closure::wrap(Box::new(
            move |_records: js_sys::Array, observer: web_sys::MutationObserver| {
                if catch_up(&*state) == ObserverStep::Done {
                    log::debug!("giscus frame found; theme synced");
                    observer.disconnect();
                }
            },
        ) as Box<dyn FnMut(_, _)>);
        let observer = web_sys::MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let options = web_sys::MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(&body, &options)?;
        callback.forget();
        Ok(true)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{observe, GiscusFrame};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::harness;
    use serde_json::json;

    #[test]
    fn message_shape_matches_giscus_contract() {
        assert_eq!(
            serde_json::to_value(GiscusMessage::for_theme(Theme::Dark)).unwrap(),
            json!({ "giscus": { "setConfig": { "theme": "transparent_dark" } } })
        );
        assert_eq!(
            serde_json::to_value(GiscusMessage::for_theme(Theme::Light)).unwrap(),
            json!({ "giscus": { "setConfig": { "theme": "light" } } })
        );
    }

    #[test]
    fn catch_up_waits_for_frame_then_finishes() {
        let h = harness(Some("dark"), None);
        h.state.set_theme(Theme::Dark);
        assert_eq!(catch_up(&h.state), ObserverStep::Waiting);
        assert!(h.widget.sent().is_empty());

        h.widget.set_present(true);
        assert_eq!(catch_up(&h.state), ObserverStep::Done);
        assert_eq!(h.widget.themes(), vec!["transparent_dark"]);
    }

    #[test]
    fn catch_up_sends_applied_theme_not_stored() {
        let h = harness(Some("dark"), Some("light"));
        h.widget.set_present(true);
        assert_eq!(catch_up(&h.state), ObserverStep::Done);
        assert_eq!(h.widget.themes(), vec!["light"]);
    }
}
