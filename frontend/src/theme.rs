#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use crate::error::SiteError;
    use crate::ports::{ColorScheme, CommentWidget, PreferenceStore, ThemeSurface};
    use crate::state::theme::ThemeState;

    /// `matchMedia` for the dark-mode query; reads as light when unsupported.
    pub struct MediaColorScheme {
        list: Option<web_sys::MediaQueryList>,
    }

    impl MediaColorScheme {
        pub fn new(window: &web_sys::Window, query: &str) -> Self {
            Self {
                list: window.match_media(query).ok().flatten(),
            }
        }
    }

    impl ColorScheme for MediaColorScheme {
        fn prefers_dark(&self) -> bool {
            self.list.as_ref().map(|list| list.matches()).unwrap_or(false)
        }
    }

    pub fn watch_system_theme<P, S, W>(
        scheme: &MediaColorScheme,
        state: Rc<ThemeState<P, S, W>>,
    ) -> Result<bool, SiteError>
    where
        P: PreferenceStore + 'static,
        S: ThemeSurface + 'static,
        W: CommentWidget + 'static,
    {
        let list = match &scheme.list {
            Some(list) => list,
            None => return Ok(false),
        };
        let closure = Closure::wrap(Box::new(move |event: web_sys::MediaQueryListEvent| {
            state.handle_system_change(event.matches());
        }) as Box<dyn FnMut(_)>);
        list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(true)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{watch_system_theme, MediaColorScheme};
