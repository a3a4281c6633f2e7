use crate::state::theme::Theme;

/// Shown while dark: click to go light.
pub const SUN_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="5"/><line x1="12" y1="1" x2="12" y2="3"/><line x1="12" y1="21" x2="12" y2="23"/><line x1="4.22" y1="4.22" x2="5.64" y2="5.64"/><line x1="18.36" y1="18.36" x2="19.78" y2="19.78"/><line x1="1" y1="12" x2="3" y2="12"/><line x1="21" y1="12" x2="23" y2="12"/><line x1="4.22" y1="19.78" x2="5.64" y2="18.36"/><line x1="18.36" y1="5.64" x2="19.78" y2="4.22"/></svg>"#;

/// Shown while light: click to go dark.
pub const MOON_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"/></svg>"#;

pub fn icon_for(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => SUN_ICON,
        Theme::Light => MOON_ICON,
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use crate::ports::{CommentWidget, PreferenceStore, ThemeSurface};
    use crate::state::theme::ThemeState;

    /// Wires the toggle button; returns `false` when the page has none.
    pub fn bind<P, S, W>(
        document: &web_sys::Document,
        id: &str,
        state: Rc<ThemeState<P, S, W>>,
    ) -> bool
    where
        P: PreferenceStore + 'static,
        S: ThemeSurface + 'static,
        W: CommentWidget + 'static,
    {
        let button = match document.get_element_by_id(id) {
            Some(el) => el,
            None => {
                log::debug!("no #{id} button; theme toggle inert");
                return false;
            }
        };

        let state_for_click = state.clone();
        let closure = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            state_for_click.toggle();
        }) as Box<dyn FnMut(_)>);
        if let Err(err) =
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            log::warn!("theme toggle not bound: {:?}", err);
            return false;
        }
        closure.forget();

        state.refresh_icon();
        true
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::bind;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_shows_sun_light_shows_moon() {
        assert_eq!(icon_for(Theme::Dark), SUN_ICON);
        assert_eq!(icon_for(Theme::Light), MOON_ICON);
        assert!(SUN_ICON.contains("<circle"));
        assert!(MOON_ICON.contains("<path"));
    }
}
