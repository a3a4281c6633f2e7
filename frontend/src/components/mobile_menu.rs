pub const ACTIVE_CLASS: &str = "active";
pub const ARIA_EXPANDED: &str = "aria-expanded";

pub trait MenuElement {
    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&self, class: &str) -> bool;
    fn remove_class(&self, class: &str);
    fn set_attr(&self, name: &str, value: &str);
}

/// Hamburger button plus the panel it reveals.
pub struct MobileMenu<E> {
    button: E,
    panel: E,
}

impl<E: MenuElement> MobileMenu<E> {
    pub fn new(button: E, panel: E) -> Self {
        Self { button, panel }
    }

    pub fn toggle(&self) -> bool {
        let expanded = self.button.toggle_class(ACTIVE_CLASS);
        self.panel.toggle_class(ACTIVE_CLASS);
        self.button
            .set_attr(ARIA_EXPANDED, if expanded { "true" } else { "false" });
        expanded
    }

    pub fn close(&self) {
        self.button.remove_class(ACTIVE_CLASS);
        self.panel.remove_class(ACTIVE_CLASS);
        self.button.set_attr(ARIA_EXPANDED, "false");
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use super::{MenuElement, MobileMenu};
    use crate::config::SiteConfig;
    use crate::error::SiteError;

    impl MenuElement for web_sys::Element {
        fn toggle_class(&self, class: &str) -> bool {
            self.class_list().toggle(class).unwrap_or(false)
        }

        fn remove_class(&self, class: &str) {
            let _ = self.class_list().remove_1(class);
        }

        fn set_attr(&self, name: &str, value: &str) {
            let _ = self.set_attribute(name, value);
        }
    }

    fn on_click(
        target: &web_sys::Element,
        mut handler: impl FnMut() + 'static,
    ) -> Result<(), SiteError> {
        let closure = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            handler();
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Binds the menu button and every link in the panel; `Ok(None)` when either is missing.
    pub fn bind(
        document: &web_sys::Document,
        config: &SiteConfig,
    ) -> Result<Option<Rc<MobileMenu<web_sys::Element>>>, SiteError> {
        let button = document.get_element_by_id(&config.menu_toggle_id);
        let panel = document.query_selector(&config.menu_panel_selector)?;
        let (button, panel) = match (button, panel) {
            (Some(button), Some(panel)) => (button, panel),
            _ => {
                log::debug!("mobile menu markup missing; menu inert");
                return Ok(None);
            }
        };

        let links = panel.query_selector_all(&config.menu_link_selector)?;
        let menu = Rc::new(MobileMenu::new(button.clone(), panel));

        let for_button = menu.clone();
        on_click(&button, move || {
            for_button.toggle();
        })?;

        for index in 0..links.length() {
            let Some(link) = links
                .get(index)
                .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let for_link = menu.clone();
            on_click(&link, move || for_link.close())?;
        }

        Ok(Some(menu))
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::bind;
