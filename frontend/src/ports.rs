//! Small capability traits over the browser APIs this crate touches.
//!
//! Controllers only talk to these traits, so theme resolution, menu state and
//! the copy flow run unchanged against the real DOM or against in-memory fakes.

use futures::future::LocalBoxFuture;

use crate::components::giscus::GiscusMessage;
use crate::error::SiteError;
use crate::state::theme::Theme;

/// Durable key-value slot holding the user's explicit theme choice.
pub trait PreferenceStore {
    fn load(&self) -> Result<Option<String>, SiteError>;
    fn save(&self, value: &str) -> Result<(), SiteError>;
}

/// The document root attribute plus the toggle button icon.
pub trait ThemeSurface {
    /// Raw value of the root theme attribute, if any.
    fn theme_attribute(&self) -> Option<String>;
    fn apply_theme(&self, theme: Theme);
    /// Returns `false` when the toggle button is not on the page.
    fn set_toggle_icon(&self, markup: &str) -> bool;
}

/// The embedded comment widget.
pub trait CommentWidget {
    /// Returns `false` when the widget frame is not on the page yet.
    fn post(&self, message: &GiscusMessage) -> bool;
}

pub trait ColorScheme {
    fn prefers_dark(&self) -> bool;
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), SiteError>>;
}

pub trait Delay {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()>;
}
