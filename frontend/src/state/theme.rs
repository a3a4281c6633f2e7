use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::components::giscus::GiscusMessage;
use crate::components::theme_toggle::icon_for;
use crate::error::SiteError;
use crate::ports::{ColorScheme, CommentWidget, PreferenceStore, ThemeSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SiteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(SiteError::UnknownTheme(other.to_string())),
        }
    }
}

/// The theme a page asks for before the user has chosen one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredTheme {
    Fixed(Theme),
    Auto,
}

impl DeclaredTheme {
    pub const AUTO: &'static str = "auto";

    /// Reads the page-declared attribute; absent or unrecognised values fall back.
    pub fn from_attribute(value: Option<&str>, fallback: Theme) -> Self {
        match value {
            None => DeclaredTheme::Fixed(fallback),
            Some(Self::AUTO) => DeclaredTheme::Auto,
            Some(raw) => match raw.parse::<Theme>() {
                Ok(theme) => DeclaredTheme::Fixed(theme),
                Err(err) => {
                    warn!("ignoring declared theme: {err}; using {fallback}");
                    DeclaredTheme::Fixed(fallback)
                }
            },
        }
    }

    pub fn resolve(self, prefers_dark: impl FnOnce() -> bool) -> Theme {
        match self {
            DeclaredTheme::Fixed(theme) => theme,
            DeclaredTheme::Auto => Theme::from_prefers_dark(prefers_dark()),
        }
    }
}

/// Owns the applied theme and the persisted preference; the only writer of both.
pub struct ThemeState<P, S, W> {
    store: P,
    surface: S,
    widget: W,
    fallback: Theme,
}

impl<P, S, W> ThemeState<P, S, W>
where
    P: PreferenceStore,
    S: ThemeSurface,
    W: CommentWidget,
{
    pub fn new(store: P, surface: S, widget: W, fallback: Theme) -> Self {
        Self {
            store,
            surface,
            widget,
            fallback,
        }
    }

    pub fn stored_theme(&self) -> Option<Theme> {
        let raw = match self.store.load() {
            Ok(raw) => raw?,
            Err(err) => {
                debug!("theme preference unreadable: {err}");
                return None;
            }
        };
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(err) => {
                warn!("discarding stored preference: {err}");
                None
            }
        }
    }

    pub fn applied_theme(&self) -> Option<Theme> {
        self.surface.theme_attribute()?.parse().ok()
    }

    /// Applies, persists, refreshes the icon and notifies the widget, in that order.
    pub fn set_theme(&self, theme: Theme) {
        debug!("applying theme {theme}");
        self.surface.apply_theme(theme);
        if let Err(err) = self.store.save(theme.as_str()) {
            warn!("theme preference not saved: {err}");
        }
        self.surface.set_toggle_icon(icon_for(theme));
        self.post_to_widget(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = match self.applied_theme() {
            Some(Theme::Dark) => Theme::Light,
            _ => Theme::Dark,
        };
        self.set_theme(next);
        next
    }

    /// Resolves the first theme for this page load and applies it.
    pub fn init(&self, scheme: &impl ColorScheme) -> Theme {
        let theme = match self.stored_theme() {
            Some(stored) => stored,
            None => {
                let declared = self.surface.theme_attribute();
                DeclaredTheme::from_attribute(declared.as_deref(), self.fallback)
                    .resolve(|| scheme.prefers_dark())
            }
        };
        self.set_theme(theme);
        theme
    }

    /// OS preference changes only apply while the user has no stored choice.
    pub fn handle_system_change(&self, prefers_dark: bool) -> Option<Theme> {
        if self.stored_theme().is_some() {
            debug!("system theme change ignored: explicit preference stored");
            return None;
        }
        let theme = Theme::from_prefers_dark(prefers_dark);
        self.set_theme(theme);
        Some(theme)
    }

    pub fn refresh_icon(&self) -> bool {
        let theme = self.applied_theme().unwrap_or(self.fallback);
        self.surface.set_toggle_icon(icon_for(theme))
    }

    /// Sends the applied theme to the widget; `false` while the widget is absent.
    pub fn sync_widget(&self) -> bool {
        let theme = self.applied_theme().unwrap_or(self.fallback);
        self.post_to_widget(theme)
    }

    fn post_to_widget(&self, theme: Theme) -> bool {
        let posted = self.widget.post(&GiscusMessage::for_theme(theme));
        if !posted {
            debug!("comment widget not present; theme not forwarded");
        }
        posted
    }
}
