use web_sys::{Storage, Window};

use crate::error::SiteError;
use crate::ports::PreferenceStore;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn local_storage() -> Result<Storage, SiteError> {
    window()?
        .local_storage()
        .map_err(|_| SiteError::StorageUnavailable)?
        .ok_or(SiteError::StorageUnavailable)
}

/// Theme preference kept in `localStorage` under a single key.
pub struct LocalStoragePreferences {
    key: String,
}

impl LocalStoragePreferences {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn load(&self) -> Result<Option<String>, SiteError> {
        local_storage()?
            .get_item(&self.key)
            .map_err(|_| SiteError::StorageUnavailable)
    }

    fn save(&self, value: &str) -> Result<(), SiteError> {
        local_storage()?
            .set_item(&self.key, value)
            .map_err(|_| SiteError::StorageUnavailable)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn round_trips_through_local_storage() {
        let prefs = LocalStoragePreferences::new("site-theme-test");
        local_storage().unwrap().remove_item("site-theme-test").unwrap();
        assert_eq!(prefs.load().unwrap(), None);

        prefs.save("light").unwrap();
        assert_eq!(prefs.load().unwrap().as_deref(), Some("light"));
        local_storage().unwrap().remove_item("site-theme-test").unwrap();
    }
}
