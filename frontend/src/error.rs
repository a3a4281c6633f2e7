use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no {0} element")]
    MissingElement(&'static str),
    #[error("localStorage is unavailable")]
    StorageUnavailable,
    #[error("navigator.clipboard is unavailable")]
    ClipboardUnavailable,
    #[error("clipboard write rejected: {0}")]
    ClipboardRejected(String),
    #[error("invalid site config: {0}")]
    Config(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl SiteError {
    pub fn js(value: &JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| "unknown".to_string());
        SiteError::Js(message)
    }
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::js(&value)
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(error: serde_json::Error) -> Self {
        SiteError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            SiteError::UnknownTheme("sepia".into()).to_string(),
            "unknown theme `sepia`"
        );
        assert_eq!(
            SiteError::MissingElement("body").to_string(),
            "document has no body element"
        );
    }

    #[test]
    fn serde_errors_become_config_errors() {
        let err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert!(matches!(SiteError::from(err), SiteError::Config(_)));
    }
}
