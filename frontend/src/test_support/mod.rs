//! In-memory stand-ins for the browser capability ports.

use futures::future::{self, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::components::giscus::GiscusMessage;
use crate::error::SiteError;
use crate::ports::{Clipboard, ColorScheme, CommentWidget, Delay, PreferenceStore, ThemeSurface};
use crate::state::theme::{Theme, ThemeState};

pub type EventLog = Rc<RefCell<Vec<String>>>;

#[derive(Clone, Default)]
pub struct FakeStore {
    value: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
    events: EventLog,
}

impl FakeStore {
    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_string());
    }

    pub fn fail_writes(&self) {
        self.fail_writes.set(true);
    }
}

impl PreferenceStore for FakeStore {
    fn load(&self) -> Result<Option<String>, SiteError> {
        Ok(self.value())
    }

    fn save(&self, value: &str) -> Result<(), SiteError> {
        if self.fail_writes.get() {
            return Err(SiteError::StorageUnavailable);
        }
        self.events.borrow_mut().push(format!("save:{value}"));
        self.set_value(value);
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeSurface {
    attribute: Rc<RefCell<Option<String>>>,
    icon: Rc<RefCell<Option<String>>>,
    has_button: Rc<Cell<bool>>,
    events: EventLog,
}

impl FakeSurface {
    pub fn new(declared: Option<&str>) -> Self {
        Self {
            attribute: Rc::new(RefCell::new(declared.map(String::from))),
            icon: Rc::default(),
            has_button: Rc::new(Cell::new(true)),
            events: EventLog::default(),
        }
    }

    pub fn attribute(&self) -> Option<String> {
        self.attribute.borrow().clone()
    }

    pub fn set_attribute(&self, value: &str) {
        *self.attribute.borrow_mut() = Some(value.to_string());
    }

    pub fn icon(&self) -> Option<String> {
        self.icon.borrow().clone()
    }

    pub fn remove_button(&self) {
        self.has_button.set(false);
    }
}

impl ThemeSurface for FakeSurface {
    fn theme_attribute(&self) -> Option<String> {
        self.attribute()
    }

    fn apply_theme(&self, theme: Theme) {
        self.events.borrow_mut().push(format!("apply:{theme}"));
        self.set_attribute(theme.as_str());
    }

    fn set_toggle_icon(&self, markup: &str) -> bool {
        if !self.has_button.get() {
            return false;
        }
        self.events.borrow_mut().push("icon".to_string());
        *self.icon.borrow_mut() = Some(markup.to_string());
        true
    }
}

#[derive(Clone, Default)]
pub struct FakeWidget {
    present: Rc<Cell<bool>>,
    sent: Rc<RefCell<Vec<serde_json::Value>>>,
    events: EventLog,
}

impl FakeWidget {
    pub fn set_present(&self, present: bool) {
        self.present.set(present);
    }

    pub fn sent(&self) -> Vec<serde_json::Value> {
        self.sent.borrow().clone()
    }

    pub fn themes(&self) -> Vec<String> {
        self.sent()
            .iter()
            .filter_map(|m| m["giscus"]["setConfig"]["theme"].as_str().map(String::from))
            .collect()
    }
}

impl CommentWidget for FakeWidget {
    fn post(&self, message: &GiscusMessage) -> bool {
        if !self.present.get() {
            return false;
        }
        self.events
            .borrow_mut()
            .push(format!("widget:{}", message.theme()));
        let value = serde_json::to_value(message).unwrap_or_default();
        self.sent.borrow_mut().push(value);
        true
    }
}

pub struct FixedScheme(pub bool);

impl ColorScheme for FixedScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

pub struct Harness {
    pub state: ThemeState<FakeStore, FakeSurface, FakeWidget>,
    pub store: FakeStore,
    pub surface: FakeSurface,
    pub widget: FakeWidget,
    events: EventLog,
}

impl Harness {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

/// Builds a theme state with an optional stored value and declared attribute.
pub fn harness(stored: Option<&str>, declared: Option<&str>) -> Harness {
    let events = EventLog::default();
    let store = FakeStore {
        events: events.clone(),
        ..FakeStore::default()
    };
    if let Some(value) = stored {
        store.set_value(value);
    }
    let surface = FakeSurface {
        events: events.clone(),
        ..FakeSurface::new(declared)
    };
    let widget = FakeWidget {
        events: events.clone(),
        ..FakeWidget::default()
    };
    let state = ThemeState::new(store.clone(), surface.clone(), widget.clone(), Theme::Dark);
    Harness {
        state,
        store,
        surface,
        widget,
        events,
    }
}

/// Clipboard that records writes and resolves immediately.
#[derive(Clone, Default)]
pub struct FakeClipboard {
    written: Rc<RefCell<Vec<String>>>,
    reject: Rc<Cell<bool>>,
}

impl FakeClipboard {
    pub fn rejecting() -> Self {
        let clipboard = Self::default();
        clipboard.reject.set(true);
        clipboard
    }

    pub fn written(&self) -> Vec<String> {
        self.written.borrow().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), SiteError>> {
        if self.reject.get() {
            return Box::pin(future::ready(Err::<(), _>(
                SiteError::ClipboardRejected("NotAllowedError".into()),
            )));
        }
        self.written.borrow_mut().push(text.to_string());
        Box::pin(future::ready(Ok::<(), SiteError>(())))
    }
}

/// Delay that completes immediately and remembers what it was asked for.
#[derive(Clone, Default)]
pub struct FakeDelay {
    requested: Rc<RefCell<Vec<u32>>>,
}

impl FakeDelay {
    pub fn requested(&self) -> Vec<u32> {
        self.requested.borrow().clone()
    }
}

impl Delay for FakeDelay {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
        self.requested.borrow_mut().push(millis);
        Box::pin(future::ready(()))
    }
}
