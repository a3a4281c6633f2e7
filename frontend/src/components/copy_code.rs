use log::debug;

use crate::config::CopyLabels;
use crate::ports::{Clipboard, Delay};

/// A highlighted code block together with its own copy button.
pub trait CodeBlock {
    fn code_text(&self) -> Option<String>;
    fn set_label(&self, label: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    NoCode,
    Failed,
}

/// Copies the block's code; on success flashes the "copied" label then restores it.
pub async fn copy_block<B, C, D>(
    block: &B,
    clipboard: &C,
    delay: &D,
    labels: &CopyLabels,
) -> CopyOutcome
where
    B: CodeBlock,
    C: Clipboard,
    D: Delay,
{
    let Some(text) = block.code_text() else {
        debug!("code block has no code element");
        return CopyOutcome::NoCode;
    };
    if let Err(err) = clipboard.write_text(&text).await {
        debug!("copy failed: {err}");
        return CopyOutcome::Failed;
    }
    block.set_label(&labels.copied);
    delay.sleep(labels.reset_after_ms).await;
    block.set_label(&labels.idle);
    CopyOutcome::Copied
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use futures::future::LocalBoxFuture;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use super::{copy_block, CodeBlock};
    use crate::config::SiteConfig;
    use crate::error::SiteError;
    use crate::ports::{Clipboard, Delay};

    pub struct NavigatorClipboard {
        navigator: web_sys::Navigator,
    }

    impl NavigatorClipboard {
        pub fn new(window: &web_sys::Window) -> Self {
            Self {
                navigator: window.navigator(),
            }
        }
    }

    impl Clipboard for NavigatorClipboard {
        fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), SiteError>> {
            let available = js_sys::Reflect::get(&self.navigator, &"clipboard".into())
                .map(|value| !value.is_undefined() && !value.is_null())
                .unwrap_or(false);
            if !available {
                return Box::pin(async { Err::<(), _>(SiteError::ClipboardUnavailable) });
            }
            let promise = self.navigator.clipboard().write_text(text);
            Box::pin(async move {
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| {
                        SiteError::ClipboardRejected(SiteError::js(&err).to_string())
                    })
            })
        }
    }

    pub struct TimeoutDelay;

    impl Delay for TimeoutDelay {
        fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
            Box::pin(gloo_timers::future::TimeoutFuture::new(millis))
        }
    }

    struct HighlightBlock {
        block: web_sys::Element,
        button: web_sys::Element,
        code_selector: String,
    }

    impl CodeBlock for HighlightBlock {
        fn code_text(&self) -> Option<String> {
            self.block
                .query_selector(&self.code_selector)
                .ok()
                .flatten()
                .map(|code| code.text_content().unwrap_or_default())
        }

        fn set_label(&self, label: &str) {
            self.button.set_text_content(Some(label));
        }
    }

    /// Appends a copy button to every code block currently on the page.
    pub fn bind(
        document: &web_sys::Document,
        window: &web_sys::Window,
        config: Rc<SiteConfig>,
    ) -> Result<u32, SiteError> {
        let blocks = document.query_selector_all(&config.code_block_selector)?;
        let clipboard = Rc::new(NavigatorClipboard::new(window));
        let mut bound = 0;

        for index in 0..blocks.length() {
            let Some(block) = blocks
                .get(index)
                .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let button = document.create_element("button")?;
            button.set_class_name(&config.copy_button_class);
            button.set_text_content(Some(&config.copy.idle));
            block.append_child(&button)?;

            let target = Rc::new(HighlightBlock {
                block,
                button: button.clone(),
                code_selector: config.code_selector.clone(),
            });
            let clipboard = clipboard.clone();
            let config = config.clone();
            let closure = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
                let target = target.clone();
                let clipboard = clipboard.clone();
                let config = config.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    copy_block(&*target, &*clipboard, &TimeoutDelay, &config.copy).await;
                });
            }) as Box<dyn FnMut(_)>);
            button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
            bound += 1;
        }

        Ok(bound)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::bind;
