//! Clipboard and notification services
//!
//! The session only ever writes text to the clipboard and shows a short
//! confirmation. Both are traits so a front-end can supply its own platform
//! implementation and tests can observe what was written.

use std::sync::{Arc, Mutex};

use cli_clipboard::{ClipboardContext, ClipboardProvider};

use crate::shared::error::{AppError, AppResult};

pub trait ClipboardWriter: Send + Sync {
    fn set_text(&self, text: &str) -> AppResult<()>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// System clipboard, opened fresh for every write.
pub struct SystemClipboard;

impl SystemClipboard {
    /// Probe the platform clipboard once so a missing display is reported at startup.
    pub fn new() -> AppResult<Self> {
        ClipboardContext::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
        Ok(Self)
    }
}

impl ClipboardWriter for SystemClipboard {
    fn set_text(&self, text: &str) -> AppResult<()> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_string()))
            .map_err(|e| AppError::Clipboard(format!("Failed to write to clipboard: {}", e)))
    }
}

/// Process-local clipboard for headless environments.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        match self.contents.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn set_text(&self, text: &str) -> AppResult<()> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|e| AppError::Clipboard(format!("Mutex poisoned: {}", e)))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}

/// Shows notifications as log lines.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        log::info!("[Notify] {}: {}", title, body);
    }
}
