//! Copy-to-clipboard feature
//!
//! Copies the current translation and confirms it to the user.

use crate::core::clipboard::{ClipboardWriter, Notifier};
use crate::shared::error::AppResult;

pub const COPY_NOTICE_TITLE: &str = "Скопировано";
pub const COPY_NOTICE_BODY: &str = "Текст перевода скопирован в буфер обмена.";

/// Write `text` to the clipboard and show the confirmation.
///
/// An empty translation is still written and still confirmed.
pub fn copy_translation(
    clipboard: &dyn ClipboardWriter,
    notifier: &dyn Notifier,
    text: &str,
) -> AppResult<()> {
    clipboard.set_text(text).map_err(|e| {
        log::warn!("[Clipboard] Copy failed: {}", e);
        e
    })?;
    log::debug!("[Clipboard] Copied {} chars", text.chars().count());
    notifier.notify(COPY_NOTICE_TITLE, COPY_NOTICE_BODY);
    Ok(())
}
