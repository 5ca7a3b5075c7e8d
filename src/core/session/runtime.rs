//! Event loop that owns a `TranslationSession`
//!
//! The session is moved into a single task; front-ends talk to it through a
//! cloneable `SessionHandle`. Timer fires and request completions arrive on the
//! same channel, so every mutation is applied in order on that one task.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::{SessionEvent, SessionServices, SessionState, TranslationSession};
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::SessionSettings;
use crate::shared::types::SessionSnapshot;

#[derive(Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<SessionEvent>,
}

/// Start a session with empty state on the current tokio runtime.
pub fn spawn_session(
    settings: SessionSettings,
    services: SessionServices,
) -> (SessionHandle, JoinHandle<()>) {
    spawn_session_with_state(SessionState::default(), settings, services)
}

pub fn spawn_session_with_state(
    state: SessionState,
    settings: SessionSettings,
    services: SessionServices,
) -> (SessionHandle, JoinHandle<()>) {
    let (tx, rx) = unbounded_channel();
    let session = TranslationSession::with_state(state, settings, services, tx.clone());
    log::info!("[Session] Started {}", session.id());
    let task = tokio::spawn(run(session, rx));
    (SessionHandle { tx }, task)
}

async fn run(mut session: TranslationSession, mut rx: UnboundedReceiver<SessionEvent>) {
    while let Some(event) = rx.recv().await {
        if !session.handle(event) {
            break;
        }
    }
    log::info!("[Session] Stopped {}", session.id());
}

impl SessionHandle {
    fn send(&self, event: SessionEvent) -> AppResult<()> {
        self.tx
            .send(event)
            .map_err(|_| AppError::System("Translation session is closed".to_string()))
    }

    pub fn text_changed(&self, text: impl Into<String>) -> AppResult<()> {
        self.send(SessionEvent::TextChanged(text.into()))
    }

    pub fn append_character(&self, ch: char) -> AppResult<()> {
        self.send(SessionEvent::AppendCharacter(ch))
    }

    pub fn toggle_direction(&self) -> AppResult<()> {
        self.send(SessionEvent::ToggleDirection)
    }

    /// Copy the current translation and wait for the clipboard result.
    pub async fn copy(&self) -> AppResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionEvent::CopyRequested(Some(reply)))?;
        rx.await
            .map_err(|_| AppError::System("Translation session dropped copy request".to_string()))?
    }

    pub async fn snapshot(&self) -> AppResult<SessionSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionEvent::Snapshot(reply))?;
        rx.await
            .map_err(|_| AppError::System("Translation session dropped snapshot request".to_string()))
    }

    pub fn shutdown(&self) -> AppResult<()> {
        self.send(SessionEvent::Shutdown)
    }
}
