//! Test doubles shared by the session and runtime tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use super::{SessionEvent, SessionServices, SessionState, TranslationSession};
use crate::core::clipboard::{MemoryClipboard, Notifier};
use crate::core::features::translator::{TranslationBackend, TranslatorResult};
use crate::shared::emit::RecordingEmitter;
use crate::shared::settings::SessionSettings;
use crate::shared::types::{ResponseOrdering, TranslationRequest};

/// Backend that records requests and answers from a per-text script.
///
/// Unscripted text is answered immediately with `<text>`.
#[derive(Clone, Default)]
pub struct MockBackend {
    calls: Arc<Mutex<Vec<TranslationRequest>>>,
    script: Arc<Mutex<HashMap<String, (Duration, TranslatorResult<String>)>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, text: &str, delay: Duration, outcome: TranslatorResult<String>) {
        self.script
            .lock()
            .unwrap()
            .insert(text.to_string(), (delay, outcome));
    }

    pub fn calls(&self) -> Vec<TranslationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(&self, request: &TranslationRequest) -> TranslatorResult<String> {
        self.calls.lock().unwrap().push(request.clone());
        let scripted = self.script.lock().unwrap().get(&request.text).cloned();
        match scripted {
            Some((delay, outcome)) => {
                tokio::time::sleep(delay).await;
                outcome
            }
            None => Ok(format!("<{}>", request.text)),
        }
    }
}

#[derive(Clone, Default)]
pub struct CountingNotifier {
    shown: Arc<Mutex<Vec<(String, String)>>>,
}

impl CountingNotifier {
    pub fn count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
}

impl Notifier for CountingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

pub struct Doubles {
    pub backend: MockBackend,
    pub clipboard: MemoryClipboard,
    pub notifier: CountingNotifier,
    pub emitter: RecordingEmitter,
}

impl Doubles {
    pub fn new(backend: MockBackend) -> Self {
        Self {
            backend,
            clipboard: MemoryClipboard::new(),
            notifier: CountingNotifier::default(),
            emitter: RecordingEmitter::new(),
        }
    }

    pub fn services(&self) -> SessionServices {
        SessionServices {
            backend: Arc::new(self.backend.clone()),
            clipboard: Arc::new(self.clipboard.clone()),
            notifier: Arc::new(self.notifier.clone()),
            emitter: Arc::new(self.emitter.clone()),
        }
    }
}

pub fn settings(ordering: ResponseOrdering) -> SessionSettings {
    SessionSettings {
        ordering,
        ..SessionSettings::default()
    }
}

/// A session driven by hand, without the event loop.
pub struct Harness {
    pub session: TranslationSession,
    pub backend: MockBackend,
    pub clipboard: MemoryClipboard,
    pub notifier: CountingNotifier,
    pub emitter: RecordingEmitter,
    _events: UnboundedReceiver<SessionEvent>,
}

impl Harness {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self::build(ordering, SessionState::default(), MockBackend::new())
    }

    pub fn with_state(ordering: ResponseOrdering, state: SessionState) -> Self {
        Self::build(ordering, state, MockBackend::new())
    }

    pub fn with_backend(ordering: ResponseOrdering, backend: MockBackend) -> Self {
        Self::build(ordering, SessionState::default(), backend)
    }

    fn build(ordering: ResponseOrdering, state: SessionState, backend: MockBackend) -> Self {
        let doubles = Doubles::new(backend);
        let (tx, rx) = unbounded_channel();
        let session = TranslationSession::with_state(state, settings(ordering), doubles.services(), tx);
        Self {
            session,
            backend: doubles.backend,
            clipboard: doubles.clipboard,
            notifier: doubles.notifier,
            emitter: doubles.emitter,
            _events: rx,
        }
    }
}

/// Let spawned tasks make progress on the current-thread runtime.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
