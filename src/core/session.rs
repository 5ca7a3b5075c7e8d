//! Translation session controller
//!
//! Turns a stream of edit events into a minimal stream of translation requests
//! and folds the asynchronous responses back into displayable state.
//!
//! All mutation happens on one event loop (see `runtime`). The two suspension
//! points, the debounce timer and the network call, run as spawned tasks that
//! report back by sending a `SessionEvent` to that loop:
//!
//! - every edit cancels the armed timer and schedules a new one, so only an
//!   edit-free quiet period issues a request;
//! - every issued request carries a generation number; with
//!   `ResponseOrdering::LatestOnly` a response whose generation is no longer the
//!   latest is dropped, with `LastArrivalWins` it is applied regardless.

pub mod runtime;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::core::clipboard::{ClipboardWriter, Notifier};
use crate::core::features::clipboard::copy_translation;
use crate::core::features::keyboard;
use crate::core::features::translator::{TranslationBackend, TranslatorResult};
use crate::shared::emit::EventEmitter;
use crate::shared::error::AppResult;
use crate::shared::events::AppEvent;
use crate::shared::settings::SessionSettings;
use crate::shared::types::{Direction, ResponseOrdering, SessionSnapshot, TranslationRequest};

pub const INPUT_PLACEHOLDER: &str = "Введите текст";
pub const OUTPUT_PLACEHOLDER: &str = "Здесь будет перевод...";

/// The three user-visible fields of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub input_text: String,
    pub translated_text: String,
    pub direction: Direction,
}

/// Everything delivered to the session loop, from the front-end or from the
/// session's own timer and request tasks.
#[derive(Debug)]
pub enum SessionEvent {
    TextChanged(String),
    AppendCharacter(char),
    ToggleDirection,
    CopyRequested(Option<oneshot::Sender<AppResult<()>>>),
    Snapshot(oneshot::Sender<SessionSnapshot>),
    DebounceFired { token: u64 },
    TranslationSettled { generation: u64, outcome: TranslatorResult<String> },
    Shutdown,
}

/// External collaborators a session talks to.
#[derive(Clone)]
pub struct SessionServices {
    pub backend: Arc<dyn TranslationBackend>,
    pub clipboard: Arc<dyn ClipboardWriter>,
    pub notifier: Arc<dyn Notifier>,
    pub emitter: Arc<dyn EventEmitter>,
}

struct PendingDebounce {
    token: u64,
    handle: JoinHandle<()>,
}

pub struct TranslationSession {
    id: Uuid,
    state: SessionState,
    settings: SessionSettings,
    services: SessionServices,
    events: UnboundedSender<SessionEvent>,
    debounce: Option<PendingDebounce>,
    debounce_token: u64,
    /// Generation of the most recently issued request
    generation: u64,
    in_flight: u32,
}

impl TranslationSession {
    /// `events` must feed the loop that calls `handle` on this session.
    pub fn new(
        settings: SessionSettings,
        services: SessionServices,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self::with_state(SessionState::default(), settings, services, events)
    }

    pub fn with_state(
        state: SessionState,
        settings: SessionSettings,
        services: SessionServices,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        let id = Uuid::new_v4();
        log::debug!("[Session] Created {} ({:?})", id, settings.ordering);
        Self {
            id,
            state,
            settings,
            services,
            events,
            debounce: None,
            debounce_token: 0,
            generation: 0,
            in_flight: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn debounce_armed(&self) -> bool {
        self.debounce.is_some()
    }

    /// Apply one event. Returns `false` once the session should stop.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::TextChanged(text) => self.on_text_changed(text),
            SessionEvent::AppendCharacter(ch) => self.append_character(ch),
            SessionEvent::ToggleDirection => self.on_toggle_direction(),
            SessionEvent::CopyRequested(reply) => {
                let result = self.on_copy_requested();
                if let Some(reply) = reply {
                    let _ = reply.send(result);
                }
            }
            SessionEvent::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            SessionEvent::DebounceFired { token } => self.on_debounce_timer(token),
            SessionEvent::TranslationSettled { generation, outcome } => {
                self.on_translation_result(generation, outcome)
            }
            SessionEvent::Shutdown => {
                self.cancel_debounce();
                log::debug!("[Session] {} shutting down", self.id);
                return false;
            }
        }
        true
    }

    /// Replace the input and restart the quiet period.
    pub fn on_text_changed(&mut self, text: String) {
        self.state.input_text = text;
        self.arm_debounce();
        self.publish();
    }

    /// Picker key press: a text change with the key appended.
    pub fn append_character(&mut self, ch: char) {
        let mut text = self.state.input_text.clone();
        text.push(ch);
        self.on_text_changed(text);
    }

    /// Flip the direction and treat the previous output as the new input.
    pub fn on_toggle_direction(&mut self) {
        self.state.direction = self.state.direction.flipped();
        std::mem::swap(&mut self.state.input_text, &mut self.state.translated_text);
        log::debug!("[Session] Direction now {:?}", self.state.direction);
        self.arm_debounce();
        self.publish();
    }

    /// The quiet period elapsed: translate the current input, or clear the
    /// output if the input is blank.
    pub fn on_debounce_fire(&mut self) {
        self.cancel_debounce();

        if self.state.input_text.trim().is_empty() {
            // Outstanding responses belong to text that is gone now.
            self.generation += 1;
            self.state.translated_text.clear();
            log::debug!("[Session] Blank input, cleared output (generation {})", self.generation);
            self.publish();
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let request = TranslationRequest::new(
            self.state.input_text.clone(),
            self.state.direction,
            &self.settings.languages,
        );
        log::info!(
            "[Session] Issuing request #{} ({} -> {})",
            generation, request.source_language, request.target_language
        );

        self.in_flight += 1;
        let backend = Arc::clone(&self.services.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = backend.translate(&request).await;
            if events
                .send(SessionEvent::TranslationSettled { generation, outcome })
                .is_err()
            {
                log::debug!("[Session] Dropped result #{}: session closed", generation);
            }
        });

        self.publish();
    }

    /// Fold a settled request back into the output.
    pub fn on_translation_result(&mut self, generation: u64, outcome: TranslatorResult<String>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.settings.ordering == ResponseOrdering::LatestOnly && generation != self.generation {
            log::warn!(
                "[Session] Discarding stale response #{} (latest is #{})",
                generation, self.generation
            );
            self.services
                .emitter
                .emit(AppEvent::StaleResponseDiscarded { generation });
            self.publish();
            return;
        }

        match outcome {
            Ok(text) => {
                log::debug!("[Session] Applied response #{}", generation);
                self.state.translated_text = text;
            }
            Err(e) => {
                log::warn!("[Session] Request #{} failed: {}", generation, e);
                self.state.translated_text = e.display_marker().to_string();
            }
        }
        self.publish();
    }

    /// Copy the current output. Never changes session state.
    pub fn on_copy_requested(&self) -> AppResult<()> {
        copy_translation(
            self.services.clipboard.as_ref(),
            self.services.notifier.as_ref(),
            &self.state.translated_text,
        )?;
        self.services.emitter.emit(AppEvent::Copied);
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let direction = self.state.direction;
        let output_display = if self.state.translated_text.is_empty() {
            OUTPUT_PLACEHOLDER.to_string()
        } else {
            self.state.translated_text.clone()
        };

        SessionSnapshot {
            session_id: self.id.to_string(),
            input_text: self.state.input_text.clone(),
            translated_text: self.state.translated_text.clone(),
            direction,
            input_label: direction.source().display_name().to_string(),
            output_label: direction.target().display_name().to_string(),
            input_placeholder: INPUT_PLACEHOLDER.to_string(),
            output_display,
            picker_visible: keyboard::picker_visible(direction),
            debounce_armed: self.debounce.is_some(),
            requests_in_flight: self.in_flight,
            generation: self.generation,
        }
    }

    fn on_debounce_timer(&mut self, token: u64) {
        match &self.debounce {
            Some(pending) if pending.token == token => self.on_debounce_fire(),
            _ => log::debug!("[Session] Ignoring superseded timer {}", token),
        }
    }

    fn arm_debounce(&mut self) {
        self.cancel_debounce();

        self.debounce_token += 1;
        let token = self.debounce_token;
        let delay = Duration::from_millis(self.settings.debounce_ms);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::DebounceFired { token });
        });

        log::debug!("[Session] Armed timer {} ({:?})", token, delay);
        self.debounce = Some(PendingDebounce { token, handle });
    }

    fn cancel_debounce(&mut self) {
        if let Some(pending) = self.debounce.take() {
            pending.handle.abort();
        }
    }

    fn publish(&self) {
        self.services.emitter.emit(AppEvent::SessionUpdated(self.snapshot()));
    }
}

impl Drop for TranslationSession {
    fn drop(&mut self) {
        self.cancel_debounce();
    }
}
