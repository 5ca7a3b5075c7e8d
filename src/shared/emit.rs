use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;
use super::events::AppEvent;

/// Sink the session publishes its events to.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: AppEvent);
}

/// Forwards events to the presentation layer over an unbounded channel.
pub struct ChannelEmitter {
    tx: UnboundedSender<AppEvent>,
}

impl ChannelEmitter {
    pub fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventEmitter for ChannelEmitter {
    fn emit(&self, event: AppEvent) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            log::debug!("[Emit] No listener for {}", name);
        }
    }
}

/// Drops every event.
pub struct NoopEmitter;

impl EventEmitter for NoopEmitter {
    fn emit(&self, _event: AppEvent) {}
}

/// Keeps every event in memory, in order.
#[derive(Clone, Default)]
pub struct RecordingEmitter {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventEmitter for RecordingEmitter {
    fn emit(&self, event: AppEvent) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_emitter_forwards() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let emitter = ChannelEmitter::new(tx);
        emitter.emit(AppEvent::Copied);
        assert_eq!(rx.try_recv().unwrap(), AppEvent::Copied);
    }

    #[test]
    fn test_channel_emitter_survives_closed_receiver() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let emitter = ChannelEmitter::new(tx);
        emitter.emit(AppEvent::StaleResponseDiscarded { generation: 3 });
    }

    #[test]
    fn test_event_serializes_with_channel_name() {
        let json = serde_json::to_value(AppEvent::StaleResponseDiscarded { generation: 7 }).unwrap();
        assert_eq!(json["event"], "session://stale-discarded");
        assert_eq!(json["payload"]["generation"], 7);
    }
}
