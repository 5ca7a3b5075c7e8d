use serde::{Serialize, Deserialize};
use ts_rs::TS;
use super::types::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
#[ts(export, export_to = "events.ts")]
pub enum AppEvent {
    #[serde(rename = "session://updated")]
    SessionUpdated(SessionSnapshot),

    /// A response arrived for a request that is no longer the latest one
    #[serde(rename = "session://stale-discarded")]
    StaleResponseDiscarded {
        #[ts(type = "number")]
        generation: u64,
    },

    #[serde(rename = "clipboard://copied")]
    Copied,
}

impl AppEvent {
    /// Channel name the event is published under
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::SessionUpdated(_) => "session://updated",
            AppEvent::StaleResponseDiscarded { .. } => "session://stale-discarded",
            AppEvent::Copied => "clipboard://copied",
        }
    }
}
