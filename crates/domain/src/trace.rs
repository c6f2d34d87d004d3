use serde::Serialize;

/// Structured trace events emitted across all Parkline crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    SessionLookupCompleted {
        provider: String,
        authenticated: bool,
        duration_ms: u64,
    },
    SessionLookupFailed {
        provider: String,
        reason: String,
    },
    SessionLookupDiscarded {
        provider: String,
        events_seen: u64,
    },
    SessionChanged {
        provider: String,
        change: String,
        authenticated: bool,
    },
    MirrorSubscribed {
        subscriber_id: u64,
        subscribers: usize,
    },
    MirrorUnsubscribed {
        subscriber_id: u64,
        subscribers: usize,
    },
    TranslationFallback {
        locale: String,
        key: String,
        resolved: bool,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "pl_event");
    }
}
