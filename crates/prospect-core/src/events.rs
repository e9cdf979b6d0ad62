use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::SessionPhase;
use crate::state::Find;

/// Every state change of a session produces an Event.
/// Hosts print or forward them; the runner streams them over a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        at: DateTime<Utc>,
    },
    /// Started again from Paused; accumulated state is kept.
    SessionResumed {
        attempts_count: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        attempts_count: u64,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    FindRecorded {
        find: Find,
        total_value: f64,
    },
    StateSnapshot {
        phase: SessionPhase,
        running: bool,
        attempts_count: u64,
        find_count: usize,
        total_value: f64,
        started_at: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
}
