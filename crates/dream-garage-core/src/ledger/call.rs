use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Marker for an in-progress call. Only the start time is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSession {
    started_at: DateTime<Utc>,
}

impl CallSession {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since the call started, never negative.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).max(Duration::zero())
    }
}
