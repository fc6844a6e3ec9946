use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One join/leave span of a participant, as reported by the meeting provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEvent {
    /// Backend-assigned participant id. Opaque to this crate.
    pub participant_id: i64,
    pub name: String,
    pub join_time: DateTime<Utc>,
    /// `None` while the connection is still open.
    pub leave_time: Option<DateTime<Utc>>,
    /// Provider-reported duration in seconds, when present.
    #[serde(default, rename = "duration")]
    pub duration_seconds: Option<i64>,
}

impl ConnectionEvent {
    /// Connected seconds for this span, never negative.
    ///
    /// Falls back to `leave_time - join_time` when the provider sent no
    /// duration; an open connection without a duration counts for nothing.
    pub fn seconds(&self) -> i64 {
        let raw = match (self.duration_seconds, self.leave_time) {
            (Some(secs), _) => secs,
            (None, Some(leave)) => (leave - self.join_time).num_seconds(),
            (None, None) => 0,
        };
        raw.max(0)
    }

    pub fn minutes(&self) -> i64 {
        self.seconds() / 60
    }
}

/// One row per distinct display name within a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedParticipant {
    pub id: i64,
    pub name: String,
    pub total_seconds: i64,
    pub duration_minutes: i64,
    pub first_join: Option<DateTime<Utc>>,
    pub last_leave: Option<DateTime<Utc>>,
    /// Value persisted by an earlier save. `Some(0)` means "reviewed as zero".
    pub saved_value: Option<u32>,
}

/// Column used to order the participant table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Duration,
}
