use chrono::{DateTime, Utc};
use serde::Serialize;

/// Review table as returned to the browser.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub meeting_id: i64,
    pub participants: Vec<ParticipantRow>,
    pub remote_total: u64,
    pub in_person_total: u32,
    pub has_attendance_poll: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    pub id: i64,
    pub name: String,
    pub duration_minutes: i64,
    pub first_join: Option<DateTime<Utc>>,
    pub last_leave: Option<DateTime<Utc>>,
    pub saved_value: Option<u32>,
    /// Value currently held in the session.
    pub value: u32,
    pub poll_answer: Option<String>,
}
