//! Boundary to the backend that proxies the video-conferencing provider and
//! owns persisted attendance.

pub mod client;
pub mod error;
pub mod wire;

use async_trait::async_trait;

use crate::auth::BearerToken;
use crate::models::attendance::{MeetingAttendanceSummary, SavedAttendance};
use crate::models::meeting::MeetingListItem;
use crate::models::participant::ConnectionEvent;
use crate::models::poll::PollAnswer;

pub use client::{BackendClient, BackendConfig};
pub use error::{BackendError, Result};

/// Operations the review core needs from the meeting-data backend.
///
/// Calls are independent; nothing here retries.
#[async_trait]
pub trait MeetingBackend: Send + Sync {
    async fn list_meetings(&self, auth: &BearerToken) -> Result<Vec<MeetingListItem>>;

    /// Raw join/leave spans as currently stored by the backend.
    async fn fetch_connection_events(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<ConnectionEvent>>;

    /// Ask the backend to pull spans from the provider again, then return them.
    async fn refresh_connection_events(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<ConnectionEvent>>;

    /// Every poll answer of the meeting; empty when no poll was run.
    async fn fetch_poll_answers(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<PollAnswer>>;

    async fn fetch_saved_attendance(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<SavedAttendance>;

    /// Atomic overwrite of the meeting's attendance summary.
    async fn save_attendance_summary(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
        summary: &MeetingAttendanceSummary,
    ) -> Result<()>;
}
