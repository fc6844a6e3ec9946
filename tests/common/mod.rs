//! Shared test infrastructure: an in-memory meeting backend.
//!
//! # Fixtures
//! - `FakeBackend` - implements `MeetingBackend` over plain maps
//! - `span()` / `poll()` - build connection events and poll answers
//! - `seeded_backend()` - meeting 10 with a typical mix of participants
//! - `FakeBackend::hold_next_fetch` - park a load mid-flight to overlap requests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Notify;

use attendance_review::auth::BearerToken;
use attendance_review::backend::{BackendError, MeetingBackend, Result};
use attendance_review::models::attendance::{MeetingAttendanceSummary, SavedAttendance};
use attendance_review::models::meeting::MeetingListItem;
use attendance_review::models::participant::ConnectionEvent;
use attendance_review::models::poll::{PollAnswer, DEFAULT_ATTENDANCE_QUESTION};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const MEETING_ID: i64 = 10;
pub const TOKEN: &str = "test-token";

// ============================================================================
// FIXTURES
// ============================================================================

pub fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 4, 18, 0, 0).unwrap() + Duration::minutes(minute)
}

/// Connection of `name` from minute `from` to minute `to`.
pub fn span(id: i64, name: &str, from: i64, to: i64) -> ConnectionEvent {
    ConnectionEvent {
        participant_id: id,
        name: name.to_string(),
        join_time: at(from),
        leave_time: Some(at(to)),
        duration_seconds: Some((to - from) * 60),
    }
}

pub fn poll(name: &str, answer: &str) -> PollAnswer {
    PollAnswer {
        participant_name: name.to_string(),
        question: DEFAULT_ATTENDANCE_QUESTION.to_string(),
        answer: answer.to_string(),
        answered_at: None,
    }
}

// ============================================================================
// FAKE BACKEND
// ============================================================================

#[derive(Default)]
pub struct FakeBackend {
    pub meetings: Mutex<Vec<MeetingListItem>>,
    pub events: Mutex<HashMap<i64, Vec<ConnectionEvent>>>,
    /// What the provider returns on the next refresh.
    pub provider_events: Mutex<HashMap<i64, Vec<ConnectionEvent>>>,
    pub polls: Mutex<HashMap<i64, Vec<PollAnswer>>>,
    pub saved: Mutex<HashMap<i64, SavedAttendance>>,
    pub fail_polls: AtomicBool,
    pub fail_all: AtomicBool,
    pub save_calls: AtomicUsize,
    pub tokens: Mutex<Vec<Option<String>>>,
    /// When set, the next connection fetch signals `fetch_parked` and waits
    /// for `release` before answering.
    pub hold_next_fetch: AtomicBool,
    pub fetch_parked: Notify,
    pub release: Notify,
}

impl FakeBackend {
    fn record(&self, auth: &BearerToken) -> Result<()> {
        self.tokens.lock().unwrap().push(auth.as_str().map(String::from));
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 503,
                message: "provider down".to_string(),
            });
        }
        Ok(())
    }

    pub fn saved_for(&self, meeting_id: i64) -> Option<SavedAttendance> {
        self.saved.lock().unwrap().get(&meeting_id).cloned()
    }
}

#[async_trait]
impl MeetingBackend for FakeBackend {
    async fn list_meetings(&self, auth: &BearerToken) -> Result<Vec<MeetingListItem>> {
        self.record(auth)?;
        Ok(self.meetings.lock().unwrap().clone())
    }

    async fn fetch_connection_events(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<ConnectionEvent>> {
        if self.hold_next_fetch.swap(false, Ordering::SeqCst) {
            self.fetch_parked.notify_one();
            self.release.notified().await;
        }
        self.record(auth)?;
        self.events
            .lock()
            .unwrap()
            .get(&meeting_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("/meetings/{meeting_id}/connections")))
    }

    async fn refresh_connection_events(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<ConnectionEvent>> {
        self.record(auth)?;
        if let Some(fresh) = self.provider_events.lock().unwrap().remove(&meeting_id) {
            self.events.lock().unwrap().insert(meeting_id, fresh);
        }
        self.fetch_connection_events(auth, meeting_id).await
    }

    async fn fetch_poll_answers(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<PollAnswer>> {
        self.record(auth)?;
        if self.fail_polls.load(Ordering::SeqCst) {
            return Err(BackendError::InvalidResponse("poll payload".to_string()));
        }
        Ok(self.polls.lock().unwrap().get(&meeting_id).cloned().unwrap_or_default())
    }

    async fn fetch_saved_attendance(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<SavedAttendance> {
        self.record(auth)?;
        Ok(self.saved_for(meeting_id).unwrap_or_default())
    }

    async fn save_attendance_summary(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
        summary: &MeetingAttendanceSummary,
    ) -> Result<()> {
        self.record(auth)?;
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.saved.lock().unwrap().insert(meeting_id, summary.clone().into());
        Ok(())
    }
}

/// Meeting 10: Jean reconnects once, a family account, the room tablet, a
/// reception desk and a poll answer for Claire.
pub fn seeded_backend() -> FakeBackend {
    let backend = FakeBackend::default();
    backend.events.lock().unwrap().insert(
        MEETING_ID,
        vec![
            span(1, "Jean", 0, 15),
            span(2, "Famille Dupont (3)", 0, 60),
            span(3, "Mons Assemblee", 0, 90),
            span(4, "Claire", 5, 50),
            span(5, "Jean", 20, 30),
            span(6, "Accueil Hôtel de Ville", 0, 90),
        ],
    );
    backend
        .polls
        .lock()
        .unwrap()
        .insert(MEETING_ID, vec![poll("Claire", "2"), poll("Mons Assemblee", "9")]);
    backend
}
