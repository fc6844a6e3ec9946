use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use thiserror::Error;

use crate::auth::BearerToken;
use crate::backend::{MeetingBackend, Result};
use crate::models::attendance::{
    self, InputError, MeetingAttendanceSummary, SavedAttendance, parse_attendance_value,
    parse_in_person_total,
};
use crate::models::participant::{aggregate, AggregatedParticipant, ConnectionEvent, SortKey};
use crate::models::poll::{attendance_answers, PollAnswer};

use super::view::{ParticipantRow, ReviewView};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("No participant {0} in this meeting")]
    UnknownParticipant(i64),
    #[error(transparent)]
    Invalid(#[from] InputError),
}

/// One operator reviewing one meeting.
///
/// Holds the aggregated participants, the attendance poll lookup and the
/// values being edited. Nothing here is persisted until [`ReviewSession::save`].
#[derive(Debug, Clone)]
pub struct ReviewSession {
    meeting_id: i64,
    participants: Vec<AggregatedParticipant>,
    poll_answers: HashMap<String, String>,
    values: BTreeMap<i64, u32>,
    in_person_total: u32,
}

impl ReviewSession {
    /// Aggregate raw data and propose a value for every participant.
    /// Saved values take precedence over inference.
    pub fn build(
        meeting_id: i64,
        events: &[ConnectionEvent],
        answers: &[PollAnswer],
        question: &str,
        saved: SavedAttendance,
    ) -> Self {
        let mut participants = aggregate(events);
        for p in &mut participants {
            p.saved_value = saved.values.get(&p.id).copied();
        }

        let poll_answers = attendance_answers(answers, question);
        let values = participants
            .iter()
            .map(|p| (p.id, attendance::propose(p, &poll_answers)))
            .collect();

        ReviewSession {
            meeting_id,
            participants,
            poll_answers,
            values,
            in_person_total: saved.in_person_total.unwrap_or(0),
        }
    }

    /// Fetch everything the review needs from the backend.
    ///
    /// A failing poll fetch only loses the poll hints; the other fetches
    /// abort the load.
    pub async fn load(
        backend: &dyn MeetingBackend,
        auth: &BearerToken,
        meeting_id: i64,
        question: &str,
    ) -> Result<Self> {
        let events = backend.fetch_connection_events(auth, meeting_id).await?;
        Self::assemble(backend, auth, meeting_id, question, events).await
    }

    /// Discard every held value and rebuild from a fresh provider pull.
    /// Unsaved edits are lost; saved values survive.
    pub async fn refresh(
        backend: &dyn MeetingBackend,
        auth: &BearerToken,
        meeting_id: i64,
        question: &str,
    ) -> Result<Self> {
        let events = backend.refresh_connection_events(auth, meeting_id).await?;
        Self::assemble(backend, auth, meeting_id, question, events).await
    }

    async fn assemble(
        backend: &dyn MeetingBackend,
        auth: &BearerToken,
        meeting_id: i64,
        question: &str,
        events: Vec<ConnectionEvent>,
    ) -> Result<Self> {
        let answers = match backend.fetch_poll_answers(auth, meeting_id).await {
            Ok(answers) => answers,
            Err(e) => {
                log::warn!(
                    "Meeting {meeting_id}: poll answers unavailable ({e}), continuing without"
                );
                Vec::new()
            }
        };
        let saved = backend.fetch_saved_attendance(auth, meeting_id).await?;

        let session = Self::build(meeting_id, &events, &answers, question, saved);
        log::info!(
            "Meeting {}: {} connection(s) -> {} participant(s), {} poll answer(s)",
            meeting_id,
            events.len(),
            session.participants.len(),
            session.poll_answers.len()
        );
        Ok(session)
    }

    pub fn meeting_id(&self) -> i64 {
        self.meeting_id
    }

    pub fn participants(&self) -> &[AggregatedParticipant] {
        &self.participants
    }

    pub fn value_of(&self, participant_id: i64) -> Option<u32> {
        self.values.get(&participant_id).copied()
    }

    pub fn in_person_total(&self) -> u32 {
        self.in_person_total
    }

    pub fn has_attendance_poll(&self) -> bool {
        !self.poll_answers.is_empty()
    }

    /// Replace one participant's value. On rejection the old value stays.
    pub fn set_value(
        &mut self,
        participant_id: i64,
        raw: &Value,
    ) -> std::result::Result<u32, EditError> {
        let value = parse_attendance_value(raw)?;
        let slot = self
            .values
            .get_mut(&participant_id)
            .ok_or(EditError::UnknownParticipant(participant_id))?;
        *slot = value;
        Ok(value)
    }

    pub fn set_in_person(&mut self, raw: &Value) -> std::result::Result<u32, InputError> {
        let value = parse_in_person_total(raw)?;
        self.in_person_total = value;
        Ok(value)
    }

    pub fn remote_total(&self) -> u64 {
        attendance::remote_total(&self.values)
    }

    /// Snapshot of every held value, touched or not.
    pub fn summary(&self) -> MeetingAttendanceSummary {
        MeetingAttendanceSummary::new(self.values.clone(), self.in_person_total)
    }

    /// Record that `summary` is now what the backend holds.
    pub fn mark_saved(&mut self, summary: &MeetingAttendanceSummary) {
        for p in &mut self.participants {
            if let Some(&value) = summary.values.get(&p.id) {
                p.saved_value = Some(value);
            }
        }
    }

    /// Write the whole summary in one request.
    pub async fn save(
        &mut self,
        backend: &dyn MeetingBackend,
        auth: &BearerToken,
    ) -> Result<MeetingAttendanceSummary> {
        let summary = self.summary();
        backend.save_attendance_summary(auth, self.meeting_id, &summary).await?;
        self.mark_saved(&summary);
        log::info!(
            "Meeting {}: attendance saved (remote {}, in person {})",
            self.meeting_id,
            summary.remote_total,
            summary.in_person_total
        );
        Ok(summary)
    }

    pub fn view(&self, sort: SortKey) -> ReviewView {
        let mut participants = self.participants.clone();
        crate::models::participant::sort_participants(&mut participants, sort);

        let rows = participants
            .into_iter()
            .map(|p| ParticipantRow {
                value: self.values.get(&p.id).copied().unwrap_or(attendance::DEFAULT_ATTENDANCE),
                poll_answer: self.poll_answers.get(&p.name).cloned(),
                id: p.id,
                name: p.name,
                duration_minutes: p.duration_minutes,
                first_join: p.first_join,
                last_leave: p.last_leave,
                saved_value: p.saved_value,
            })
            .collect();

        ReviewView {
            meeting_id: self.meeting_id,
            participants: rows,
            remote_total: self.remote_total(),
            in_person_total: self.in_person_total,
            has_attendance_poll: self.has_attendance_poll(),
        }
    }
}
