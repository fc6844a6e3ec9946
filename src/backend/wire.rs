//! Payloads the backend relays from the provider unchanged.

use serde::Deserialize;

use crate::models::poll::PollAnswer;

#[derive(Debug, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub participants: Vec<PollParticipant>,
}

#[derive(Debug, Deserialize)]
pub struct PollParticipant {
    pub name: String,
    #[serde(default)]
    pub question_details: Vec<PollQuestionDetail>,
}

#[derive(Debug, Deserialize)]
pub struct PollQuestionDetail {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub date_time: Option<String>,
}

impl PollResponse {
    pub fn into_answers(self) -> Vec<PollAnswer> {
        self.participants
            .into_iter()
            .flat_map(|p| {
                let name = p.name;
                p.question_details.into_iter().map(move |d| PollAnswer {
                    participant_name: name.clone(),
                    question: d.question,
                    answer: d.answer,
                    answered_at: d.date_time,
                })
            })
            .collect()
    }
}
