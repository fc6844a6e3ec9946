use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Question asked at the start of meetings to count people behind a screen.
pub const DEFAULT_ATTENDANCE_QUESTION: &str =
    "Combien de personnes sont présentes avec vous (y compris vous) ?";

/// A single answer given by a participant to an in-meeting poll question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollAnswer {
    pub participant_name: String,
    pub question: String,
    pub answer: String,
    /// Provider timestamp, kept verbatim.
    pub answered_at: Option<String>,
}

/// Build the name -> answer lookup for the head-count question.
///
/// Other questions are ignored. When a name answered more than once (e.g. from
/// two connections), the last answer in the list wins.
pub fn attendance_answers(answers: &[PollAnswer], question: &str) -> HashMap<String, String> {
    answers
        .iter()
        .filter(|a| a.question == question)
        .map(|a| (a.participant_name.clone(), a.answer.clone()))
        .collect()
}
