use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::participant::AggregatedParticipant;

/// Value proposed when no rule has anything better to say.
pub const DEFAULT_ATTENDANCE: u32 = 1;

/// Room and reception-desk connections that never count as people.
const EXCLUDED_NAMES: [&str; 2] = ["Mons Assemblee", "tablette pupitre"];
const EXCLUDED_FRAGMENT: &str = "accueil";

static COUNT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9]+)\)$").expect("static pattern"));

/// One step of the attendance inference. Returns `Some` to claim the decision.
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(name: &str, poll_answer: Option<&str>) -> Option<u32>,
}

/// Evaluated top to bottom; the first rule returning a value wins.
pub static RULES: [Rule; 4] = [
    Rule { name: "excluded-name", apply: excluded_name },
    Rule { name: "poll-answer", apply: poll_answer },
    Rule { name: "name-suffix", apply: name_suffix },
    Rule { name: "default", apply: default_value },
];

fn excluded_name(name: &str, _: Option<&str>) -> Option<u32> {
    let excluded =
        EXCLUDED_NAMES.contains(&name) || name.to_lowercase().contains(EXCLUDED_FRAGMENT);
    excluded.then_some(0)
}

/// Only the first character is read: "12" proposes 1.
fn poll_answer(_: &str, answer: Option<&str>) -> Option<u32> {
    answer?.chars().next()?.to_digit(10)
}

fn name_suffix(name: &str, _: Option<&str>) -> Option<u32> {
    COUNT_SUFFIX.captures(name)?.get(1)?.as_str().parse().ok()
}

fn default_value(_: &str, _: Option<&str>) -> Option<u32> {
    Some(DEFAULT_ATTENDANCE)
}

/// Propose an attendance value from a display name and optional poll answer.
pub fn resolve_name(name: &str, poll_answer: Option<&str>) -> u32 {
    RULES
        .iter()
        .find_map(|rule| {
            let value = (rule.apply)(name, poll_answer)?;
            log::trace!("{name}: rule {} -> {value}", rule.name);
            Some(value)
        })
        .unwrap_or(DEFAULT_ATTENDANCE)
}

pub fn resolve(participant: &AggregatedParticipant, poll_answer: Option<&str>) -> u32 {
    resolve_name(&participant.name, poll_answer)
}

/// Starting value shown to the operator: the saved value when there is one,
/// otherwise whatever the rules infer.
pub fn propose(participant: &AggregatedParticipant, answers: &HashMap<String, String>) -> u32 {
    match participant.saved_value {
        Some(saved) => saved,
        None => resolve(participant, answers.get(&participant.name).map(String::as_str)),
    }
}
