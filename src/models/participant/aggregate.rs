use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::types::{AggregatedParticipant, ConnectionEvent, SortKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The event at `index` has an empty display name and cannot be grouped.
    #[error("Connection event #{index} has no display name")]
    InvalidInput { index: usize },
}

/// Merge connection events into one presence record per display name.
///
/// Malformed events (empty name) are skipped and logged; the rest of the
/// meeting is still aggregated. Groups come out in order of first appearance,
/// which callers should not rely on.
pub fn aggregate(events: &[ConnectionEvent]) -> Vec<AggregatedParticipant> {
    let valid = events.iter().enumerate().filter(|(index, event)| {
        if event.name.is_empty() {
            log::warn!(
                "Skipping connection event #{} (participant {}): empty display name",
                index,
                event.participant_id
            );
            false
        } else {
            true
        }
    });
    group(valid.map(|(_, event)| event))
}

/// Like [`aggregate`] but refuses the whole input if any event is malformed.
pub fn try_aggregate(
    events: &[ConnectionEvent],
) -> Result<Vec<AggregatedParticipant>, AggregateError> {
    if let Some(index) = events.iter().position(|e| e.name.is_empty()) {
        return Err(AggregateError::InvalidInput { index });
    }
    Ok(group(events.iter()))
}

fn group<'a>(events: impl Iterator<Item = &'a ConnectionEvent>) -> Vec<AggregatedParticipant> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<AggregatedParticipant> = Vec::new();
    let mut connections: Vec<usize> = Vec::new();
    let mut seen_ids: Vec<Vec<i64>> = Vec::new();

    for event in events {
        let slot = *slots.entry(event.name.as_str()).or_insert_with(|| {
            out.push(AggregatedParticipant {
                id: event.participant_id,
                name: event.name.clone(),
                total_seconds: 0,
                duration_minutes: 0,
                first_join: None,
                last_leave: None,
                saved_value: None,
            });
            connections.push(0);
            seen_ids.push(Vec::new());
            out.len() - 1
        });

        let row = &mut out[slot];
        row.total_seconds += event.seconds();
        row.first_join = Some(match row.first_join {
            Some(current) => current.min(event.join_time),
            None => event.join_time,
        });
        row.last_leave = match (row.last_leave, event.leave_time) {
            (Some(current), Some(leave)) => Some(current.max(leave)),
            (current, leave) => current.or(leave),
        };
        connections[slot] += 1;
        if !seen_ids[slot].contains(&event.participant_id) {
            seen_ids[slot].push(event.participant_id);
        }
    }

    assign_unique_ids(&mut out, &seen_ids);

    for (row, count) in out.iter_mut().zip(&connections) {
        row.duration_minutes = row.total_seconds / 60;
        log::debug!(
            "{} - total {}min over {} connection(s)",
            row.name,
            row.duration_minutes,
            count
        );
    }

    out
}

/// Give every group its own id, since attendance values are keyed by it.
///
/// A group keeps the id of its first event unless an earlier group already
/// took it (the same account renamed mid-meeting). It then takes the next of
/// its own event ids that is still free, or failing that a negative id.
/// Assignment only depends on event order, so reloading the same events
/// yields the same ids.
fn assign_unique_ids(rows: &mut [AggregatedParticipant], seen_ids: &[Vec<i64>]) {
    let mut taken: HashSet<i64> = HashSet::new();
    let mut next_local = -1;

    for (row, ids) in rows.iter_mut().zip(seen_ids) {
        let id = match ids.iter().copied().find(|id| !taken.contains(id)) {
            Some(id) => id,
            None => {
                let in_use =
                    |id: i64| taken.contains(&id) || seen_ids.iter().flatten().any(|&i| i == id);
                while in_use(next_local) {
                    next_local -= 1;
                }
                next_local
            }
        };
        if id != row.id {
            log::warn!(
                "'{}' shares participant id {} with another name; keyed as {} instead",
                row.name,
                row.id,
                id
            );
        }
        taken.insert(id);
        row.id = id;
    }
}

/// Order participants for display: name ascending (case-insensitive) or
/// longest presence first. Ties fall back to the other key.
pub fn sort_participants(rows: &mut [AggregatedParticipant], key: SortKey) {
    rows.sort_by(|a, b| match key {
        SortKey::Name => by_name(a, b).then_with(|| b.total_seconds.cmp(&a.total_seconds)),
        SortKey::Duration => b.total_seconds.cmp(&a.total_seconds).then_with(|| by_name(a, b)),
    });
}

fn by_name(a: &AggregatedParticipant, b: &AggregatedParticipant) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 18, 0, 0).unwrap() + Duration::minutes(minute)
    }

    fn span(id: i64, name: &str, from: i64, to: i64) -> ConnectionEvent {
        ConnectionEvent {
            participant_id: id,
            name: name.to_string(),
            join_time: t(from),
            leave_time: Some(t(to)),
            duration_seconds: Some((to - from) * 60),
        }
    }

    #[test]
    fn reconnection_is_merged() {
        let rows = aggregate(&[span(7, "Jean", 0, 15), span(8, "Jean", 20, 30)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 7);
        assert_eq!(rows[0].duration_minutes, 25);
        assert_eq!(rows[0].first_join, Some(t(0)));
        assert_eq!(rows[0].last_leave, Some(t(30)));
    }

    #[test]
    fn names_are_case_sensitive() {
        let rows = aggregate(&[span(1, "jean", 0, 5), span(2, "Jean", 0, 5)]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn open_connection_keeps_known_leave() {
        let mut open = span(1, "Marie", 40, 41);
        open.leave_time = None;
        open.duration_seconds = None;
        let rows = aggregate(&[span(1, "Marie", 0, 30), open]);
        assert_eq!(rows[0].last_leave, Some(t(30)));
        assert_eq!(rows[0].duration_minutes, 30);
    }

    #[test]
    fn all_open_has_no_leave() {
        let mut open = span(1, "Marie", 0, 1);
        open.leave_time = None;
        let rows = aggregate(&[open]);
        assert_eq!(rows[0].last_leave, None);
    }

    #[test]
    fn zero_and_negative_durations_still_listed() {
        let mut negative = span(2, "Paul", 10, 10);
        negative.duration_seconds = Some(-120);
        let rows = aggregate(&[span(1, "Luc", 5, 5), negative]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.duration_minutes == 0));
    }

    #[test]
    fn duration_derived_from_timestamps() {
        let mut event = span(1, "Anne", 0, 12);
        event.duration_seconds = None;
        assert_eq!(event.minutes(), 12);
    }

    #[test]
    fn seconds_summed_before_rounding() {
        let mut a = span(1, "Anne", 0, 1);
        a.duration_seconds = Some(90);
        let mut b = span(1, "Anne", 2, 3);
        b.duration_seconds = Some(90);
        let rows = aggregate(&[a, b]);
        assert_eq!(rows[0].total_seconds, 180);
        assert_eq!(rows[0].duration_minutes, 3);
    }

    #[test]
    fn empty_name_skipped_or_rejected() {
        let events = vec![span(1, "Anne", 0, 10), span(2, "", 0, 10)];
        assert_eq!(aggregate(&events).len(), 1);
        assert_eq!(try_aggregate(&events), Err(AggregateError::InvalidInput { index: 1 }));
    }

    #[test]
    fn renamed_account_gets_its_own_id() {
        let events = vec![
            span(5, "Jean", 0, 10),
            span(5, "Jean (PC)", 12, 30),
            span(9, "Jean (PC)", 31, 40),
            span(5, "Jean (tel)", 41, 45),
        ];
        let rows = aggregate(&events);
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, [5, 9, -1]);

        let again: Vec<_> = aggregate(&events).iter().map(|r| r.id).collect();
        assert_eq!(again, ids);
    }

    #[test]
    fn local_id_skips_ids_in_use() {
        let rows = aggregate(&[span(-1, "Anne", 0, 5), span(-1, "Anne (2)", 0, 5)]);
        assert_eq!(rows[0].id, -1);
        assert_eq!(rows[1].id, -2);
    }

    #[test]
    fn sorting() {
        let mut rows = aggregate(&[
            span(1, "bob", 0, 5),
            span(2, "Alice", 0, 50),
            span(3, "Chloé", 0, 20),
        ]);
        sort_participants(&mut rows, SortKey::Name);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alice", "bob", "Chloé"]);

        sort_participants(&mut rows, SortKey::Duration);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Chloé", "bob"]);
    }
}
