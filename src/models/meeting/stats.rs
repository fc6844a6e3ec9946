use std::collections::BTreeMap;

use super::types::{AttendanceStatistics, DailyAttendanceStats, DateRange, MeetingListItem};

/// Keep meetings whose start day falls within `range`, most recent first.
pub fn filter_meetings(meetings: Vec<MeetingListItem>, range: &DateRange) -> Vec<MeetingListItem> {
    let mut kept: Vec<_> = meetings
        .into_iter()
        .filter(|m| range.contains(m.start.date()))
        .collect();
    kept.sort_by(|a, b| b.start.cmp(&a.start));
    kept
}

/// Per-day totals over meetings that already have a saved summary.
///
/// Unreviewed meetings are left out entirely rather than counted as zero.
pub fn daily_statistics(meetings: &[MeetingListItem], range: &DateRange) -> AttendanceStatistics {
    let mut days: BTreeMap<_, DailyAttendanceStats> = BTreeMap::new();

    for meeting in meetings {
        let day = meeting.start.date();
        if !range.contains(day) {
            continue;
        }
        if meeting.in_person_total.is_none() && meeting.videoconference_total.is_none() {
            continue;
        }
        let in_person = u64::from(meeting.in_person_total.unwrap_or(0));
        let remote = u64::from(meeting.videoconference_total.unwrap_or(0));

        let entry = days.entry(day).or_insert_with(|| DailyAttendanceStats {
            date: day,
            in_person: 0,
            remote: 0,
            total: 0,
            meeting_count: 0,
        });
        entry.in_person += in_person;
        entry.remote += remote;
        entry.total += in_person + remote;
        entry.meeting_count += 1;
    }

    AttendanceStatistics {
        daily_stats: days.into_values().collect(),
        start_date: range.start_date,
        end_date: range.end_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meeting(id: i64, day: u32, hour: u32, saved: Option<(u32, u32)>) -> MeetingListItem {
        let start = NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        MeetingListItem {
            id,
            start,
            end: start,
            topic: None,
            host_name: None,
            host_email: None,
            duration: None,
            timezone: None,
            in_person_total: saved.map(|s| s.0),
            videoconference_total: saved.map(|s| s.1),
        }
    }

    #[test]
    fn groups_by_day_and_skips_unreviewed() {
        let meetings = vec![
            meeting(1, 2, 10, Some((20, 5))),
            meeting(2, 2, 18, Some((10, 7))),
            meeting(3, 3, 10, None),
            meeting(4, 9, 10, Some((1, 1))),
        ];
        let stats = daily_statistics(&meetings, &DateRange::default());
        assert_eq!(stats.daily_stats.len(), 2);
        let first = &stats.daily_stats[0];
        assert_eq!(
            (first.in_person, first.remote, first.total, first.meeting_count),
            (30, 12, 42, 2)
        );
    }

    #[test]
    fn range_is_inclusive() {
        let range = DateRange {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 2),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 3),
        };
        let meetings = vec![
            meeting(1, 1, 10, None),
            meeting(2, 2, 10, None),
            meeting(3, 3, 23, None),
            meeting(4, 4, 0, None),
        ];
        let ids: Vec<_> = filter_meetings(meetings, &range).iter().map(|m| m.id).collect();
        assert_eq!(ids, [3, 2]);
    }

    #[test]
    fn day_totals_do_not_overflow() {
        let meetings = vec![
            meeting(1, 2, 10, Some((u32::MAX, u32::MAX))),
            meeting(2, 2, 18, Some((1, 1))),
        ];
        let stats = daily_statistics(&meetings, &DateRange::default());
        let day = &stats.daily_stats[0];
        assert_eq!(day.in_person, u64::from(u32::MAX) + 1);
        assert_eq!(day.total, 2 * (u64::from(u32::MAX) + 1));
    }
}
