use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What gets written back to the backend for one meeting. Overwritten
/// wholesale on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingAttendanceSummary {
    #[serde(rename = "total")]
    pub remote_total: u64,
    pub in_person_total: u32,
    pub values: BTreeMap<i64, u32>,
}

impl MeetingAttendanceSummary {
    pub fn new(values: BTreeMap<i64, u32>, in_person_total: u32) -> Self {
        MeetingAttendanceSummary {
            remote_total: remote_total(&values),
            in_person_total,
            values,
        }
    }
}

/// Values previously saved for a meeting. Everything empty when the meeting
/// was never reviewed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAttendance {
    #[serde(default)]
    pub in_person_total: Option<u32>,
    #[serde(default)]
    pub values: BTreeMap<i64, u32>,
}

impl From<MeetingAttendanceSummary> for SavedAttendance {
    fn from(summary: MeetingAttendanceSummary) -> Self {
        SavedAttendance {
            in_person_total: Some(summary.in_person_total),
            values: summary.values,
        }
    }
}

/// Remote total: every held value counts, zeros and untouched ones included.
///
/// Summed as `u64`: a single name suffix may already be close to `u32::MAX`.
pub fn remote_total(values: &BTreeMap<i64, u32>) -> u64 {
    values.values().map(|&v| u64::from(v)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_includes_zeros() {
        let values = BTreeMap::from([(1, 0), (2, 3), (3, 1)]);
        let summary = MeetingAttendanceSummary::new(values, 12);
        assert_eq!(summary.remote_total, 4);
        assert_eq!(summary.in_person_total, 12);
    }

    #[test]
    fn total_does_not_overflow_u32() {
        let values = BTreeMap::from([(1, u32::MAX), (2, 1), (3, u32::MAX)]);
        assert_eq!(remote_total(&values), 2 * u64::from(u32::MAX) + 1);
    }

    #[test]
    fn wire_shape() {
        let summary = MeetingAttendanceSummary::new(BTreeMap::from([(5, 2)]), 1);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({"total": 2, "inPersonTotal": 1, "values": {"5": 2}}));
    }
}
