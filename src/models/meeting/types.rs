use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A past session as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingListItem {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub host_email: Option<String>,
    /// Scheduled length in minutes.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Saved totals, `None` until the meeting has been reviewed.
    #[serde(default)]
    pub in_person_total: Option<u32>,
    #[serde(default)]
    pub videoconference_total: Option<u32>,
}

/// Inclusive calendar-day range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date.is_none_or(|s| day >= s) && self.end_date.is_none_or(|e| day <= e)
    }
}

/// Attendance figures for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceStats {
    pub date: NaiveDate,
    pub in_person: u64,
    pub remote: u64,
    pub total: u64,
    pub meeting_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatistics {
    pub daily_stats: Vec<DailyAttendanceStats>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
