use serde_json::Value;
use thiserror::Error;

/// Highest value an operator may type for a single connection.
pub const MAX_ATTENDANCE_VALUE: u32 = 99;

/// Rejection of an operator-entered number. The edited value stays unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
    #[error("Attendance must be between 0 and {max} (got {0})", max = MAX_ATTENDANCE_VALUE)]
    OutOfRange(i64),
    #[error("In-person total cannot be negative (got {0})")]
    Negative(i64),
}

/// Accepts a JSON integer or a string holding one.
fn whole_number(raw: &Value) -> Result<i64, InputError> {
    match raw {
        Value::Number(n) => n.as_i64().ok_or_else(|| InputError::NotANumber(n.to_string())),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| InputError::NotANumber(s.clone())),
        other => Err(InputError::NotANumber(other.to_string())),
    }
}

/// Validate a per-connection attendance value: whole number in `[0, 99]`.
pub fn parse_attendance_value(raw: &Value) -> Result<u32, InputError> {
    let value = whole_number(raw)?;
    if (0..=MAX_ATTENDANCE_VALUE as i64).contains(&value) {
        Ok(value as u32)
    } else {
        Err(InputError::OutOfRange(value))
    }
}

/// Validate the in-person head count: any non-negative whole number.
pub fn parse_in_person_total(raw: &Value) -> Result<u32, InputError> {
    let value = whole_number(raw)?;
    if value < 0 {
        return Err(InputError::Negative(value));
    }
    u32::try_from(value).map_err(|_| InputError::NotANumber(value.to_string()))
}
