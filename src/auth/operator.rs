use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const OPERATOR_KEY: &str = "operator_id";

/// Get the operator id from the session cookie, or mint a new one.
///
/// Review sessions are scoped by this id, so two browsers never share an
/// in-progress edit.
pub fn get_or_create_operator(session: &Session) -> Result<String, AppError> {
    if let Ok(Some(id)) = session.get::<String>(OPERATOR_KEY) {
        return Ok(id);
    }
    let id = generate_id();
    session
        .insert(OPERATOR_KEY, &id)
        .map_err(|e| AppError::Session(format!("Failed to store operator id: {e}")))?;
    Ok(id)
}

/// Random 16-byte hex id.
fn generate_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    hex::encode(bytes)
}
