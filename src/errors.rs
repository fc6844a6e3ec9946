use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

use crate::backend::BackendError;
use crate::models::attendance::InputError;
use crate::review::EditError;

#[derive(Debug)]
pub enum AppError {
    Backend(BackendError),
    Validation(String),
    NotFound,
    NoReview(i64),
    LoadInProgress(i64),
    Session(String),
}

/// Error body for every JSON endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Backend(e) => write!(f, "Backend error: {e}"),
            AppError::Validation(e) => write!(f, "Validation failed: {e}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::NoReview(id) => write!(f, "No review open for meeting {id}"),
            AppError::LoadInProgress(id) => write!(f, "Meeting {id} is already loading"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Backend(BackendError::Unauthorized) => StatusCode::UNAUTHORIZED,
            AppError::Backend(BackendError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::NoReview(_) => StatusCode::NOT_FOUND,
            AppError::LoadInProgress(_) => StatusCode::CONFLICT,
            AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(details) => ApiErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(details.clone()),
            },
            AppError::Backend(e) => {
                log::error!("{self}");
                ApiErrorResponse {
                    error: "Meeting data service unavailable, please retry".to_string(),
                    details: Some(e.to_string()),
                }
            }
            AppError::Session(_) => {
                log::error!("{self}");
                ApiErrorResponse {
                    error: "Internal Server Error".to_string(),
                    details: None,
                }
            }
            _ => ApiErrorResponse {
                error: self.to_string(),
                details: None,
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        AppError::Backend(e)
    }
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<EditError> for AppError {
    fn from(e: EditError) -> Self {
        match e {
            EditError::UnknownParticipant(_) => AppError::NotFound,
            EditError::Invalid(e) => e.into(),
        }
    }
}
