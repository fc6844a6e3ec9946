//! Review lifecycle: open, show, refresh, close.
//!
//! Each operator gets their own session per meeting; loads for the same
//! operator and meeting never overlap.

use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::BearerToken;
use crate::auth::operator::get_or_create_operator;
use crate::backend::MeetingBackend;
use crate::config::Config;
use crate::errors::AppError;
use crate::review::{ReviewSession, SessionRegistry};

use super::forms::{RefreshRequest, ViewQuery};

// ---------------------------------------------------------------------------
// POST: open (or reopen) a review
// ---------------------------------------------------------------------------

/// POST /api/meetings/{id}/review: aggregate, infer and hold a new session.
pub async fn open(
    backend: web::Data<dyn MeetingBackend>,
    registry: web::Data<SessionRegistry>,
    config: web::Data<Config>,
    session: Session,
    auth: BearerToken,
    path: web::Path<i64>,
    query: web::Query<ViewQuery>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = path.into_inner();
    let key = (get_or_create_operator(&session)?, meeting_id);
    let _flight = registry.begin(&key).ok_or(AppError::LoadInProgress(meeting_id))?;

    let question = &config.attendance_question;
    let review = ReviewSession::load(backend.get_ref(), &auth, meeting_id, question).await?;
    let view = review.view(query.sort);
    registry.insert(key, review);

    Ok(HttpResponse::Ok().json(view))
}

// ---------------------------------------------------------------------------
// GET: current state
// ---------------------------------------------------------------------------

/// GET /api/meetings/{id}/review
pub async fn show(
    registry: web::Data<SessionRegistry>,
    session: Session,
    path: web::Path<i64>,
    query: web::Query<ViewQuery>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = path.into_inner();
    let key = (get_or_create_operator(&session)?, meeting_id);

    let view = registry
        .with_session(&key, |review| review.view(query.sort))
        .ok_or(AppError::NoReview(meeting_id))?;
    Ok(HttpResponse::Ok().json(view))
}

// ---------------------------------------------------------------------------
// POST: refresh from the provider
// ---------------------------------------------------------------------------

/// POST /api/meetings/{id}/review/refresh: drop local edits and rebuild.
///
/// Destructive, so the body must carry `{"confirm": true}`. The previous
/// session stays in place if the backend fails.
pub async fn refresh(
    backend: web::Data<dyn MeetingBackend>,
    registry: web::Data<SessionRegistry>,
    config: web::Data<Config>,
    session: Session,
    auth: BearerToken,
    path: web::Path<i64>,
    query: web::Query<ViewQuery>,
    body: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    if !body.confirm {
        return Err(AppError::Validation(
            "Refreshing discards unsaved attendance values; resend with confirm=true".to_string(),
        ));
    }

    let meeting_id = path.into_inner();
    let key = (get_or_create_operator(&session)?, meeting_id);
    let _flight = registry.begin(&key).ok_or(AppError::LoadInProgress(meeting_id))?;

    log::info!("Meeting {meeting_id}: refresh from provider requested");
    let question = &config.attendance_question;
    let review = ReviewSession::refresh(backend.get_ref(), &auth, meeting_id, question).await?;
    let view = review.view(query.sort);
    registry.insert(key, review);

    Ok(HttpResponse::Ok().json(view))
}

// ---------------------------------------------------------------------------
// DELETE: close
// ---------------------------------------------------------------------------

/// DELETE /api/meetings/{id}/review: forget the session and any unsaved edits.
pub async fn close(
    registry: web::Data<SessionRegistry>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = path.into_inner();
    let key = (get_or_create_operator(&session)?, meeting_id);

    registry.remove(&key).ok_or(AppError::NoReview(meeting_id))?;
    Ok(HttpResponse::NoContent().finish())
}
