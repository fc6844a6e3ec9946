use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::BearerToken;
use crate::auth::operator::get_or_create_operator;
use crate::backend::MeetingBackend;
use crate::errors::AppError;
use crate::review::SessionRegistry;

use super::forms::{ValueRequest, ViewQuery};

/// PUT /api/meetings/{id}/review/participants/{pid}: operator edit of one value.
///
/// Rejected values (non-numeric, outside 0..=99) leave the session untouched.
pub async fn set_value(
    registry: web::Data<SessionRegistry>,
    session: Session,
    path: web::Path<(i64, i64)>,
    query: web::Query<ViewQuery>,
    body: web::Json<ValueRequest>,
) -> Result<HttpResponse, AppError> {
    let (meeting_id, participant_id) = path.into_inner();
    let key = (get_or_create_operator(&session)?, meeting_id);

    let view = registry
        .with_session(&key, |review| {
            review
                .set_value(participant_id, &body.value)
                .map(|_| review.view(query.sort))
        })
        .ok_or(AppError::NoReview(meeting_id))??;
    Ok(HttpResponse::Ok().json(view))
}

/// PUT /api/meetings/{id}/review/in-person: head count in the room.
pub async fn set_in_person(
    registry: web::Data<SessionRegistry>,
    session: Session,
    path: web::Path<i64>,
    query: web::Query<ViewQuery>,
    body: web::Json<ValueRequest>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = path.into_inner();
    let key = (get_or_create_operator(&session)?, meeting_id);

    let view = registry
        .with_session(&key, |review| {
            review
                .set_in_person(&body.value)
                .map(|_| review.view(query.sort))
        })
        .ok_or(AppError::NoReview(meeting_id))??;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/meetings/{id}/review/save: write every held value at once.
///
/// Saves a snapshot so edits made while the request is out are not lost;
/// they simply are not part of this save.
pub async fn save(
    backend: web::Data<dyn MeetingBackend>,
    registry: web::Data<SessionRegistry>,
    session: Session,
    auth: BearerToken,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = path.into_inner();
    let key = (get_or_create_operator(&session)?, meeting_id);
    let _flight = registry.begin(&key).ok_or(AppError::LoadInProgress(meeting_id))?;

    let mut snapshot = registry
        .with_session(&key, |review| review.clone())
        .ok_or(AppError::NoReview(meeting_id))?;
    let summary = snapshot.save(backend.get_ref(), &auth).await?;
    registry.with_session(&key, |review| review.mark_saved(&summary));

    Ok(HttpResponse::Ok().json(summary))
}
