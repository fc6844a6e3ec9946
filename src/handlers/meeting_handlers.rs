use actix_web::{HttpResponse, web};

use crate::auth::BearerToken;
use crate::backend::MeetingBackend;
use crate::errors::AppError;
use crate::models::meeting::{self, DateRange};

/// GET /api/meetings: past meetings, optionally limited to `startDate`..`endDate`.
pub async fn list(
    backend: web::Data<dyn MeetingBackend>,
    auth: BearerToken,
    range: web::Query<DateRange>,
) -> Result<HttpResponse, AppError> {
    let meetings = backend.list_meetings(&auth).await?;
    Ok(HttpResponse::Ok().json(meeting::filter_meetings(meetings, &range)))
}

/// GET /api/meetings/statistics: saved attendance summed per day.
pub async fn statistics(
    backend: web::Data<dyn MeetingBackend>,
    auth: BearerToken,
    range: web::Query<DateRange>,
) -> Result<HttpResponse, AppError> {
    let meetings = backend.list_meetings(&auth).await?;
    Ok(HttpResponse::Ok().json(meeting::daily_statistics(&meetings, &range)))
}

/// GET /api/meetings/{id}/polls: every poll answer, all questions.
pub async fn polls(
    backend: web::Data<dyn MeetingBackend>,
    auth: BearerToken,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let answers = backend.fetch_poll_answers(&auth, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(answers))
}
