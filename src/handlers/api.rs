use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use super::{meeting_handlers, review_handlers};

/// CSRF protection for mutation endpoints.
///
/// Rejects POST/PUT/DELETE requests that don't have Content-Type: application/json.
/// Browsers cannot send cross-origin JSON with cookies via simple form POST,
/// so the operator cookie cannot be ridden by another site.
/// GET requests are exempt (read-only, no state changes).
pub async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure the operator API (mounted under `/api`).
///
/// `/meetings/statistics` is registered before `/meetings/{id}/...`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/meetings")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(meeting_handlers::list))
            .route("/statistics", web::get().to(meeting_handlers::statistics))
            .route("/{id}/polls", web::get().to(meeting_handlers::polls))
            .route("/{id}/review", web::post().to(review_handlers::open))
            .route("/{id}/review", web::get().to(review_handlers::show))
            .route("/{id}/review", web::delete().to(review_handlers::close))
            .route("/{id}/review/refresh", web::post().to(review_handlers::refresh))
            .route("/{id}/review/save", web::post().to(review_handlers::save))
            .route("/{id}/review/in-person", web::put().to(review_handlers::set_in_person))
            .route("/{id}/review/participants/{pid}", web::put().to(review_handlers::set_value))
    );
}
