use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use attendance_review::app::{session_key, session_middleware};
use attendance_review::backend::{BackendClient, MeetingBackend};
use attendance_review::config::Config;
use attendance_review::handlers;
use attendance_review::review::SessionRegistry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env();

    let client = BackendClient::new(config.backend.clone())
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;
    let backend: Arc<dyn MeetingBackend> = Arc::new(client);
    let backend = web::Data::from(backend);

    let registry = web::Data::new(SessionRegistry::new());
    let secret_key = session_key(&config);
    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);

    log::info!("Backend at {}", config.backend.base_url);
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(backend.clone())
            .app_data(registry.clone())
            .app_data(config.clone())
            .service(web::scope("/api").configure(handlers::api::configure))
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(serde_json::json!({"error": "Not found"}))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
