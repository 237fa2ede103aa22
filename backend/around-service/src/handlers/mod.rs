/// HTTP handlers and route table
///
/// - `POST /post`: store a geo-tagged post
/// - `GET /search`: posts within a radius of a point
/// - `/health`, `/health/live`, `/health/ready`: probes
/// - `/openapi.json`: API document
pub mod health;
pub mod posts;

pub use health::{health_summary, liveness_check, readiness_check};
pub use posts::{create_post, search_nearby};

use crate::error::AppError;
use crate::openapi::ApiDoc;
use actix_cors::Cors;
use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

/// Registers every route. Extractor failures are rendered as `AppError::BadRequest`.
///
/// Post bodies are decoded as JSON whatever their `Content-Type`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(false)
            .error_handler(|err, _req| {
                AppError::BadRequest(format!("invalid post body: {}", err)).into()
            }),
    )
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("invalid query string: {}", err)).into()
    }))
    .route("/post", web::post().to(create_post))
    .route("/search", web::get().to(search_nearby))
    .route("/health", web::get().to(health_summary))
    .route("/health/live", web::get().to(liveness_check))
    .route("/health/ready", web::get().to(readiness_check))
    .route("/openapi.json", web::get().to(openapi_json));
}

/// Wildcard CORS policy shared by every route.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

async fn openapi_json() -> actix_web::Result<HttpResponse> {
    let body = ApiDoc::openapi().to_json().map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
