/// Around Service Library
///
/// Accepts geo-tagged posts and answers "what was posted near here" queries
/// on top of an Elasticsearch index with a `geo_point` mapping.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: Post and location records, search parameter parsing
/// - `services`: Post service, geo query builder, result aggregation, store backends
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `openapi`: OpenAPI document
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
