/// Post handlers - HTTP endpoints for creating and finding posts
use crate::error::{ErrorBody, Result};
use crate::models::{CreatedPost, Post, SearchParams};
use crate::services::{aggregator, PostService};
use actix_web::{
    http::header::{self, ContentType},
    web, HttpResponse,
};

/// Create a new post
#[utoipa::path(
    post,
    path = "/post",
    tag = "posts",
    request_body = Post,
    responses(
        (status = 201, description = "Post stored", body = CreatedPost),
        (status = 400, description = "Malformed body or invalid location", body = ErrorBody),
        (status = 503, description = "Search backend unavailable", body = ErrorBody),
        (status = 504, description = "Search backend timed out", body = ErrorBody),
    )
)]
pub async fn create_post(
    service: web::Data<PostService>,
    req: web::Json<Post>,
) -> Result<HttpResponse> {
    let id = service.create_post(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(CreatedPost { id }))
}

/// Find posts within a radius of a point
#[utoipa::path(
    get,
    path = "/search",
    tag = "posts",
    params(SearchParams),
    responses(
        (status = 200, description = "Posts within range, in store order", body = [Post]),
        (status = 400, description = "Missing or invalid parameter", body = ErrorBody),
        (status = 503, description = "Search backend unavailable", body = ErrorBody),
        (status = 504, description = "Search backend timed out", body = ErrorBody),
    )
)]
pub async fn search_nearby(
    service: web::Data<PostService>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    let geo_query = query.into_inner().into_query(service.search_config())?;
    let posts = service.search_nearby(&geo_query).await?;
    let body = aggregator::to_json(&posts)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .body(body))
}
