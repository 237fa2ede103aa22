/// OpenAPI documentation for Around Service
use crate::error::ErrorBody;
use crate::models::{CreatedPost, Location, Post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Around Service API",
        version = "1.0.0",
        description = "Stores short geo-tagged posts and finds the posts made within a radius of a point.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        crate::handlers::posts::create_post,
        crate::handlers::posts::search_nearby,
    ),
    components(schemas(Post, Location, CreatedPost, ErrorBody)),
    tags(
        (name = "posts", description = "Post creation and proximity search"),
    ),
)]
pub struct ApiDoc;
