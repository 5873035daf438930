pub mod create;
pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/forum endpoints.
///
/// Listing is public; creating requires a bearer token (enforced by the
/// `AuthUser` extractor on the handler).
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/forum/posts",
        get(list::list_posts).post(create::create_post),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_posts, create::create_post),
    components(schemas(
        list::ListPostsResponse,
        list::PostWithAuthor,
        list::PostAuthor,
        create::CreatePostRequest,
        create::CreatePostResponse,
    ))
)]
pub struct ApiDoc;
