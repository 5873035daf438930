pub mod upload;

use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/image endpoints.
///
/// Image bodies are unbounded; the payload is relayed to the inference
/// service, not decoded here.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/image/upload-image", post(upload::upload_image))
        .layer(DefaultBodyLimit::disable())
}

#[derive(OpenApi)]
#[openapi(
    paths(upload::upload_image),
    components(schemas(upload::ImageConvertResponse, upload::UploadImageRequest))
)]
pub struct ApiDoc;
