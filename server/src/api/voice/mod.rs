pub mod input;

use crate::uploads::MAX_AUDIO_BYTES;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/voice endpoints.
///
/// The body limit sits above the 10 MB audio ceiling to leave room for
/// multipart framing; the store enforces the exact payload cap.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/voice/voice-input", post(input::voice_input))
        .layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES + 1024 * 1024))
}

#[derive(OpenApi)]
#[openapi(
    paths(input::voice_input),
    components(schemas(input::VoiceConvertResponse, input::VoiceInputRequest))
)]
pub struct ApiDoc;
