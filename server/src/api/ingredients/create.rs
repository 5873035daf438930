use crate::api::{inference_error_response, ErrorResponse};
use crate::state::InferenceHandle;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    post,
    path = "/ingredients",
    tag = "ingredients",
    responses(
        (status = 200, description = "Creation acknowledgement, relayed from the inference service"),
        (status = 500, description = "Inference service failure", body = ErrorResponse)
    )
)]
pub async fn add_ingredient(
    State(inference): State<InferenceHandle>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    match inference.add_ingredient(&body).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => inference_error_response(e, "Failed to add ingredient."),
    }
}
