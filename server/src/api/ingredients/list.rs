use crate::api::{inference_error_response, ErrorResponse};
use crate::state::InferenceHandle;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/ingredients",
    tag = "ingredients",
    responses(
        (status = 200, description = "All ingredient records, relayed from the inference service"),
        (status = 500, description = "Inference service failure", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(State(inference): State<InferenceHandle>) -> impl IntoResponse {
    match inference.list_ingredients().await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => inference_error_response(e, "Failed to get ingredients."),
    }
}
