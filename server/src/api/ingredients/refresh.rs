use crate::api::{inference_error_response, ErrorResponse};
use crate::state::InferenceHandle;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    post,
    path = "/refresh-data",
    tag = "ingredients",
    responses(
        (status = 200, description = "Reload acknowledgement, relayed from the inference service"),
        (status = 500, description = "Inference service failure", body = ErrorResponse)
    )
)]
pub async fn refresh_data(State(inference): State<InferenceHandle>) -> impl IntoResponse {
    match inference.refresh_data().await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => inference_error_response(e, "Failed to refresh data."),
    }
}
