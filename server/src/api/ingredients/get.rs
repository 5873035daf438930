use crate::api::{inference_error_response, ErrorResponse};
use crate::state::InferenceHandle;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/ingredients/{name}",
    tag = "ingredients",
    params(("name" = String, Path, description = "Ingredient name")),
    responses(
        (status = 200, description = "Ingredient record, relayed from the inference service"),
        (status = 500, description = "Unknown ingredient or inference service failure", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(inference): State<InferenceHandle>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match inference.get_ingredient(&name).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => inference_error_response(e, "Failed to get ingredient."),
    }
}
