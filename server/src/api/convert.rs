use crate::api::{inference_error_response, ErrorResponse};
use crate::AppState;
use axum::routing::post;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use trivet_core::{ConversionOutcome, Converter};

pub fn router() -> Router<AppState> {
    Router::new().route("/convert", post(convert))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConvertRequest {
    pub recipe_text: String,
    /// Set on the second round of the suggestion protocol.
    #[serde(default)]
    pub confirm: bool,
    /// The accepted suggestion, or null to proceed without substitution.
    #[serde(default)]
    pub confirmed_ingredient: Option<String>,
}

/// Flat wire shape matching the upstream service: a suggestion round is
/// recognized by the presence of `suggested_ingredient`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConvertResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_ingredient: Option<String>,
}

impl From<ConversionOutcome> for ConvertResponse {
    fn from(outcome: ConversionOutcome) -> Self {
        match outcome {
            ConversionOutcome::Resolved { message } => Self {
                message,
                suggested_ingredient: None,
            },
            ConversionOutcome::NeedsConfirmation {
                message,
                suggested_ingredient,
            } => Self {
                message,
                suggested_ingredient: Some(suggested_ingredient),
            },
        }
    }
}

#[utoipa::path(
    post,
    path = "/convert",
    tag = "convert",
    request_body(content = ConvertRequest, example = json!({"recipe_text": "1 cup flour", "confirm": false, "confirmed_ingredient": null})),
    responses(
        (status = 200, description = "Conversion result, or an unresolved ingredient suggestion", body = ConvertResponse),
        (status = 400, description = "Missing recipe text", body = ErrorResponse),
        (status = 500, description = "Inference service failure", body = ErrorResponse)
    )
)]
pub async fn convert(
    State(converter): State<Converter>,
    Json(req): Json<ConvertRequest>,
) -> impl IntoResponse {
    if req.recipe_text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "recipe_text is required".to_string(),
            }),
        )
            .into_response();
    }

    match converter
        .convert(&req.recipe_text, req.confirm, req.confirmed_ingredient)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(ConvertResponse::from(outcome))).into_response(),
        Err(e) => inference_error_response(e, "Failed to convert."),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(convert),
    components(schemas(ConvertRequest, ConvertResponse))
)]
pub struct ApiDoc;
