use crate::api::convert::ConvertResponse;
use crate::api::{inference_error_response, ErrorResponse};
use crate::uploads::{UploadError, UploadStore};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use trivet_core::Converter;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VoiceConvertResponse {
    /// Transcript of the uploaded audio.
    pub transcript: String,
    pub conversion: ConvertResponse,
}

/// Audio file under the `file` field; audio MIME type, at most 10 MB.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct VoiceInputRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/voice/voice-input",
    tag = "voice",
    request_body(content_type = "multipart/form-data", content = VoiceInputRequest),
    responses(
        (status = 200, description = "Transcript and its conversion", body = VoiceConvertResponse),
        (status = 400, description = "Missing, non-audio, or oversized file", body = ErrorResponse),
        (status = 500, description = "Inference service failure", body = ErrorResponse)
    )
)]
pub async fn voice_input(
    State(uploads): State<Arc<UploadStore>>,
    State(converter): State<Converter>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "No audio file uploaded.".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                tracing::warn!("Multipart read error: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart data: {}", e.body_text()),
                    }),
                )
                    .into_response();
            }
        }
    };

    let original_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);

    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            let error = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                UploadError::TooLarge.to_string()
            } else {
                format!("Failed to read file data: {}", e.body_text())
            };
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
        }
    };

    let handle = match uploads
        .receive_audio(original_name.as_deref(), content_type.as_deref(), &data)
        .await
    {
        Ok(h) => h,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    };

    // The handle is released on every path once the upload is accepted.
    let result = converter.convert_from_audio(handle.path()).await;
    handle.release().await;

    match result {
        Ok(audio_conversion) => (
            StatusCode::OK,
            Json(VoiceConvertResponse {
                transcript: audio_conversion.transcript,
                conversion: ConvertResponse::from(audio_conversion.conversion),
            }),
        )
            .into_response(),
        Err(e) => inference_error_response(e, "Failed to process voice input."),
    }
}
