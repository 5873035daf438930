use crate::api::convert::ConvertResponse;
use crate::api::{inference_error_response, ErrorResponse};
use crate::uploads::UploadStore;
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
pub struct ImageConvertResponse {
    /// Recipe text the inference service read off the image.
    pub extracted_text: String,
    pub conversion: ConvertResponse,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/image/upload-image",
    tag = "image",
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 200, description = "Extracted text and its conversion", body = ImageConvertResponse),
        (status = 400, description = "Missing or unreadable image", body = ErrorResponse),
        (status = 500, description = "Inference service failure", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    State(uploads): State<Arc<UploadStore>>,
    State(converter): State<Converter>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Find the `image` field
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("image") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "No image uploaded".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                tracing::warn!("Multipart read error: {}", e);
                return (
                    e.status(),
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart data: {}", e.body_text()),
                    }),
                )
                    .into_response();
            }
        }
    };

    let original_name = field.file_name().map(str::to_string);

    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            return (
                e.status(),
                Json(ErrorResponse {
                    error: format!("Failed to read file data: {}", e.body_text()),
                }),
            )
                .into_response();
        }
    };

    let handle = match uploads.receive_image(original_name.as_deref(), &data).await {
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
    let result = converter.convert_from_image(handle.path()).await;
    handle.release().await;

    match result {
        Ok(image_conversion) => (
            StatusCode::OK,
            Json(ImageConvertResponse {
                extracted_text: image_conversion.extracted_text,
                conversion: ConvertResponse::from(image_conversion.conversion),
            }),
        )
            .into_response(),
        Err(e) => inference_error_response(e, "Failed to extract ingredients from image."),
    }
}
