//! Router-level tests against a mock inference client.
//!
//! The database pool is built unchecked and never connected; every route
//! exercised here either skips the database entirely or must reject before
//! touching it.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use trivet_core::{ConversionReply, ConversionRequest, MockInferenceClient};
use trivet_server::auth::TokenService;
use trivet_server::uploads::UploadStore;
use trivet_server::{app, AppState};

fn test_app(mock: MockInferenceClient) -> (axum::Router, PathBuf) {
    let manager = ConnectionManager::<PgConnection>::new("postgres://localhost/unreachable");
    let pool = diesel::r2d2::Pool::builder()
        .max_size(1)
        .min_idle(Some(0))
        .build_unchecked(manager);

    let uploads_root =
        std::env::temp_dir().join(format!("trivet-api-test-{}", rand::random::<u64>()));
    let uploads = UploadStore::new(&uploads_root).unwrap();

    let state = AppState::new(pool, TokenService::new(b"test-secret"), Arc::new(mock), uploads);
    (app(state), uploads_root)
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(
    uri: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let boundary = "trivet-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn uploads_left_behind(root: &PathBuf) -> usize {
    std::fs::read_dir(root).unwrap().count()
}

fn flour_reply() -> ConversionReply {
    ConversionReply {
        message: Some("120 g".to_string()),
        suggested_ingredient: None,
        confirm_conversion: true,
    }
}

#[tokio::test]
async fn test_unauthed_ping() {
    let (app, _root) = test_app(MockInferenceClient::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/test/unauthed-ping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_convert_resolved() {
    let mock = MockInferenceClient::new()
        .with_reply(ConversionRequest::new("1 cup flour"), flour_reply());
    let (app, _root) = test_app(mock);

    let response = app
        .oneshot(json_request(
            "/convert",
            serde_json::json!({"recipe_text": "1 cup flour"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "120 g");
    assert!(body.get("suggested_ingredient").is_none());
}

#[tokio::test]
async fn test_convert_suggestion_two_rounds() {
    let mock = MockInferenceClient::new()
        .with_reply(
            ConversionRequest::new("1 cup flor"),
            ConversionReply {
                message: Some("Ingredient 'flor' not found.".to_string()),
                suggested_ingredient: Some("flour".to_string()),
                confirm_conversion: false,
            },
        )
        .with_reply(
            ConversionRequest {
                recipe_text: "1 cup flor".to_string(),
                confirm: true,
                confirmed_ingredient: Some("flour".to_string()),
            },
            flour_reply(),
        );
    let (app, _root) = test_app(mock);

    // Round one: the suggestion is returned unresolved.
    let response = app
        .clone()
        .oneshot(json_request(
            "/convert",
            serde_json::json!({"recipe_text": "1 cup flor"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["suggested_ingredient"], "flour");

    // Round two: the client confirms the suggestion.
    let response = app
        .oneshot(json_request(
            "/convert",
            serde_json::json!({
                "recipe_text": "1 cup flor",
                "confirm": true,
                "confirmed_ingredient": "flour"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "120 g");
    assert!(body.get("suggested_ingredient").is_none());
}

#[tokio::test]
async fn test_convert_upstream_failure_is_not_leaked() {
    let mock = MockInferenceClient::new().with_upstream_failure(502, "secret upstream detail");
    let (app, _root) = test_app(mock);

    let response = app
        .oneshot(json_request(
            "/convert",
            serde_json::json!({"recipe_text": "1 cup flour"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Failed to convert.");
}

#[tokio::test]
async fn test_convert_requires_recipe_text() {
    let (app, _root) = test_app(MockInferenceClient::new());

    let response = app
        .oneshot(json_request(
            "/convert",
            serde_json::json!({"recipe_text": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_upload_converts_and_cleans_up() {
    let mock = MockInferenceClient::new()
        .with_extracted_text("1 cup flour")
        .with_reply(ConversionRequest::new("1 cup flour"), flour_reply());
    let (app, root) = test_app(mock);

    let response = app
        .oneshot(multipart_request(
            "/api/image/upload-image",
            "image",
            "recipe.jpg",
            "image/jpeg",
            b"fake image bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["extracted_text"], "1 cup flour");
    assert_eq!(body["conversion"]["message"], "120 g");

    assert_eq!(uploads_left_behind(&root), 0);
}

#[tokio::test]
async fn test_image_upload_cleans_up_on_inference_failure() {
    let mock = MockInferenceClient::new().with_upstream_failure(503, "down");
    let (app, root) = test_app(mock);

    let response = app
        .oneshot(multipart_request(
            "/api/image/upload-image",
            "image",
            "recipe.jpg",
            "image/jpeg",
            b"fake image bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Failed to extract ingredients from image.");

    assert_eq!(uploads_left_behind(&root), 0);
}

#[tokio::test]
async fn test_image_upload_requires_image_field() {
    let (app, root) = test_app(MockInferenceClient::new());

    let response = app
        .oneshot(multipart_request(
            "/api/image/upload-image",
            "wrong-field",
            "recipe.jpg",
            "image/jpeg",
            b"fake image bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(uploads_left_behind(&root), 0);
}

#[tokio::test]
async fn test_voice_input_converts_transcript() {
    let mock = MockInferenceClient::new()
        .with_transcript("2 tbsp sugar")
        .with_reply(
            ConversionRequest::new("2 tbsp sugar"),
            ConversionReply {
                message: Some("25 g".to_string()),
                suggested_ingredient: None,
                confirm_conversion: true,
            },
        );
    let (app, root) = test_app(mock);

    let response = app
        .oneshot(multipart_request(
            "/api/voice/voice-input",
            "file",
            "note.wav",
            "audio/wav",
            b"fake audio bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["transcript"], "2 tbsp sugar");
    assert_eq!(body["conversion"]["message"], "25 g");

    assert_eq!(uploads_left_behind(&root), 0);
}

#[tokio::test]
async fn test_voice_input_rejects_non_audio() {
    let (app, root) = test_app(MockInferenceClient::new());

    let response = app
        .oneshot(multipart_request(
            "/api/voice/voice-input",
            "file",
            "note.txt",
            "text/plain",
            b"not audio",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Only audio files are allowed");

    assert_eq!(uploads_left_behind(&root), 0);
}

#[tokio::test]
async fn test_create_post_without_token_rejected() {
    let (app, _root) = test_app(MockInferenceClient::new());

    let response = app
        .oneshot(json_request(
            "/api/forum/posts",
            serde_json::json!({"title": "Hello", "content": "First post"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_with_garbage_token_rejected() {
    let (app, _root) = test_app(MockInferenceClient::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/forum/posts")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::from(
                    serde_json::json!({"title": "Hello", "content": "First post"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ingredient_proxy_failure_uses_fixed_message() {
    let mock = MockInferenceClient::new().with_upstream_failure(500, "traceback: ...");
    let (app, _root) = test_app(mock);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/ingredients")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Failed to get ingredients.");
}
