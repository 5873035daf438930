pub mod api;
pub mod auth;
pub mod db;
pub mod models;
pub mod schema;
pub mod state;
pub mod uploads;
pub mod validation;

pub use state::AppState;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa_swagger_ui::SwaggerUi;

/// Get a pooled connection or bail out of the handler with a 500.
#[macro_export]
macro_rules! get_conn {
    ($pool:expr) => {
        match $pool.get() {
            Ok(conn) => conn,
            Err(_) => {
                return (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json($crate::api::ErrorResponse {
                        error: "Database connection failed".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    };
}

/// Assemble the application router: API routes, static uploads, Swagger UI,
/// and CORS. The trace layer is added by the binary.
pub fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());
    let uploads_root = state.uploads.root().to_path_buf();

    Router::new()
        .merge(api::public::router())
        .merge(api::forum::router())
        .merge(api::convert::router())
        .merge(api::image::router())
        .merge(api::voice::router())
        .merge(api::ingredients::router())
        .nest_service("/uploads", ServeDir::new(uploads_root))
        .merge(swagger_ui)
        .with_state(state)
        .layer(CorsLayer::permissive())
}
