//! Thin proxy passthroughs for ingredient data held by the inference
//! service. Bodies are relayed verbatim in both directions; upstream failure
//! detail is logged here and never echoed to clients.

pub mod create;
pub mod get;
pub mod list;
pub mod refresh;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/refresh-data", post(refresh::refresh_data))
        .route(
            "/ingredients",
            get(list::list_ingredients).post(create::add_ingredient),
        )
        .route("/ingredients/{name}", get(get::get_ingredient))
}

#[derive(OpenApi)]
#[openapi(paths(
    list::list_ingredients,
    get::get_ingredient,
    create::add_ingredient,
    refresh::refresh_data,
))]
pub struct ApiDoc;
