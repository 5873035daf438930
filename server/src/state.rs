use axum::extract::FromRef;
use std::sync::Arc;

use trivet_core::{Converter, InferenceClient};

use crate::auth::TokenService;
use crate::db::DbPool;
use crate::uploads::UploadStore;

/// Shared handle to the inference-service client.
pub type InferenceHandle = Arc<dyn InferenceClient>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    pub tokens: TokenService,
    pub inference: InferenceHandle,
    pub converter: Converter,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        tokens: TokenService,
        inference: InferenceHandle,
        uploads: UploadStore,
    ) -> Self {
        let converter = Converter::new(inference.clone());
        Self {
            pool: Arc::new(pool),
            tokens,
            inference,
            converter,
            uploads: Arc::new(uploads),
        }
    }
}

impl FromRef<AppState> for Arc<DbPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for InferenceHandle {
    fn from_ref(state: &AppState) -> Self {
        state.inference.clone()
    }
}

impl FromRef<AppState> for Converter {
    fn from_ref(state: &AppState) -> Self {
        state.converter.clone()
    }
}

impl FromRef<AppState> for Arc<UploadStore> {
    fn from_ref(state: &AppState) -> Self {
        state.uploads.clone()
    }
}
