//! Client abstraction for the external inference service.
//!
//! The service is an opaque HTTP collaborator; this module defines the trait
//! the rest of the crate talks to, plus a mock implementation for tests.

mod http;

pub use http::HttpInferenceClient;

use async_trait::async_trait;
use std::path::Path;

use crate::error::InferenceError;
use crate::types::{ConversionReply, ConversionRequest, ExtractionReply, TranscriptionReply};

/// Trait for inference-service clients, enabling mockability in tests.
///
/// Implementations make a single attempt per call; transient upstream
/// failures surface immediately as errors.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Convert a recipe-text measurement.
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionReply, InferenceError>;

    /// Extract recipe text from an uploaded image file.
    async fn extract_ingredients(&self, file: &Path) -> Result<ExtractionReply, InferenceError>;

    /// Transcribe an uploaded audio file.
    async fn transcribe_voice(&self, file: &Path) -> Result<TranscriptionReply, InferenceError>;

    /// Ask the service to reload its ingredient data.
    async fn refresh_data(&self) -> Result<serde_json::Value, InferenceError>;

    /// List all known ingredients.
    async fn list_ingredients(&self) -> Result<serde_json::Value, InferenceError>;

    /// Fetch a single ingredient record.
    async fn get_ingredient(&self, name: &str) -> Result<serde_json::Value, InferenceError>;

    /// Register a new ingredient.
    async fn add_ingredient(
        &self,
        ingredient: &serde_json::Value,
    ) -> Result<serde_json::Value, InferenceError>;
}

/// Mock inference client for testing.
///
/// Conversion replies are keyed on the full request, so the two rounds of the
/// suggestion protocol can be scripted independently.
#[derive(Debug, Default)]
pub struct MockInferenceClient {
    replies: Vec<(ConversionRequest, ConversionReply)>,
    extracted_text: Option<String>,
    transcript: Option<String>,
    upstream_failure: Option<(u16, String)>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a reply for an exact conversion request.
    pub fn with_reply(mut self, request: ConversionRequest, reply: ConversionReply) -> Self {
        self.replies.push((request, reply));
        self
    }

    /// Script the text that image extraction will return.
    pub fn with_extracted_text(mut self, text: &str) -> Self {
        self.extracted_text = Some(text.to_string());
        self
    }

    /// Script the transcript that voice transcription will return.
    pub fn with_transcript(mut self, transcript: &str) -> Self {
        self.transcript = Some(transcript.to_string());
        self
    }

    /// Make every call fail with an upstream error.
    pub fn with_upstream_failure(mut self, status: u16, body: &str) -> Self {
        self.upstream_failure = Some((status, body.to_string()));
        self
    }

    fn check_failure(&self) -> Result<(), InferenceError> {
        match &self.upstream_failure {
            Some((status, body)) => Err(InferenceError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionReply, InferenceError> {
        self.check_failure()?;
        self.replies
            .iter()
            .find(|(scripted, _)| scripted == request)
            .map(|(_, reply)| reply.clone())
            .ok_or_else(|| {
                InferenceError::Parse(format!(
                    "no mock reply for request: {:?}",
                    request.recipe_text
                ))
            })
    }

    async fn extract_ingredients(&self, _file: &Path) -> Result<ExtractionReply, InferenceError> {
        self.check_failure()?;
        Ok(ExtractionReply {
            extracted_text: self.extracted_text.clone(),
        })
    }

    async fn transcribe_voice(&self, _file: &Path) -> Result<TranscriptionReply, InferenceError> {
        self.check_failure()?;
        Ok(TranscriptionReply {
            transcript: self.transcript.clone(),
        })
    }

    async fn refresh_data(&self) -> Result<serde_json::Value, InferenceError> {
        self.check_failure()?;
        Ok(serde_json::json!({ "message": "Reloaded data." }))
    }

    async fn list_ingredients(&self) -> Result<serde_json::Value, InferenceError> {
        self.check_failure()?;
        Ok(serde_json::json!([]))
    }

    async fn get_ingredient(&self, name: &str) -> Result<serde_json::Value, InferenceError> {
        self.check_failure()?;
        Ok(serde_json::json!({ "name": name }))
    }

    async fn add_ingredient(
        &self,
        ingredient: &serde_json::Value,
    ) -> Result<serde_json::Value, InferenceError> {
        self.check_failure()?;
        Ok(ingredient.clone())
    }
}
