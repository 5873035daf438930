//! HTTP implementation of the inference client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio_util::io::ReaderStream;

use crate::error::InferenceError;
use crate::types::{ConversionReply, ConversionRequest, ExtractionReply, TranscriptionReply};

use super::InferenceClient;

/// Client for the external conversion/extraction service.
///
/// One attempt per call, no retry; media bodies are streamed from disk with
/// no size bound. The default reqwest configuration applies, so an outbound
/// call may block its task for as long as the upstream takes to answer.
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpInferenceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read a response body, surfacing non-2xx statuses as upstream errors
    /// with the raw body attached for server-side logging.
    async fn read_reply<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, InferenceError> {
        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(InferenceError::Upstream { status, body });
        }

        serde_json::from_str(&body).map_err(|e| InferenceError::Parse(e.to_string()))
    }

    /// Build a multipart form streaming `file` under the upstream's expected
    /// `file` field name.
    async fn file_form(file: &Path) -> Result<reqwest::multipart::Form, InferenceError> {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let handle = tokio::fs::File::open(file).await?;
        let part = reqwest::multipart::Part::stream(reqwest::Body::wrap_stream(
            ReaderStream::new(handle),
        ))
        .file_name(file_name);

        Ok(reqwest::multipart::Form::new().part("file", part))
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionReply, InferenceError> {
        tracing::debug!(confirm = request.confirm, "forwarding conversion request");
        let response = self
            .client
            .post(self.url("/convert/"))
            .json(request)
            .send()
            .await?;
        Self::read_reply(response).await
    }

    async fn extract_ingredients(&self, file: &Path) -> Result<ExtractionReply, InferenceError> {
        tracing::debug!(file = %file.display(), "forwarding image for extraction");
        let form = Self::file_form(file).await?;
        let response = self
            .client
            .post(self.url("/extract-ingredients/"))
            .multipart(form)
            .send()
            .await?;
        Self::read_reply(response).await
    }

    async fn transcribe_voice(&self, file: &Path) -> Result<TranscriptionReply, InferenceError> {
        tracing::debug!(file = %file.display(), "forwarding audio for transcription");
        let form = Self::file_form(file).await?;
        let response = self
            .client
            .post(self.url("/voice-input/"))
            .multipart(form)
            .send()
            .await?;
        Self::read_reply(response).await
    }

    async fn refresh_data(&self) -> Result<serde_json::Value, InferenceError> {
        let response = self.client.post(self.url("/refresh-data/")).send().await?;
        Self::read_reply(response).await
    }

    async fn list_ingredients(&self) -> Result<serde_json::Value, InferenceError> {
        let response = self.client.get(self.url("/ingredients/")).send().await?;
        Self::read_reply(response).await
    }

    async fn get_ingredient(&self, name: &str) -> Result<serde_json::Value, InferenceError> {
        let response = self
            .client
            .get(self.url(&format!("/ingredients/{}", name)))
            .send()
            .await?;
        Self::read_reply(response).await
    }

    async fn add_ingredient(
        &self,
        ingredient: &serde_json::Value,
    ) -> Result<serde_json::Value, InferenceError> {
        let response = self
            .client
            .post(self.url("/ingredients/"))
            .json(ingredient)
            .send()
            .await?;
        Self::read_reply(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpInferenceClient::new("http://inference.local:8000/");
        assert_eq!(
            client.url("/convert/"),
            "http://inference.local:8000/convert/"
        );
    }

    #[test]
    fn test_ingredient_url() {
        let client = HttpInferenceClient::new("http://inference.local:8000");
        assert_eq!(
            client.url(&format!("/ingredients/{}", "flour")),
            "http://inference.local:8000/ingredients/flour"
        );
    }
}
