//! Conversion orchestrator.
//!
//! Coordinates the inference gateway for the three input paths: raw text,
//! image-extracted text, and audio-transcribed text. The ingredient
//! suggestion loop is a two-round client protocol: when the upstream answers
//! with `suggested_ingredient`, the unresolved suggestion is returned upward
//! and the client re-invokes with `confirm = true` and either the suggested
//! name or `None` (proceed without substitution). No suggestion state is held
//! server-side between rounds; identical inputs give identical results.

use std::path::Path;
use std::sync::Arc;

use crate::error::InferenceError;
use crate::inference::InferenceClient;
use crate::types::{AudioConversion, ConversionOutcome, ConversionRequest, ImageConversion};

#[derive(Clone)]
pub struct Converter {
    client: Arc<dyn InferenceClient>,
}

impl Converter {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// Run one round of the conversion protocol over the text path.
    pub async fn convert(
        &self,
        recipe_text: &str,
        confirm: bool,
        confirmed_ingredient: Option<String>,
    ) -> Result<ConversionOutcome, InferenceError> {
        let request = ConversionRequest {
            recipe_text: recipe_text.to_string(),
            confirm,
            confirmed_ingredient,
        };

        let reply = self.client.convert(&request).await?;
        reply.into_outcome()
    }

    /// Extract recipe text from an uploaded image, then run the first
    /// conversion round on it.
    ///
    /// The caller owns the temporary file and must release it whatever this
    /// returns.
    pub async fn convert_from_image(&self, file: &Path) -> Result<ImageConversion, InferenceError> {
        let extraction = self.client.extract_ingredients(file).await?;

        let extracted_text = extraction
            .extracted_text
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                InferenceError::Parse("no text extracted from image".to_string())
            })?;

        let conversion = self.convert(&extracted_text, false, None).await?;

        Ok(ImageConversion {
            extracted_text,
            conversion,
        })
    }

    /// Transcribe an uploaded audio file, then run the first conversion
    /// round on the transcript.
    pub async fn convert_from_audio(&self, file: &Path) -> Result<AudioConversion, InferenceError> {
        let transcription = self.client.transcribe_voice(file).await?;

        let transcript = transcription
            .transcript
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                InferenceError::Parse("could not transcribe any speech".to_string())
            })?;

        let conversion = self.convert(&transcript, false, None).await?;

        Ok(AudioConversion {
            transcript,
            conversion,
        })
    }
}
