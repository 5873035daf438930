//! Wire types for the external conversion service.
//!
//! The upstream service answers `/convert/` with a loosely-shaped JSON object;
//! `ConversionReply` captures the fields we rely on and `ConversionOutcome`
//! turns the "is a suggestion present" probe into a proper tagged type.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Request body for the upstream `/convert/` endpoint.
///
/// `confirm` and `confirmed_ingredient` drive the second round of the
/// suggestion protocol; a first-round call sends `false` / `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub recipe_text: String,
    #[serde(default)]
    pub confirm: bool,
    #[serde(default)]
    pub confirmed_ingredient: Option<String>,
}

impl ConversionRequest {
    pub fn new(recipe_text: impl Into<String>) -> Self {
        Self {
            recipe_text: recipe_text.into(),
            confirm: false,
            confirmed_ingredient: None,
        }
    }
}

/// Raw reply from the upstream `/convert/` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversionReply {
    pub message: Option<String>,
    pub suggested_ingredient: Option<String>,
    #[serde(default)]
    pub confirm_conversion: bool,
}

impl ConversionReply {
    /// Collapse the dynamic reply shape into a tagged outcome.
    ///
    /// A reply with neither a suggestion nor a message is malformed.
    pub fn into_outcome(self) -> Result<ConversionOutcome, InferenceError> {
        if let Some(suggested_ingredient) = self.suggested_ingredient {
            return Ok(ConversionOutcome::NeedsConfirmation {
                message: self.message.unwrap_or_else(|| {
                    format!("Did you mean '{}'?", suggested_ingredient)
                }),
                suggested_ingredient,
            });
        }

        match self.message {
            Some(message) => Ok(ConversionOutcome::Resolved { message }),
            None => Err(InferenceError::Parse(
                "conversion reply carried neither a message nor a suggestion".to_string(),
            )),
        }
    }
}

/// Final result of a conversion round.
///
/// `NeedsConfirmation` means the upstream did not recognize the ingredient
/// and proposed a substitute; resolving it is the client's decision, not
/// ours. How this is shaped on the client wire is the server's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    NeedsConfirmation {
        message: String,
        suggested_ingredient: String,
    },
    Resolved {
        message: String,
    },
}

/// Raw reply from the upstream `/extract-ingredients/` endpoint.
///
/// The upstream also attaches a first-pass `conversion_result`; the
/// orchestrator re-runs the text path itself, so only the text is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionReply {
    pub extracted_text: Option<String>,
}

/// Raw reply from the upstream `/voice-input/` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionReply {
    pub transcript: Option<String>,
}

/// Result of an image-driven conversion: the text read off the image plus
/// the first-round conversion of that text.
#[derive(Debug, Clone)]
pub struct ImageConversion {
    pub extracted_text: String,
    pub conversion: ConversionOutcome,
}

/// Result of an audio-driven conversion.
#[derive(Debug, Clone)]
pub struct AudioConversion {
    pub transcript: String,
    pub conversion: ConversionOutcome,
}
