pub mod convert;
pub mod error;
pub mod inference;
pub mod types;

pub use convert::Converter;
pub use error::InferenceError;
pub use inference::{HttpInferenceClient, InferenceClient, MockInferenceClient};
pub use types::{
    AudioConversion, ConversionOutcome, ConversionReply, ConversionRequest, ExtractionReply,
    ImageConversion, TranscriptionReply,
};
