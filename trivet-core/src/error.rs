use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("request to inference service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("inference service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("failed to parse inference reply: {0}")]
    Parse(String),

    #[error("failed to read media file: {0}")]
    Media(#[from] std::io::Error),
}
