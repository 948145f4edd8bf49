use celebrity_shared::messages::GENERIC_FAILURE;
use thiserror::Error;

/// Everything that can stop a recognition request from producing a result.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// A request precondition failed. The message is safe to return to the caller.
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("imageBase64 could not be decoded: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("celebrity recognition failed: {0}")]
    Upstream(String),
}

impl RecognitionError {
    /// Message placed in the response envelope.
    pub fn public_message(&self) -> &'static str {
        match self {
            RecognitionError::BadRequest(message) => message,
            RecognitionError::Decode(_) | RecognitionError::Upstream(_) => GENERIC_FAILURE,
        }
    }
}
