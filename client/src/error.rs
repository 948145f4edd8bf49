use thiserror::Error;

/// Why a submission did not produce a result. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorInfo {
    /// Rejected before anything touched the network.
    #[error("{reason}")]
    Validation { reason: String },

    /// The file could not be read, or the service could not be reached or understood.
    #[error("Could not reach the recognition service: {cause}")]
    Transport { cause: String },

    /// The service answered with a non-success status.
    #[error("Request failed with status {status_code}: {message}")]
    Service { status_code: u16, message: String },

    /// The service reported that recognition itself failed.
    #[error("Recognition failed: {message}")]
    Upstream { message: String },

    /// The caller reset or picked another file while the request was in flight.
    #[error("The submission was abandoned before a response arrived.")]
    Abandoned,
}

impl ErrorInfo {
    pub fn validation(reason: impl Into<String>) -> Self {
        ErrorInfo::Validation {
            reason: reason.into(),
        }
    }

    pub fn transport(cause: impl Into<String>) -> Self {
        ErrorInfo::Transport {
            cause: cause.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ErrorInfo::Validation { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API URL is not configured. Please check your environment variables.")]
    MissingApiUrl,

    #[error("invalid API URL {url}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
