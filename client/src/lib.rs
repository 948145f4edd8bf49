//! Client side of celebrity recognition: pick an image, validate it, encode it, send it,
//! and interpret the response.

pub mod api;
pub mod config;
pub mod controller;
pub mod encoding;
pub mod error;
pub mod file;
pub mod preview;
pub mod validation;

pub use api::{HttpRecognitionApi, RecognitionApi};
pub use config::ClientConfig;
pub use controller::{Completion, SubmissionController, SubmissionState};
pub use encoding::{DataUrlReader, EncodedPayload, FileReader};
pub use error::{ConfigError, ErrorInfo};
pub use file::SelectedFile;
pub use preview::{PreviewHandle, PreviewRegistry, PreviewStore};
pub use validation::{validate, ValidationResult};

pub use celebrity_shared::{CelebrityFace, RecognitionResult, UnrecognizedFace};
