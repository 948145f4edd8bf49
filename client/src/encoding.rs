use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use celebrity_shared::RecognizeRequest;

use crate::error::ErrorInfo;
use crate::file::SelectedFile;

const BASE64_MARKER: &str = "base64,";

/// File-read primitive: turns a selected file into a `data:` URL.
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_as_data_url(&self, file: &SelectedFile) -> Result<String, ErrorInfo>;
}

/// Reads the file's bytes and encodes them as `data:<type>;base64,<payload>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlReader;

#[async_trait]
impl FileReader for DataUrlReader {
    async fn read_as_data_url(&self, file: &SelectedFile) -> Result<String, ErrorInfo> {
        let bytes = file
            .read()
            .await
            .map_err(|e| ErrorInfo::transport(format!("could not read {}: {}", file.name, e)))?;

        Ok(format!(
            "data:{};base64,{}",
            file.media_type,
            STANDARD.encode(bytes)
        ))
    }
}

/// The base64 text sent for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub media_type: String,
    pub base64: String,
}

impl EncodedPayload {
    /// Keep only the payload after the `base64,` marker.
    pub fn from_data_url(media_type: &str, data_url: &str) -> Result<Self, ErrorInfo> {
        let (_, payload) = data_url
            .split_once(BASE64_MARKER)
            .ok_or_else(|| ErrorInfo::transport("file could not be encoded as base64"))?;

        Ok(Self {
            media_type: media_type.to_string(),
            base64: payload.to_string(),
        })
    }

    pub fn to_request(&self) -> RecognizeRequest {
        RecognizeRequest {
            image_base64: self.base64.clone(),
        }
    }
}

pub async fn encode(
    reader: &dyn FileReader,
    file: &SelectedFile,
) -> Result<EncodedPayload, ErrorInfo> {
    let data_url = reader.read_as_data_url(file).await?;
    EncodedPayload::from_data_url(&file.media_type, &data_url)
}
