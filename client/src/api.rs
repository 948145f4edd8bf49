use async_trait::async_trait;
use celebrity_shared::messages::GENERIC_FAILURE;
use celebrity_shared::{MessageBody, RecognitionResult};
use reqwest::{header::ACCEPT, Client, Url};

use crate::config::ClientConfig;
use crate::encoding::EncodedPayload;
use crate::error::{ConfigError, ErrorInfo};

/// One request to the recognition endpoint.
#[async_trait]
pub trait RecognitionApi: Send + Sync {
    async fn recognize(&self, payload: &EncodedPayload) -> Result<RecognitionResult, ErrorInfo>;
}

/// `RecognitionApi` over HTTP: `POST {"imageBase64": ..}` to the configured endpoint.
#[derive(Clone, Debug)]
pub struct HttpRecognitionApi {
    client: Client,
    endpoint: Url,
}

impl HttpRecognitionApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecognitionApi for HttpRecognitionApi {
    async fn recognize(&self, payload: &EncodedPayload) -> Result<RecognitionResult, ErrorInfo> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(&payload.to_request())
            .send()
            .await
            .map_err(|e| ErrorInfo::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ErrorInfo::transport(e.to_string()))?;
        tracing::debug!(status = %status, bytes = body.len(), "recognition response received");

        if !status.is_success() {
            tracing::warn!(status = %status, body = %body, "recognition request failed");
            return Err(classify_failure(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ErrorInfo::transport(format!("invalid response body: {}", e)))
    }
}

/// Map a non-success envelope to an error. The fixed generic message marks an upstream failure.
pub fn classify_failure(status_code: u16, body: &str) -> ErrorInfo {
    match serde_json::from_str::<MessageBody>(body) {
        Ok(MessageBody { message }) if message == GENERIC_FAILURE => {
            ErrorInfo::Upstream { message }
        }
        Ok(MessageBody { message }) => ErrorInfo::Service {
            status_code,
            message,
        },
        Err(_) => ErrorInfo::Service {
            status_code,
            message: format!("HTTP error! status: {}", status_code),
        },
    }
}
