use celebrity_shared::messages::{BODY_NOT_JSON, BODY_REQUIRED, IMAGE_BASE64_REQUIRED};
use celebrity_shared::{MessageBody, RecognizeRequest};
use lambda_http::{http::StatusCode, Body, Error as LambdaError, Response};
use serde::Serialize;

use super::model::RecognitionError;
use super::service::{self, CelebrityRecognizer};

/// HTTP Handler: POST /rekognition
///
/// Always answers with an envelope: 200 with the face lists, or 400 with a message.
pub async fn recognize_handler(
    recognizer: &dyn CelebrityRecognizer,
    body: &Body,
) -> Result<Response<Body>, LambdaError> {
    let outcome = match parse_request(body) {
        Ok(request) => {
            tracing::info!(
                "📥 recognize_handler: imageBase64 length={}",
                request.image_base64.len()
            );
            service::recognize(recognizer, &request.image_base64).await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => {
            tracing::info!(
                "✅ recognize_handler success: celebrities={}, unrecognized={}",
                result.celebrity_faces.len(),
                result.unrecognized_faces.len(),
            );
            json_response(StatusCode::OK, &result)
        }
        Err(e @ RecognitionError::BadRequest(_)) => {
            tracing::warn!("⚠️ recognize_handler rejected request: {}", e);
            json_response(StatusCode::BAD_REQUEST, &MessageBody::new(e.public_message()))
        }
        Err(e) => {
            tracing::error!("❌ recognize_handler failed: {}", e);
            json_response(StatusCode::BAD_REQUEST, &MessageBody::new(e.public_message()))
        }
    }
}

/// Check the body preconditions in order: present, JSON, non-empty `imageBase64`.
pub fn parse_request(body: &Body) -> Result<RecognizeRequest, RecognitionError> {
    let bytes: &[u8] = match body {
        Body::Empty => return Err(RecognitionError::BadRequest(BODY_REQUIRED)),
        Body::Text(text) => text.as_bytes(),
        Body::Binary(bytes) => bytes,
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(RecognitionError::BadRequest(BODY_REQUIRED));
    }

    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|_| RecognitionError::BadRequest(BODY_NOT_JSON))?;

    match value.get("imageBase64").and_then(|v| v.as_str()) {
        Some(image_base64) if !image_base64.trim().is_empty() => Ok(RecognizeRequest {
            image_base64: image_base64.to_string(),
        }),
        _ => Err(RecognitionError::BadRequest(IMAGE_BASE64_REQUIRED)),
    }
}

pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, LambdaError> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(body)?.into())
        .map_err(Box::new)?)
}
