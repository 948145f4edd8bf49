//! Client and handler wired together in-process, without a network hop.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use celebrity_atoms::recognition::{recognize_handler, CelebrityRecognizer, RecognitionError};
use celebrity_client::api::classify_failure;
use celebrity_client::{
    CelebrityFace, DataUrlReader, EncodedPayload, ErrorInfo, PreviewRegistry, RecognitionApi,
    RecognitionResult, SelectedFile, SubmissionController, SubmissionState,
};
use lambda_http::Body;

#[derive(Default)]
struct RecordingRecognizer {
    result: Option<RecognitionResult>,
    images: Mutex<Vec<Vec<u8>>>,
}

#[async_trait]
impl CelebrityRecognizer for RecordingRecognizer {
    async fn recognize_celebrities(
        &self,
        image: Vec<u8>,
    ) -> Result<RecognitionResult, RecognitionError> {
        self.images.lock().unwrap().push(image);
        self.result
            .clone()
            .ok_or_else(|| RecognitionError::Upstream("ThrottlingException: slow down".to_string()))
    }
}

/// Calls the Lambda's recognition handler directly.
struct InProcessLambda {
    recognizer: Arc<RecordingRecognizer>,
}

#[async_trait]
impl RecognitionApi for InProcessLambda {
    async fn recognize(&self, payload: &EncodedPayload) -> Result<RecognitionResult, ErrorInfo> {
        let body = Body::Text(serde_json::to_string(&payload.to_request()).unwrap());
        let resp = recognize_handler(self.recognizer.as_ref(), &body)
            .await
            .map_err(|e| ErrorInfo::transport(e.to_string()))?;

        let text = match resp.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Body::Empty => String::new(),
        };

        if resp.status().is_success() {
            serde_json::from_str(&text).map_err(|e| ErrorInfo::transport(e.to_string()))
        } else {
            Err(classify_failure(resp.status().as_u16(), &text))
        }
    }
}

fn pipeline(result: Option<RecognitionResult>) -> (SubmissionController, Arc<RecordingRecognizer>) {
    let recognizer = Arc::new(RecordingRecognizer {
        result,
        ..Default::default()
    });
    let controller = SubmissionController::new(
        Arc::new(InProcessLambda {
            recognizer: recognizer.clone(),
        }),
        Arc::new(DataUrlReader),
        Box::new(PreviewRegistry::default()),
    );
    (controller, recognizer)
}

#[tokio::test]
async fn recognized_celebrity_reaches_the_caller() {
    let (controller, recognizer) = pipeline(Some(RecognitionResult {
        celebrity_faces: vec![CelebrityFace {
            name: "Jane Doe".to_string(),
            confidence: Some(99.9),
            match_confidence: Some(98.2),
            ..Default::default()
        }],
        unrecognized_faces: Vec::new(),
    }));
    let jpeg = SelectedFile::from_bytes("jane.jpg", "image/jpeg", vec![0x5A; 2 * 1024 * 1024]);

    let result = controller.run(jpeg).await.unwrap();

    assert_eq!(result.celebrity_faces.len(), 1);
    assert_eq!(result.celebrity_faces[0].name, "Jane Doe");
    assert_eq!(result.celebrity_faces[0].match_confidence, Some(98.2));
    assert!(result.unrecognized_faces.is_empty());
    assert!(matches!(controller.state().await, SubmissionState::Succeeded(_)));
    assert_eq!(recognizer.images.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn handler_sees_the_exact_file_bytes() {
    let (controller, recognizer) = pipeline(Some(RecognitionResult::default()));
    let original: Vec<u8> = (0u32..50_000).map(|i| (i * 31 % 251) as u8).collect();

    controller
        .run(SelectedFile::from_bytes("noise.png", "image/png", original.clone()))
        .await
        .unwrap();

    assert_eq!(recognizer.images.lock().unwrap()[0], original);
}

#[tokio::test]
async fn empty_recognition_is_a_success() {
    let (controller, _) = pipeline(Some(RecognitionResult::default()));

    let result = controller
        .run(SelectedFile::from_bytes("empty.png", "image/png", vec![1, 2, 3]))
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(
        controller.state().await,
        SubmissionState::Succeeded(RecognitionResult::default())
    );
}

#[tokio::test]
async fn upstream_failure_surfaces_only_the_generic_message() {
    let (controller, _) = pipeline(None);

    let err = controller
        .run(SelectedFile::from_bytes("face.jpg", "image/jpeg", vec![9; 128]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ErrorInfo::Upstream {
            message: "Something went wrong".to_string()
        }
    );
    assert!(!err.to_string().contains("Throttling"));
    assert!(matches!(controller.state().await, SubmissionState::Failed(_)));
}

#[tokio::test]
async fn oversized_file_never_reaches_the_handler() {
    let (controller, recognizer) = pipeline(Some(RecognitionResult::default()));

    let err = controller
        .run(SelectedFile::from_bytes("big.png", "image/png", vec![0; 6 * 1024 * 1024]))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(controller.state().await, SubmissionState::Idle);
    assert!(recognizer.images.lock().unwrap().is_empty());
}
