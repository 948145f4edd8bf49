use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::{self as rekognition, Celebrity, ComparedFace, Image};
use aws_sdk_rekognition::Client as RekognitionClient;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use celebrity_shared::{BoundingBox, CelebrityFace, RecognitionResult, UnrecognizedFace};

use super::model::RecognitionError;

/// The external recognition capability: raw image bytes in, face records out.
#[async_trait]
pub trait CelebrityRecognizer: Send + Sync {
    async fn recognize_celebrities(
        &self,
        image: Vec<u8>,
    ) -> Result<RecognitionResult, RecognitionError>;
}

/// `CelebrityRecognizer` backed by AWS Rekognition `RecognizeCelebrities`.
#[derive(Clone, Debug)]
pub struct RekognitionRecognizer {
    client: RekognitionClient,
}

impl RekognitionRecognizer {
    pub fn new(client: RekognitionClient) -> Self {
        Self { client }
    }

    /// Build a client from the Lambda environment, optionally pinned to `region`.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;

        Self::new(RekognitionClient::new(&config))
    }
}

#[async_trait]
impl CelebrityRecognizer for RekognitionRecognizer {
    async fn recognize_celebrities(
        &self,
        image: Vec<u8>,
    ) -> Result<RecognitionResult, RecognitionError> {
        let output = self
            .client
            .recognize_celebrities()
            .image(Image::builder().bytes(Blob::new(image)).build())
            .send()
            .await
            .map_err(|e| RecognitionError::Upstream(DisplayErrorContext(&e).to_string()))?;

        // An absent list and an empty list both come back as an empty slice.
        Ok(RecognitionResult {
            celebrity_faces: output.celebrity_faces().iter().map(celebrity_face).collect(),
            unrecognized_faces: output
                .unrecognized_faces()
                .iter()
                .map(unrecognized_face)
                .collect(),
        })
    }
}

/// Decode the request payload into image bytes.
pub fn decode_image(image_base64: &str) -> Result<Vec<u8>, RecognitionError> {
    Ok(STANDARD.decode(image_base64.trim())?)
}

/// Decode the payload and run it through the recognizer exactly once.
pub async fn recognize(
    recognizer: &dyn CelebrityRecognizer,
    image_base64: &str,
) -> Result<RecognitionResult, RecognitionError> {
    let image = decode_image(image_base64)?;
    tracing::info!("🔎 recognize: decoded {} image bytes", image.len());

    recognizer.recognize_celebrities(image).await
}

pub fn celebrity_face(celebrity: &Celebrity) -> CelebrityFace {
    CelebrityFace {
        name: celebrity.name().unwrap_or_default().to_string(),
        id: celebrity.id().map(|s| s.to_string()),
        confidence: celebrity.face().and_then(|face| face.confidence()),
        match_confidence: celebrity.match_confidence(),
        urls: celebrity.urls().to_vec(),
    }
}

pub fn unrecognized_face(face: &ComparedFace) -> UnrecognizedFace {
    UnrecognizedFace {
        bounding_box: face.bounding_box().map(bounding_box),
        confidence: face.confidence(),
    }
}

fn bounding_box(bbox: &rekognition::BoundingBox) -> BoundingBox {
    BoundingBox {
        width: bbox.width(),
        height: bbox.height(),
        left: bbox.left(),
        top: bbox.top(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_standard_base64() {
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello".to_vec());
    }

    #[test]
    fn rejects_text_that_is_not_base64() {
        let err = decode_image("not base64 at all!").unwrap_err();
        assert!(matches!(err, RecognitionError::Decode(_)));
    }

    #[test]
    fn maps_celebrity_with_face_confidence() {
        let celebrity = Celebrity::builder()
            .name("Jane Doe")
            .id("1a2b3c")
            .match_confidence(98.2)
            .urls("www.imdb.com/name/nm0000001")
            .face(ComparedFace::builder().confidence(99.9).build())
            .build();

        let face = celebrity_face(&celebrity);

        assert_eq!(face.name, "Jane Doe");
        assert_eq!(face.id.as_deref(), Some("1a2b3c"));
        assert_eq!(face.match_confidence, Some(98.2));
        assert_eq!(face.confidence, Some(99.9));
        assert_eq!(face.urls, vec!["www.imdb.com/name/nm0000001".to_string()]);
    }

    #[test]
    fn maps_unrecognized_face_geometry() {
        let face = ComparedFace::builder()
            .confidence(87.5)
            .bounding_box(
                rekognition::BoundingBox::builder()
                    .width(0.25)
                    .height(0.5)
                    .left(0.1)
                    .build(),
            )
            .build();

        let mapped = unrecognized_face(&face);

        assert_eq!(mapped.confidence, Some(87.5));
        let bbox = mapped.bounding_box.unwrap();
        assert_eq!(bbox.width, Some(0.25));
        assert_eq!(bbox.height, Some(0.5));
        assert_eq!(bbox.left, Some(0.1));
        assert_eq!(bbox.top, None);
    }

    #[test]
    fn celebrity_without_face_has_no_confidence() {
        let face = celebrity_face(&Celebrity::builder().name("John Roe").build());
        assert_eq!(face.confidence, None);
        assert!(face.urls.is_empty());
    }
}
