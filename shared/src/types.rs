use serde::{Deserialize, Serialize};

// ========== REQUEST ==========
/// Body of `POST /rekognition`. The payload carries no data-URI prefix.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeRequest {
    pub image_base64: String,
}

// ========== FACES ==========
/// Face geometry as ratios of the overall image size.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CelebrityFace {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UnrecognizedFace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

// ========== RESULT ==========
/// Success envelope. Both sequences are always present on the wire, possibly empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    #[serde(default)]
    pub celebrity_faces: Vec<CelebrityFace>,
    #[serde(default)]
    pub unrecognized_faces: Vec<UnrecognizedFace>,
}

impl RecognitionResult {
    pub fn is_empty(&self) -> bool {
        self.celebrity_faces.is_empty() && self.unrecognized_faces.is_empty()
    }

    /// Human-readable report, one line per recognized celebrity.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        match self.celebrity_faces.len() {
            0 => lines.push("No celebrities detected in this image.".to_string()),
            1 => lines.push("Found 1 celebrity".to_string()),
            n => lines.push(format!("Found {} celebrities", n)),
        }

        for face in &self.celebrity_faces {
            match face.match_confidence {
                Some(score) => lines.push(format!("  {}  {}% match", face.name, score.round())),
                None => lines.push(format!("  {}", face.name)),
            }
        }

        if !self.unrecognized_faces.is_empty() {
            lines.push(format!(
                "{} face(s) could not be recognized",
                self.unrecognized_faces.len()
            ));
        }

        lines.join("\n")
    }
}

// ========== ERROR ==========
/// Failure envelope.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
