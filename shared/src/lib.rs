pub mod messages;
pub mod types;

pub use types::{
    BoundingBox, CelebrityFace, MessageBody, RecognitionResult, RecognizeRequest,
    UnrecognizedFace,
};
