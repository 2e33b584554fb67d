use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Domain interface for face detection.
///
/// Zero faces is an empty list, never an error; errors are reserved for the
/// detector itself failing (model load, inference, malformed frame).
/// Implementations may be stateful, hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>>;
}
