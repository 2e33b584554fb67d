use image::codecs::jpeg::JpegEncoder;

use crate::error::ProcessError;
use crate::shared::frame::Frame;

use super::frame_processor::FrameProcessor;

/// Result of anonymizing one still image.
pub struct ImageOutcome {
    pub jpeg: Vec<u8>,
    pub face_count: usize,
}

/// Single-image pipeline: decode → detect → anonymize → encode JPEG.
///
/// Operates on in-memory bytes, so the batch path can reuse it without
/// touching the filesystem. Output dimensions always match the input.
pub struct AnonymizeImageUseCase {
    processor: FrameProcessor,
}

impl AnonymizeImageUseCase {
    pub fn new(processor: FrameProcessor) -> Self {
        Self { processor }
    }

    pub fn execute(&mut self, bytes: &[u8]) -> Result<ImageOutcome, ProcessError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| ProcessError::Decode(e.to_string()))?
            .to_rgb8();
        let (width, height) = decoded.dimensions();
        let mut frame = Frame::new(decoded.into_raw(), width, height, 3, 0);

        let face_count = self
            .processor
            .process(&mut frame)
            .map_err(|e| ProcessError::Frame(e.to_string()))?;

        let mut jpeg = Vec::new();
        JpegEncoder::new(&mut jpeg)
            .encode(
                frame.data(),
                frame.width(),
                frame.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| ProcessError::Encode(e.to_string()))?;

        Ok(ImageOutcome { jpeg, face_count })
    }
}
