use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Classical cascade detector backed by the `rustface` crate (SeetaFace).
///
/// Used as the fallback path when the ONNX model is unavailable or errors
/// out. It works on a grayscale view of the frame and is tuned for frontal
/// faces, trading recall for having no runtime dependency beyond the
/// cascade model file.
pub struct SeetaCascadeDetector {
    model: rustface::Model,
}

impl SeetaCascadeDetector {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read(model_path)?;
        let model = rustface::read_model(std::io::Cursor::new(data))?;
        Ok(Self { model })
    }
}

impl FaceDetector for SeetaCascadeDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        let gray = to_grayscale(frame);

        // The detector itself is not Send, so build it per call from the
        // shared model.
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let image = rustface::ImageData::new(&gray, frame.width(), frame.height());
        let faces = detector.detect(&image);

        Ok(faces
            .iter()
            .filter_map(|face| {
                let bbox = face.bbox();
                FaceRegion::from_bbox(
                    bbox.x() as f64,
                    bbox.y() as f64,
                    (bbox.x() + bbox.width() as i32) as f64,
                    (bbox.y() + bbox.height() as i32) as f64,
                    frame.width(),
                    frame.height(),
                )
            })
            .collect())
    }
}

/// ITU-R BT.601 luma conversion from interleaved RGB.
fn to_grayscale(frame: &Frame) -> Vec<u8> {
    frame
        .data()
        .chunks_exact(frame.channels() as usize)
        .map(|px| {
            (0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32).round() as u8
        })
        .collect()
}
