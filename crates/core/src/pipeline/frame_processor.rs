use crate::anonymize::domain::region_anonymizer::RegionAnonymizer;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;

/// Detect-then-anonymize step for one frame.
///
/// Single source of truth for "protect one frame": the image, batch, and
/// video paths all funnel through here, so they cannot drift apart on
/// detection order or region handling.
pub struct FrameProcessor {
    detector: Box<dyn FaceDetector>,
    anonymizer: Box<dyn RegionAnonymizer>,
}

impl FrameProcessor {
    pub fn new(detector: Box<dyn FaceDetector>, anonymizer: Box<dyn RegionAnonymizer>) -> Self {
        Self {
            detector,
            anonymizer,
        }
    }

    /// Runs detection and applies the anonymizer over the detected regions,
    /// in detector emission order. Returns how many regions were treated.
    pub fn process(&mut self, frame: &mut Frame) -> Result<usize, Box<dyn std::error::Error>> {
        let regions = self.detector.detect(frame)?;
        self.anonymizer.apply(frame, &regions)?;
        Ok(regions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::region::FaceRegion;
    use std::sync::{Arc, Mutex};

    struct StubDetector {
        regions: Vec<FaceRegion>,
    }

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
            Ok(self.regions.clone())
        }
    }

    struct RecordingAnonymizer {
        calls: Arc<Mutex<Vec<Vec<FaceRegion>>>>,
    }

    impl RegionAnonymizer for RecordingAnonymizer {
        fn apply(
            &self,
            _frame: &mut Frame,
            regions: &[FaceRegion],
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.calls.lock().unwrap().push(regions.to_vec());
            Ok(())
        }
    }

    fn frame() -> Frame {
        Frame::new(vec![128u8; 50 * 50 * 3], 50, 50, 3, 0)
    }

    #[test]
    fn test_returns_region_count() {
        let regions = vec![
            FaceRegion::new(0, 0, 10, 10).unwrap(),
            FaceRegion::new(20, 20, 10, 10).unwrap(),
        ];
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut processor = FrameProcessor::new(
            Box::new(StubDetector { regions }),
            Box::new(RecordingAnonymizer {
                calls: calls.clone(),
            }),
        );

        let count = processor.process(&mut frame()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(calls.lock().unwrap()[0].len(), 2);
    }

    #[test]
    fn test_zero_faces_still_invokes_anonymizer_with_empty_list() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut processor = FrameProcessor::new(
            Box::new(StubDetector {
                regions: Vec::new(),
            }),
            Box::new(RecordingAnonymizer {
                calls: calls.clone(),
            }),
        );

        let count = processor.process(&mut frame()).unwrap();
        assert_eq!(count, 0);
        assert!(calls.lock().unwrap()[0].is_empty());
    }

    #[test]
    fn test_regions_passed_in_detector_order() {
        let regions = vec![
            FaceRegion::new(30, 30, 5, 5).unwrap(),
            FaceRegion::new(1, 1, 5, 5).unwrap(),
        ];
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut processor = FrameProcessor::new(
            Box::new(StubDetector {
                regions: regions.clone(),
            }),
            Box::new(RecordingAnonymizer {
                calls: calls.clone(),
            }),
        );

        processor.process(&mut frame()).unwrap();
        assert_eq!(calls.lock().unwrap()[0], regions);
    }
}
