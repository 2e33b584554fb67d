use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Try-then-fallback detector chain.
///
/// Runs the primary (model-based) detector and, when it fails for any
/// reason, retries the frame with the classical fallback. A failing
/// fallback degrades to "no faces found". `detect` therefore never
/// returns an error: the pipeline's job is privacy protection, and a
/// frame with missed faces beats an aborted request.
///
/// The primary slot is optional so a failed model load at startup can
/// route every frame straight to the fallback.
pub struct FallbackDetector {
    primary: Option<Box<dyn FaceDetector>>,
    fallback: Box<dyn FaceDetector>,
    primary_warned: bool,
}

impl FallbackDetector {
    pub fn new(primary: Option<Box<dyn FaceDetector>>, fallback: Box<dyn FaceDetector>) -> Self {
        Self {
            primary,
            fallback,
            primary_warned: false,
        }
    }
}

impl FaceDetector for FallbackDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.detect(frame) {
                Ok(regions) => return Ok(regions),
                Err(e) => {
                    if !self.primary_warned {
                        log::warn!("Primary face detector failed ({e}), using cascade fallback");
                        self.primary_warned = true;
                    }
                }
            }
        }

        match self.fallback.detect(frame) {
            Ok(regions) => Ok(regions),
            Err(e) => {
                log::warn!("Fallback face detector failed ({e}), treating frame as faceless");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector {
        regions: Vec<FaceRegion>,
        calls: usize,
    }

    impl FixedDetector {
        fn new(regions: Vec<FaceRegion>) -> Self {
            Self { regions, calls: 0 }
        }
    }

    impl FaceDetector for FixedDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
            self.calls += 1;
            Ok(self.regions.clone())
        }
    }

    struct BrokenDetector;

    impl FaceDetector for BrokenDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
            Err("inference exploded".into())
        }
    }

    fn frame() -> Frame {
        Frame::new(vec![0u8; 10 * 10 * 3], 10, 10, 3, 0)
    }

    fn one_region() -> Vec<FaceRegion> {
        vec![FaceRegion::new(1, 1, 4, 4).unwrap()]
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let mut chain = FallbackDetector::new(
            Some(Box::new(FixedDetector::new(one_region()))),
            Box::new(BrokenDetector),
        );
        let regions = chain.detect(&frame()).unwrap();
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_primary_failure_uses_fallback() {
        let mut chain = FallbackDetector::new(
            Some(Box::new(BrokenDetector)),
            Box::new(FixedDetector::new(one_region())),
        );
        let regions = chain.detect(&frame()).unwrap();
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_missing_primary_goes_straight_to_fallback() {
        let mut chain = FallbackDetector::new(None, Box::new(FixedDetector::new(one_region())));
        let regions = chain.detect(&frame()).unwrap();
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_both_failing_degrades_to_empty() {
        let mut chain =
            FallbackDetector::new(Some(Box::new(BrokenDetector)), Box::new(BrokenDetector));
        let regions = chain.detect(&frame()).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_empty_primary_result_is_not_a_failure() {
        // Zero faces from the primary must not trigger the fallback.
        let fallback = FixedDetector::new(one_region());
        let mut chain = FallbackDetector::new(
            Some(Box::new(FixedDetector::new(Vec::new()))),
            Box::new(fallback),
        );
        let regions = chain.detect(&frame()).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_fallback_retried_every_frame() {
        let mut chain = FallbackDetector::new(
            Some(Box::new(BrokenDetector)),
            Box::new(FixedDetector::new(one_region())),
        );
        for _ in 0..3 {
            assert_eq!(chain.detect(&frame()).unwrap().len(), 1);
        }
    }
}
