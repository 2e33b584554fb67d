use crate::anonymize::domain::method::AnonymizationMethod;
use crate::anonymize::domain::region_anonymizer::RegionAnonymizer;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

use super::blur_anonymizer::BlurAnonymizer;
use super::mask_anonymizer::MaskAnonymizer;
use super::pixelate_anonymizer::PixelateAnonymizer;

/// No-op anonymizer, selected when the requested method name is not
/// recognized. Detected regions are still counted upstream; only the
/// pixel transform is skipped.
pub struct PassthroughAnonymizer;

impl RegionAnonymizer for PassthroughAnonymizer {
    fn apply(
        &self,
        _frame: &mut Frame,
        _regions: &[FaceRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// Builds the anonymizer for a parsed method, `None` meaning "unknown
/// name, leave pixels alone".
pub fn create_anonymizer(
    method: Option<AnonymizationMethod>,
    intensity: u32,
) -> Box<dyn RegionAnonymizer> {
    match method {
        Some(AnonymizationMethod::Blur) => Box::new(BlurAnonymizer::new(intensity)),
        Some(AnonymizationMethod::Pixelate) => Box::new(PixelateAnonymizer::new(intensity)),
        Some(AnonymizationMethod::Mask) => Box::new(MaskAnonymizer),
        None => Box::new(PassthroughAnonymizer),
    }
}
