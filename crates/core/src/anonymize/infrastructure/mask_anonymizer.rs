use crate::anonymize::domain::region_anonymizer::RegionAnonymizer;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Opaque-mask anonymizer: paints each region solid black. The strongest
/// guarantee of the three methods, since no trace of the source pixels
/// survives in the output.
pub struct MaskAnonymizer;

impl RegionAnonymizer for MaskAnonymizer {
    fn apply(
        &self,
        frame: &mut Frame,
        regions: &[FaceRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for region in regions {
            frame.fill_region(region, 0);
        }
        Ok(())
    }
}
