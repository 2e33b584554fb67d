use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Domain interface for obscuring face regions within a frame.
///
/// Implementations modify the frame in-place (`&mut Frame`) to avoid allocation.
pub trait RegionAnonymizer: Send {
    fn apply(
        &self,
        frame: &mut Frame,
        regions: &[FaceRegion],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
