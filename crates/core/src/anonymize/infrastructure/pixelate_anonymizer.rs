use crate::anonymize::domain::region_anonymizer::RegionAnonymizer;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

use super::scale;

/// Mosaic anonymizer: shrink the region by the intensity factor with area
/// averaging, then blow it back up with nearest-neighbor sampling so each
/// cell becomes a flat block.
pub struct PixelateAnonymizer {
    intensity: u32,
}

impl PixelateAnonymizer {
    pub fn new(intensity: u32) -> Self {
        // A factor of 0 would collapse the region to nothing; clamp to 1
        // (identity-ish) instead of erroring the whole job.
        Self {
            intensity: intensity.max(1),
        }
    }
}

impl RegionAnonymizer for PixelateAnonymizer {
    fn apply(
        &self,
        frame: &mut Frame,
        regions: &[FaceRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let channels = frame.channels() as usize;

        for region in regions {
            let rw = region.width as usize;
            let rh = region.height as usize;

            // The shrink factor is capped so the mosaic never drops below
            // one cell per axis.
            let factor = (self.intensity as usize).min(rw).min(rh).max(1);
            if factor <= 1 {
                continue;
            }
            let small_w = (rw / factor).max(1);
            let small_h = (rh / factor).max(1);

            let roi = frame.copy_region(region);
            let small = scale::resize_area(&roi, rw, rh, channels, small_w, small_h);
            let blocks = scale::upscale_nearest(&small, small_w, small_h, channels, rw, rh);
            frame.paste_region(region, &blocks);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: u32, y: u32, w: u32, h: u32) -> FaceRegion {
        FaceRegion::new(x, y, w, h).unwrap()
    }

    /// 16x16 frame with a column gradient, so pixelation visibly flattens it.
    fn gradient_frame() -> Frame {
        let mut data = Vec::new();
        for _row in 0..16 {
            for col in 0..16u8 {
                let v = col * 16;
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::new(data, 16, 16, 3, 0)
    }

    #[test]
    fn test_zero_intensity_clamped_to_one() {
        let anonymizer = PixelateAnonymizer::new(0);
        assert_eq!(anonymizer.intensity, 1);
    }

    #[test]
    fn test_intensity_one_leaves_frame_unchanged() {
        let mut frame = gradient_frame();
        let original = frame.data().to_vec();
        PixelateAnonymizer::new(1)
            .apply(&mut frame, &[region(0, 0, 16, 16)])
            .unwrap();
        assert_eq!(frame.data(), &original[..]);
    }

    #[test]
    fn test_pixelate_flattens_region_into_blocks() {
        let mut frame = gradient_frame();
        PixelateAnonymizer::new(8)
            .apply(&mut frame, &[region(0, 0, 16, 16)])
            .unwrap();

        // 16/8 = 2 cells per axis: each 8-wide block is one flat value.
        let row = frame.data();
        let first_block: Vec<u8> = (0..8).map(|x| row[x * 3]).collect();
        assert!(first_block.iter().all(|&v| v == first_block[0]));
        let second_block: Vec<u8> = (8..16).map(|x| row[x * 3]).collect();
        assert!(second_block.iter().all(|&v| v == second_block[0]));
        assert_ne!(first_block[0], second_block[0]);
    }

    #[test]
    fn test_pixels_outside_region_unchanged() {
        let mut frame = gradient_frame();
        let original = frame.data().to_vec();
        PixelateAnonymizer::new(4)
            .apply(&mut frame, &[region(4, 4, 8, 8)])
            .unwrap();

        assert_eq!(frame.data()[0], original[0]);
        let corner = ((15 * 16 + 15) * 3) as usize;
        assert_eq!(frame.data()[corner], original[corner]);
    }

    #[test]
    fn test_factor_larger_than_region_collapses_to_single_block() {
        let mut frame = gradient_frame();
        PixelateAnonymizer::new(100)
            .apply(&mut frame, &[region(0, 0, 16, 16)])
            .unwrap();

        // Factor capped at the region size: one cell, uniform fill.
        let first = frame.data()[0];
        let r = region(0, 0, 16, 16);
        assert!(frame.copy_region(&r).iter().step_by(3).all(|&v| v == first));
    }

    #[test]
    fn test_tiny_region_does_not_panic() {
        let mut frame = gradient_frame();
        PixelateAnonymizer::new(51)
            .apply(&mut frame, &[region(3, 3, 2, 2)])
            .unwrap();
    }
}
