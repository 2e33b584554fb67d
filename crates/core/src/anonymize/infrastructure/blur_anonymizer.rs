use std::cell::RefCell;

use crate::anonymize::domain::region_anonymizer::RegionAnonymizer;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

use super::gaussian;
use super::scale;

/// Gaussian-blur anonymizer using a separable kernel.
///
/// The intensity maps directly to the kernel size; even values are bumped
/// to the next odd number so the kernel stays centered. Large kernels use a
/// downscale-blur-upscale pass, which is visually equivalent for the flat
/// result a face blur wants and far cheaper.
pub struct BlurAnonymizer {
    kernel: Vec<f32>,
    scale: usize,
    small_kernel: Vec<f32>,
    blur_temp: RefCell<Vec<f32>>,
}

impl BlurAnonymizer {
    pub fn new(intensity: u32) -> Self {
        let kernel_size = coerce_odd(intensity.max(1) as usize);
        let scale = (kernel_size / 50).max(1);
        let small_k = (kernel_size / scale) | 1; // ensure odd
        Self {
            kernel: gaussian::gaussian_kernel_1d(kernel_size),
            scale,
            small_kernel: gaussian::gaussian_kernel_1d(small_k),
            blur_temp: RefCell::new(Vec::new()),
        }
    }
}

/// Even kernel sizes have no center pixel; round up to the next odd.
fn coerce_odd(size: usize) -> usize {
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

impl RegionAnonymizer for BlurAnonymizer {
    fn apply(
        &self,
        frame: &mut Frame,
        regions: &[FaceRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let channels = frame.channels() as usize;

        for region in regions {
            let rw = region.width as usize;
            let rh = region.height as usize;

            let mut roi = frame.copy_region(region);
            let mut temp = self.blur_temp.borrow_mut();

            if self.scale <= 1 || rh < self.scale * 2 || rw < self.scale * 2 {
                gaussian::separable_gaussian_blur_with_kernel(
                    &mut roi,
                    rw,
                    rh,
                    channels,
                    &self.kernel,
                    &mut temp,
                );
            } else {
                let (mut small, sw, sh) = scale::downscale(&roi, rw, rh, channels, self.scale);
                gaussian::separable_gaussian_blur_with_kernel(
                    &mut small,
                    sw,
                    sh,
                    channels,
                    &self.small_kernel,
                    &mut temp,
                );
                roi = scale::upscale_bilinear(&small, sw, sh, channels, rw, rh);
            }
            drop(temp);

            frame.paste_region(region, &roi);
        }

        Ok(())
    }
}
