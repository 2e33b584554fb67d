use ndarray::ArrayView3;

use crate::shared::region::FaceRegion;

/// A single video/image frame: contiguous RGB bytes in row-major order.
///
/// Pixel format conversion happens at I/O boundaries only; everything
/// between decode and encode sees the same RGB24 layout. Anonymization
/// transforms mutate the buffer in place through the region helpers.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// View as `[height, width, channels]` for detector preprocessing.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        let shape = (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        );
        ArrayView3::from_shape(shape, &self.data).expect("Frame data length must match dimensions")
    }

    /// Copies the pixels under `region` into a tightly-packed buffer.
    ///
    /// The region must lie within frame bounds; constructors on
    /// [`FaceRegion`] guarantee this for detector output.
    pub fn copy_region(&self, region: &FaceRegion) -> Vec<u8> {
        let ch = self.channels as usize;
        let fw = self.width as usize;
        let (rx, ry) = (region.x as usize, region.y as usize);
        let (rw, rh) = (region.width as usize, region.height as usize);

        let mut out = Vec::with_capacity(rw * rh * ch);
        for row in 0..rh {
            let start = ((ry + row) * fw + rx) * ch;
            out.extend_from_slice(&self.data[start..start + rw * ch]);
        }
        out
    }

    /// Writes a tightly-packed buffer back over the pixels under `region`.
    pub fn paste_region(&mut self, region: &FaceRegion, pixels: &[u8]) {
        let ch = self.channels as usize;
        let fw = self.width as usize;
        let (rx, ry) = (region.x as usize, region.y as usize);
        let (rw, rh) = (region.width as usize, region.height as usize);
        debug_assert_eq!(pixels.len(), rw * rh * ch);

        for row in 0..rh {
            let dst = ((ry + row) * fw + rx) * ch;
            let src = row * rw * ch;
            self.data[dst..dst + rw * ch].copy_from_slice(&pixels[src..src + rw * ch]);
        }
    }

    /// Fills every channel of every pixel under `region` with `value`.
    pub fn fill_region(&mut self, region: &FaceRegion, value: u8) {
        let ch = self.channels as usize;
        let fw = self.width as usize;
        let (rx, ry) = (region.x as usize, region.y as usize);
        let (rw, rh) = (region.width as usize, region.height as usize);

        for row in 0..rh {
            let start = ((ry + row) * fw + rx) * ch;
            self.data[start..start + rw * ch].fill(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: u32, y: u32, w: u32, h: u32) -> FaceRegion {
        FaceRegion::new(x, y, w, h).unwrap()
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 7);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape_and_access() {
        let mut data = vec![0u8; 24]; // 2 rows, 4 cols, 3 channels
        data[(1 * 4 + 2) * 3 + 1] = 99; // row 1, col 2, G
        let frame = Frame::new(data, 4, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]);
        assert_eq!(arr[[1, 2, 1]], 99);
    }

    #[test]
    fn test_copy_region_extracts_expected_pixels() {
        // 4x4 frame, pixel value = column index
        let mut data = Vec::new();
        for _row in 0..4 {
            for col in 0..4u8 {
                data.extend_from_slice(&[col, col, col]);
            }
        }
        let frame = Frame::new(data, 4, 4, 3, 0);

        let roi = frame.copy_region(&region(1, 1, 2, 2));
        assert_eq!(roi.len(), 2 * 2 * 3);
        // Both rows carry columns 1 and 2
        assert_eq!(&roi[0..6], &[1, 1, 1, 2, 2, 2]);
        assert_eq!(&roi[6..12], &[1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_paste_region_roundtrip() {
        let mut frame = Frame::new(vec![10u8; 4 * 4 * 3], 4, 4, 3, 0);
        let r = region(1, 2, 2, 1);
        let patch = vec![200u8; 2 * 1 * 3];
        frame.paste_region(&r, &patch);
        assert_eq!(frame.copy_region(&r), patch);
        // Pixel outside the region untouched
        assert_eq!(frame.data()[0], 10);
    }

    #[test]
    fn test_fill_region_only_touches_region() {
        let mut frame = Frame::new(vec![77u8; 5 * 5 * 3], 5, 5, 3, 0);
        frame.fill_region(&region(2, 2, 2, 2), 0);

        let roi = frame.copy_region(&region(2, 2, 2, 2));
        assert!(roi.iter().all(|&v| v == 0));
        assert_eq!(frame.data()[0], 77);
        let below = ((4 * 5 + 2) * 3) as usize;
        assert_eq!(frame.data()[below], 77);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![50u8; 12], 2, 2, 3, 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 50);
        assert_eq!(cloned.data()[0], 0);
    }
}
