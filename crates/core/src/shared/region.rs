/// A rectangular face region in pixel coordinates.
///
/// Invariants: `width` and `height` are positive, and the rectangle lies
/// fully inside the frame it was detected on. The fallible constructors
/// below are the only way to build one, so downstream code can index the
/// frame buffer without bounds checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRegion {
    /// Returns `None` for degenerate (zero-area) rectangles.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Builds a region from raw detector corner coordinates, clamped to
    /// the frame. Detections that fall entirely outside the frame, or
    /// collapse to zero area after clamping, yield `None` and are dropped
    /// silently by callers.
    pub fn from_bbox(x1: f64, y1: f64, x2: f64, y2: f64, frame_w: u32, frame_h: u32) -> Option<Self> {
        let x1 = x1.max(0.0).round() as i64;
        let y1 = y1.max(0.0).round() as i64;
        let x2 = (x2.round() as i64).min(frame_w as i64);
        let y2 = (y2.round() as i64).min(frame_h as i64);

        if x1 >= x2 || y1 >= y2 || x1 >= frame_w as i64 || y1 >= frame_h as i64 {
            return None;
        }
        Self::new(x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32)
    }

    /// Defensive clamp for consumers: shrinks the region to fit a frame of
    /// the given size. `None` when nothing of the region remains visible.
    pub fn clamped_to(&self, frame_w: u32, frame_h: u32) -> Option<Self> {
        if self.x >= frame_w || self.y >= frame_h {
            return None;
        }
        let width = self.width.min(frame_w - self.x);
        let height = self.height.min(frame_h - self.y);
        Self::new(self.x, self.y, width, height)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
