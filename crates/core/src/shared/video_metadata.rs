use std::path::PathBuf;

/// Container properties read when a video is opened, reused to configure
/// the output encoder so input and output match frame-for-frame.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}
