pub const FACE_MODEL_NAME: &str = "yolov8n-face.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/faceveil/faceveil/releases/download/v0.1.0/yolov8n-face.onnx";

pub const CASCADE_MODEL_NAME: &str = "seeta_fd_frontal_v1.0.bin";
pub const CASCADE_MODEL_URL: &str =
    "https://github.com/faceveil/faceveil/releases/download/v0.1.0/seeta_fd_frontal_v1.0.bin";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Method-specific strength parameter; 51 matches the service default.
pub const DEFAULT_INTENSITY: u32 = 51;

/// Callers must cap batch requests at this many items before invoking
/// the batch use case.
pub const MAX_BATCH_SIZE: usize = 10;

/// Frame cadence for the optional video progress observer.
pub const PROGRESS_INTERVAL: usize = 10;
