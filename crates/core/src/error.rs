use thiserror::Error;

/// User-visible failures of the anonymization pipeline.
///
/// Detection errors never appear here: the detector chain absorbs them and
/// degrades to an empty result. Only media decode/encode problems (and the
/// defensive `Frame` variant) abort a request.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to decode input media: {0}")]
    Decode(String),

    #[error("failed to encode output media: {0}")]
    Encode(String),

    #[error("frame processing failed: {0}")]
    Frame(String),
}
