use crate::shared::constants::MAX_BATCH_SIZE;

use super::anonymize_image_use_case::AnonymizeImageUseCase;

/// Per-item outcome in a batch run. Order matches the input order.
pub enum BatchItemResult {
    Success { face_count: usize, jpeg: Vec<u8> },
    Error { message: String },
}

/// Batch image pipeline with per-item error isolation.
///
/// One corrupted input produces an `Error` slot in the output and never
/// aborts its siblings; `execute` itself cannot fail. Enforcing
/// [`MAX_BATCH_SIZE`] is the caller's job, before any decoding starts.
pub struct AnonymizeBatchUseCase {
    image_use_case: AnonymizeImageUseCase,
}

impl AnonymizeBatchUseCase {
    pub fn new(image_use_case: AnonymizeImageUseCase) -> Self {
        Self { image_use_case }
    }

    pub fn execute(&mut self, items: &[Vec<u8>]) -> Vec<BatchItemResult> {
        debug_assert!(items.len() <= MAX_BATCH_SIZE);

        items
            .iter()
            .enumerate()
            .map(|(i, bytes)| match self.image_use_case.execute(bytes) {
                Ok(outcome) => BatchItemResult::Success {
                    face_count: outcome.face_count,
                    jpeg: outcome.jpeg,
                },
                Err(e) => {
                    log::warn!("Batch item {i} failed: {e}");
                    BatchItemResult::Error {
                        message: e.to_string(),
                    }
                }
            })
            .collect()
    }
}
