use std::path::Path;

use crate::error::ProcessError;
use crate::shared::constants::PROGRESS_INTERVAL;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

use super::frame_processor::FrameProcessor;

/// Aggregate statistics for one processed video.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VideoResult {
    pub total_faces: usize,
    pub frames_processed: usize,
}

/// Progress observer: `(frames_processed, total_frames)`. Observational
/// only; returning is the only way to continue, there is no cancellation.
pub type ProgressFn = Box<dyn FnMut(usize, usize) + Send>;

/// Full video pipeline: open → per-frame detect/anonymize → encode.
///
/// Frames are written strictly in decode order, one at a time. The reader
/// and writer are released unconditionally, whether the frame loop
/// succeeded or not, so a failed job never leaks an open encoder.
pub struct AnonymizeVideoUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    processor: FrameProcessor,
    on_progress: Option<ProgressFn>,
}

impl AnonymizeVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        processor: FrameProcessor,
        on_progress: Option<ProgressFn>,
    ) -> Self {
        Self {
            reader,
            writer,
            processor,
            on_progress,
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<VideoResult, ProcessError> {
        let metadata = self
            .reader
            .open(input_path)
            .map_err(|e| ProcessError::Decode(e.to_string()))?;

        if let Err(e) = self.writer.open(output_path, &metadata) {
            self.reader.close();
            return Err(ProcessError::Encode(e.to_string()));
        }

        let result = process_frames(
            self.reader.as_mut(),
            self.writer.as_mut(),
            &mut self.processor,
            self.on_progress.as_deref_mut(),
            metadata.total_frames,
        );

        // Cleanup runs regardless of the loop's outcome. A close failure
        // only matters when the loop itself succeeded.
        self.reader.close();
        let closed = self.writer.close();

        let result = result?;
        closed.map_err(|e| ProcessError::Encode(e.to_string()))?;
        Ok(result)
    }
}

fn process_frames(
    reader: &mut dyn VideoReader,
    writer: &mut dyn VideoWriter,
    processor: &mut FrameProcessor,
    mut on_progress: Option<&mut (dyn FnMut(usize, usize) + Send)>,
    total_frames: usize,
) -> Result<VideoResult, ProcessError> {
    let mut result = VideoResult::default();

    for frame in reader.frames() {
        let mut frame = frame.map_err(|e| ProcessError::Decode(e.to_string()))?;

        result.total_faces += processor
            .process(&mut frame)
            .map_err(|e| ProcessError::Frame(e.to_string()))?;

        writer
            .write(&frame)
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
        result.frames_processed += 1;

        if result.frames_processed % PROGRESS_INTERVAL == 0 {
            if let Some(cb) = on_progress.as_deref_mut() {
                cb(result.frames_processed, total_frames);
            }
        }
    }

    Ok(result)
}
