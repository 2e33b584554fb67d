pub mod anonymize_batch_use_case;
pub mod anonymize_image_use_case;
pub mod anonymize_video_use_case;
pub mod frame_processor;
