pub mod fallback_detector;
pub mod onnx_face_detector;
pub mod seeta_cascade_detector;
