/// Model-based face detector using ONNX Runtime via `ort`.
///
/// Runs a YOLO-family face model: letterbox preprocessing, a single
/// inference pass, confidence filtering and greedy NMS. Detections are
/// mapped back to frame coordinates and clamped; no alignment or pose
/// normalization is applied, so regions come out in original orientation.
use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Model input resolution used when the ONNX graph has dynamic dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold for keeping a detection.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// IoU threshold for greedy NMS.
const NMS_IOU_THRESH: f64 = 0.45;

pub struct OnnxFaceDetector {
    session: ort::session::Session,
    confidence: f64,
    input_size: u32,
}

impl OnnxFaceDetector {
    /// Loads the ONNX model and reads its expected input resolution from
    /// the first input's NCHW shape, falling back to 640 when dynamic.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| match input.dtype() {
                ort::value::ValueType::Tensor { ref shape, .. } if shape.len() >= 4 && shape[2] > 0 => {
                    Some(shape[2] as u32)
                }
                _ => None,
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            confidence,
            input_size,
        })
    }
}

impl FaceDetector for OnnxFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        let (tensor, scale, pad_x, pad_y) = letterbox(frame, self.input_size);

        let input = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.session.run(ort::inputs![input])?;
        if outputs.len() == 0 {
            return Err("face model produced no outputs".into());
        }
        let output = outputs[0].try_extract_array::<f32>()?;
        let shape = output.shape();

        // YOLO emits either [1, features, detections] or the transpose.
        let (num_dets, num_feats, transposed) = match shape {
            [1, a, b] if a < b => (*b, *a, true),
            [1, a, b] => (*a, *b, false),
            _ => return Err(format!("unexpected face model output shape: {shape:?}").into()),
        };
        let data = output.as_slice().ok_or("face model output not contiguous")?;

        let mut candidates = Vec::new();
        for i in 0..num_dets {
            let at = |feat: usize| {
                if transposed {
                    data[feat * num_dets + i] as f64
                } else {
                    data[i * num_feats + feat] as f64
                }
            };
            if num_feats < 5 {
                continue;
            }
            let conf = at(4);
            if conf < self.confidence {
                continue;
            }

            // Box center/size in letterbox space back to frame space.
            let (cx, cy, w, h) = (at(0), at(1), at(2), at(3));
            candidates.push(Candidate {
                x1: (cx - w / 2.0 - pad_x as f64) / scale,
                y1: (cy - h / 2.0 - pad_y as f64) / scale,
                x2: (cx + w / 2.0 - pad_x as f64) / scale,
                y2: (cy + h / 2.0 - pad_y as f64) / scale,
                confidence: conf,
            });
        }

        let kept = nms(&mut candidates, NMS_IOU_THRESH);

        // Entries whose geometry collapses after clamping are dropped.
        Ok(kept
            .iter()
            .filter_map(|c| {
                FaceRegion::from_bbox(c.x1, c.y1, c.x2, c.y2, frame.width(), frame.height())
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Letterbox-resize a frame to a square `target` input, preserving aspect
/// ratio and padding with YOLO's 114-gray. Returns the NCHW tensor plus the
/// scale and padding needed to map detections back.
fn letterbox(frame: &Frame, target: u32) -> (ndarray::Array4<f32>, f64, u32, u32) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;

    let scale = (target as f64 / fw).min(target as f64 / fh);
    let new_w = (fw * scale).round() as u32;
    let new_h = (fh * scale).round() as u32;
    let pad_x = (target - new_w) / 2;
    let pad_y = (target - new_h) / 2;

    let fill = 114.0f32 / 255.0;
    let mut tensor =
        ndarray::Array4::<f32>::from_elem((1, 3, target as usize, target as usize), fill);

    let src = frame.as_ndarray();
    let src_w = frame.width() as usize;
    let src_h = frame.height() as usize;

    for y in 0..new_h as usize {
        let sy = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let sx = ((x as f64 / scale) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, pad_y as usize + y, pad_x as usize + x]] =
                    src[[sy, sx, c]] as f32 / 255.0;
            }
        }
    }

    (tensor, scale, pad_x, pad_y)
}

// ---------------------------------------------------------------------------
// NMS
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct Candidate {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    confidence: f64,
}

impl Candidate {
    fn iou(&self, other: &Candidate) -> f64 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);

        let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        if inter == 0.0 {
            return 0.0;
        }
        let area_a = (self.x2 - self.x1) * (self.y2 - self.y1);
        let area_b = (other.x2 - other.x1) * (other.y2 - other.y1);
        inter / (area_a + area_b - inter)
    }
}

/// Greedy NMS: highest confidence first, suppress boxes overlapping a kept one.
fn nms(candidates: &mut [Candidate], iou_thresh: f64) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for c in candidates.iter() {
        if kept.iter().all(|k| k.iou(c) <= iou_thresh) {
            kept.push(c.clone());
        }
    }
    kept
}
