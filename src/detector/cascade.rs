use log::info;
use opencv::{
    core::{self, Mat, Rect, Size, Vector},
    imgproc, objdetect,
    prelude::*,
};

use crate::detector::FaceDetect;
use crate::error::{ExtractError, Result};

/// Each detection pass shrinks the search window by this factor.
const SCALE_FACTOR: f64 = 1.1;
/// Candidate rectangles need this many overlapping detections to survive.
const MIN_NEIGHBORS: i32 = 4;
/// Faces smaller than this are ignored.
const MIN_FACE_SIZE: i32 = 60;

/// Cascade-classifier face detector with fixed parameters.
///
/// Frames are converted to grayscale and histogram-equalized before
/// the classifier runs.
pub struct CascadeDetector {
    classifier: objdetect::CascadeClassifier,
}

impl CascadeDetector {
    pub fn load(model_path: &str) -> Result<Self> {
        let mut classifier = objdetect::CascadeClassifier::default()
            .map_err(|_| ExtractError::ModelLoad { path: model_path.to_string() })?;

        // load() reports a missing or malformed model as `false`
        // rather than an error.
        let loaded = classifier
            .load(model_path)
            .map_err(|_| ExtractError::ModelLoad { path: model_path.to_string() })?;
        if !loaded {
            return Err(ExtractError::ModelLoad { path: model_path.to_string() });
        }

        info!("loaded cascade model from {model_path}");
        Ok(Self { classifier })
    }
}

impl FaceDetect for CascadeDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Vec<Rect>> {
        let mut gray = Mat::default();
        imgproc::cvt_color(
            frame,
            &mut gray,
            imgproc::COLOR_BGR2GRAY,
            0,
            core::AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;

        let mut equalized = Mat::default();
        imgproc::equalize_hist(&gray, &mut equalized)?;

        let mut faces = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &equalized,
            &mut faces,
            SCALE_FACTOR,
            MIN_NEIGHBORS,
            0,
            Size::new(MIN_FACE_SIZE, MIN_FACE_SIZE),
            Size::new(0, 0),
        )?;

        Ok(faces.to_vec())
    }
}
