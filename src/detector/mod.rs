pub mod cascade;

pub use cascade::CascadeDetector;

use opencv::core::{Mat, Rect};

use crate::error::Result;

/// Face detection capability.
///
/// Implementations run independently per frame; no identity continuity
/// is promised across calls. `&mut self` because the underlying
/// classifiers mutate internal buffers during a pass.
pub trait FaceDetect {
    fn detect(&mut self, frame: &Mat) -> Result<Vec<Rect>>;
}
