use std::time::Instant;

use log::{debug, info};
use opencv::core::Mat;

use crate::core::{cropper, writer::CropWriter};
use crate::decoder::VideoSource;
use crate::detector::FaceDetect;
use crate::error::Result;

/// Totals for one extraction run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractStats {
    pub frames: u64,
    pub faces: u64,
}

/// Detects faces in one frame and persists a crop for each.
/// Returns the number of crops written for this frame.
pub fn process_frame(
    frame: &Mat,
    detector: &mut dyn FaceDetect,
    writer: &mut CropWriter,
) -> Result<u64> {
    let regions = detector.detect(frame)?;
    let mut written = 0;

    for region in regions {
        match cropper::extract_crop(frame, region)? {
            Some(crop) => {
                writer.persist(&crop)?;
                written += 1;
            }
            None => debug!(
                "skipping degenerate region at ({}, {})",
                region.x, region.y
            ),
        }
    }

    Ok(written)
}

/// Drives the whole run: pull frames until the source is exhausted,
/// detect and persist per frame. Any error aborts the run; a clean end
/// of stream is success even if no face was ever found.
pub fn run(
    source: &mut VideoSource,
    detector: &mut dyn FaceDetect,
    writer: &mut CropWriter,
) -> Result<ExtractStats> {
    let started = Instant::now();
    let mut stats = ExtractStats::default();

    while let Some(frame) = source.next_frame()? {
        let written = process_frame(&frame, detector, writer)?;
        stats.frames += 1;
        stats.faces += written;

        if written > 0 {
            debug!("frame {}: {} face(s) saved", stats.frames, written);
        }
    }

    info!(
        "processed {} frames, saved {} face crops in {:.1}s",
        stats.frames,
        stats.faces,
        started.elapsed().as_secs_f64()
    );
    Ok(stats)
}
