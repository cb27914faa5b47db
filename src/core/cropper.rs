use opencv::{
    core::{Mat, Rect, Size},
    imgproc,
    prelude::*,
};

use crate::error::Result;

/// Side length of every saved crop, in pixels.
pub const OUTPUT_SIZE: i32 = 280;

// The detector returns a tight box; widen it slightly so face edges
// (chin, hairline) are not cut off.
const MARGIN_TOP_LEFT: i32 = 1;
const MARGIN_BOTTOM_RIGHT: i32 = 2;

/// Expands a detection region by the fixed margin and clamps the result
/// to the frame. Returns `None` when clamping leaves a zero-area
/// rectangle (detection entirely outside the frame cannot happen with a
/// sane detector, but a degenerate rect must not reach the ROI call).
pub fn crop_rect(region: Rect, frame_width: i32, frame_height: i32) -> Option<Rect> {
    let x0 = (region.x - MARGIN_TOP_LEFT).max(0);
    let y0 = (region.y - MARGIN_TOP_LEFT).max(0);
    let x1 = (region.x + region.width + MARGIN_BOTTOM_RIGHT).min(frame_width);
    let y1 = (region.y + region.height + MARGIN_BOTTOM_RIGHT).min(frame_height);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
}

/// Crops the detected region out of the original color frame and
/// normalizes it to `OUTPUT_SIZE` x `OUTPUT_SIZE`.
///
/// Cubic interpolation keeps more detail than linear when a small
/// detection is scaled up to the output size.
pub fn extract_crop(frame: &Mat, region: Rect) -> Result<Option<Mat>> {
    let Some(rect) = crop_rect(region, frame.cols(), frame.rows()) else {
        return Ok(None);
    };

    let cropped = Mat::roi(frame, rect)?;
    let mut output = Mat::default();
    imgproc::resize(
        &cropped,
        &mut output,
        Size::new(OUTPUT_SIZE, OUTPUT_SIZE),
        0.0,
        0.0,
        imgproc::INTER_CUBIC,
    )?;

    Ok(Some(output))
}
