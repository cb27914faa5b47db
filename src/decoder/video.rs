use log::{debug, info};
use opencv::{prelude::*, videoio};

use crate::error::{ExtractError, Result};

/// Forward-only frame source over a video file.
///
/// Frames come back in decode order and the stream cannot be rewound;
/// once `next_frame` returns `None` the source is exhausted.
pub struct VideoSource {
    capture: videoio::VideoCapture,
    frames_read: u64,
}

impl VideoSource {
    pub fn open(path: &str) -> Result<Self> {
        // CAP_ANY lets OpenCV pick the platform backend
        // (AVFoundation / Media Foundation / GStreamer).
        let capture = videoio::VideoCapture::from_file(path, videoio::CAP_ANY)
            .map_err(|_| ExtractError::SourceUnavailable { path: path.to_string() })?;

        if !capture.is_opened()? {
            return Err(ExtractError::SourceUnavailable { path: path.to_string() });
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        info!("opened {path}: {width}x{height} @ {fps:.2} fps");

        Ok(Self { capture, frames_read: 0 })
    }

    /// Pulls the next frame, blocking until the backend decodes one.
    /// Returns `None` once the video is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? {
            debug!("source exhausted after {} frames", self.frames_read);
            return Ok(None);
        }
        if frame.empty() {
            return Ok(None);
        }
        self.frames_read += 1;
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_source_unavailable() {
        let err = VideoSource::open("/no/such/video.mp4").unwrap_err();
        assert!(matches!(err, ExtractError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_open_non_video_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_video.mp4");
        std::fs::write(&path, b"plain text, no container").unwrap();

        let err = VideoSource::open(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ExtractError::SourceUnavailable { .. }));
    }
}
