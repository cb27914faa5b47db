use std::fs;

use log::debug;
use opencv::{
    core::{Mat, Vector},
    imgcodecs,
};

use crate::error::{ExtractError, Result};

/// Persists crops as sequentially numbered JPEGs.
///
/// The writer owns the output counter: filenames are `cropped_1.jpg`,
/// `cropped_2.jpg`, ... across the whole run, and the counter only
/// advances after a write actually succeeds.
pub struct CropWriter {
    dir: String,
    saved: u32,
}

impl CropWriter {
    /// Creates the output directory if it does not exist (owner-only
    /// permissions on Unix, matching a private extraction workspace).
    pub fn create(dir: &str) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)?;
        }
        #[cfg(not(unix))]
        fs::create_dir_all(dir)?;

        Ok(Self { dir: dir.to_string(), saved: 0 })
    }

    /// Writes one crop and advances the counter. An encode or disk
    /// failure surfaces as `WriteFailure` instead of silently dropping
    /// the crop.
    pub fn persist(&mut self, image: &Mat) -> Result<String> {
        let path = format!("{}/cropped_{}.jpg", self.dir, self.saved + 1);

        let written = imgcodecs::imwrite(&path, image, &Vector::new())
            .map_err(|_| ExtractError::WriteFailure { path: path.clone() })?;
        if !written {
            return Err(ExtractError::WriteFailure { path });
        }

        self.saved += 1;
        debug!("wrote {path}");
        Ok(path)
    }

    /// Number of crops written so far.
    pub fn saved(&self) -> u32 {
        self.saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    fn small_image() -> Mat {
        Mat::new_rows_cols_with_default(8, 8, CV_8UC3, Scalar::all(200.0)).unwrap()
    }

    #[test]
    fn test_create_makes_missing_directory() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join("crops");

        CropWriter::create(dir.to_str().unwrap()).unwrap();
        assert!(dir.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_created_directory_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join("crops");
        CropWriter::create(dir.to_str().unwrap()).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_create_accepts_existing_directory() {
        let base = tempfile::tempdir().unwrap();
        let writer = CropWriter::create(base.path().to_str().unwrap()).unwrap();
        assert_eq!(writer.saved(), 0);
    }

    #[test]
    fn test_persist_numbers_files_sequentially() {
        let base = tempfile::tempdir().unwrap();
        let mut writer = CropWriter::create(base.path().to_str().unwrap()).unwrap();
        let image = small_image();

        let first = writer.persist(&image).unwrap();
        let second = writer.persist(&image).unwrap();
        let third = writer.persist(&image).unwrap();

        assert!(first.ends_with("cropped_1.jpg"));
        assert!(second.ends_with("cropped_2.jpg"));
        assert!(third.ends_with("cropped_3.jpg"));
        assert_eq!(writer.saved(), 3);

        for name in ["cropped_1.jpg", "cropped_2.jpg", "cropped_3.jpg"] {
            let path = base.path().join(name);
            assert!(path.is_file());
            assert!(fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_unencodable_image_is_write_failure() {
        let base = tempfile::tempdir().unwrap();
        let mut writer = CropWriter::create(base.path().to_str().unwrap()).unwrap();
        // An empty Mat cannot be encoded, so the write is refused.
        let empty = Mat::default();

        let err = writer.persist(&empty).unwrap_err();
        assert!(matches!(err, ExtractError::WriteFailure { .. }));
        assert_eq!(writer.saved(), 0);
    }
}
