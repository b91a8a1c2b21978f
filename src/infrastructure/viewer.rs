// src/infrastructure/viewer.rs
use crate::constants::{IMAGE_EXTENSION, JPEG_QUALITY, VIEWER_LAUNCH_DELAY_MS};
use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::Builder;
use tracing::instrument;

/// Shows a note's picture with the platform image viewer.
#[derive(Debug)]
pub struct ImageViewer {
    // Keep last temp dir alive to prevent deletion
    _temp_dir: Option<Arc<tempfile::TempDir>>,
}

impl ImageViewer {
    pub fn new() -> Self {
        Self { _temp_dir: None }
    }

    /// Write the picture to a fresh temporary directory and return its path.
    pub fn create_temp_file(&mut self, image: &DynamicImage) -> Result<PathBuf> {
        let temp_dir = Builder::new()
            .prefix("photonotes-")
            .rand_bytes(5)
            .tempdir()
            .context("Failed to create temporary directory")?;

        let file_path = temp_dir.path().join(format!("note.{IMAGE_EXTENSION}"));

        let file = File::create(&file_path)
            .with_context(|| format!("Failed to create temp file at {}", file_path.display()))?;
        DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(
                BufWriter::new(file),
                JPEG_QUALITY,
            ))
            .context("Failed to write picture to temporary file")?;

        self._temp_dir = Some(Arc::new(temp_dir));

        Ok(file_path)
    }

    #[instrument(level = "debug")]
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let path_str = path.to_str().context("Failed to convert path to string")?;

        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(path_str)
                .spawn()
                .context("Failed to open image viewer")?;
        }
        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("cmd")
                .args(["/C", "start", path_str])
                .spawn()
                .context("Failed to open image viewer")?;
        }
        #[cfg(target_os = "linux")]
        {
            std::process::Command::new("xdg-open")
                .arg(path_str)
                .spawn()
                .context("Failed to open image viewer")?;
        }

        // Keep the temp directory alive briefly
        std::thread::sleep(std::time::Duration::from_millis(VIEWER_LAUNCH_DELAY_MS));

        Ok(())
    }
}

impl Default for ImageViewer {
    fn default() -> Self {
        Self::new()
    }
}
