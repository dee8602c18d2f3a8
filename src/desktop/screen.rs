//! Cross-platform screen capture using xcap
//!
//! Captures the primary monitor and encodes the result as PNG, either base64
//! for wire responses or written to a file.

use image::RgbaImage;
use std::path::Path;
use xcap::Monitor;

/// Screen capture utilities
pub struct ScreenCapture;

impl ScreenCapture {
    fn primary_monitor() -> anyhow::Result<Monitor> {
        let monitors =
            Monitor::all().map_err(|e| anyhow::anyhow!("Failed to get monitors: {}", e))?;

        monitors
            .into_iter()
            .find(|m| m.is_primary())
            .ok_or_else(|| anyhow::anyhow!("No primary monitor found"))
    }

    /// Capture the entire primary monitor
    pub fn capture_primary_screen() -> anyhow::Result<RgbaImage> {
        let primary = Self::primary_monitor()?;

        primary
            .capture_image()
            .map_err(|e| anyhow::anyhow!("Failed to capture screen: {}", e))
    }

    /// Get primary monitor dimensions
    pub fn primary_screen_size() -> anyhow::Result<(u32, u32)> {
        let primary = Self::primary_monitor()?;
        Ok((primary.width(), primary.height()))
    }

    /// Convert an RgbaImage to base64 PNG
    pub fn image_to_base64(image: &RgbaImage) -> anyhow::Result<String> {
        use base64::Engine;
        use image::ImageEncoder;
        use std::io::Cursor;

        let mut buffer = Cursor::new(Vec::new());
        let encoder = image::codecs::png::PngEncoder::new(&mut buffer);
        encoder
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| anyhow::anyhow!("Failed to encode PNG: {}", e))?;

        let base64_string = base64::engine::general_purpose::STANDARD.encode(buffer.into_inner());
        Ok(base64_string)
    }

    /// Write an RgbaImage as PNG to the given path, creating parent directories
    pub fn save_png(image: &RgbaImage, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| anyhow::anyhow!("Failed to create directory {:?}: {}", dir, e))?;
            }
        }

        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| anyhow::anyhow!("Failed to save screenshot to {:?}: {}", path, e))
    }
}
