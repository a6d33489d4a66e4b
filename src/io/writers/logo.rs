//! Best-effort raster loading for the issuer logo.
use std::path::Path;

use printpdf::image_crate::{self, DynamicImage};
use tracing::warn;

use crate::io::loader::is_remote;

/// A decoded logo in RGB, ready to embed.
#[derive(Clone)]
pub struct Logo {
    pub image: DynamicImage,
    pub width_px: u32,
    pub height_px: u32,
}

impl Logo {
    /// Height in points when drawn `width_pt` wide.
    pub fn height_for(&self, width_pt: f32) -> f32 {
        if self.width_px == 0 {
            return 0.0;
        }
        width_pt * self.height_px as f32 / self.width_px as f32
    }

    /// DPI that makes the image exactly `width_pt` wide.
    pub fn dpi_for(&self, width_pt: f32) -> f32 {
        self.width_px as f32 * 72.0 / width_pt
    }
}

/// Decode `path`, or return `None` (with a warning) when it cannot be used.
/// A broken logo never aborts the document.
pub fn load_logo(path: &Path) -> Option<Logo> {
    if is_remote(path) {
        warn!("Skipping remote logo (only local files are supported): {:?}", path);
        return None;
    }
    match image_crate::open(path) {
        Ok(img) => {
            let rgb = img.to_rgb8();
            let (width_px, height_px) = rgb.dimensions();
            if width_px == 0 || height_px == 0 {
                warn!("Skipping empty logo image: {:?}", path);
                return None;
            }
            Some(Logo {
                image: DynamicImage::ImageRgb8(rgb),
                width_px,
                height_px,
            })
        }
        Err(e) => {
            warn!("Skipping logo {:?}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_skipped() {
        assert!(load_logo(Path::new("/nonexistent/logo.png")).is_none());
    }

    #[test]
    fn undecodable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(load_logo(&path).is_none());
    }

    #[test]
    fn remote_logo_is_skipped() {
        assert!(load_logo(Path::new("https://example.com/logo.png")).is_none());
    }

    #[test]
    fn scaling_keeps_aspect_ratio() {
        let logo = Logo {
            image: DynamicImage::new_rgb8(300, 100),
            width_px: 300,
            height_px: 100,
        };
        assert!((logo.height_for(90.0) - 30.0).abs() < 1e-4);
        assert!((logo.dpi_for(90.0) - 240.0).abs() < 1e-4);
    }
}
