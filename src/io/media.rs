// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module decodes raster images into RGBA pixels ready to be uploaded
//! as an egui texture.

use crate::models::ImageInfo;
use anyhow::{Context, Result};
use std::path::Path;

/// A decoded image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// Unmultiplied RGBA, row-major.
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    /// Describe this image for a project, using `source` as its location.
    pub fn info(&self, source: impl Into<String>) -> ImageInfo {
        ImageInfo::new(self.width, self.height, source)
    }
}

/// Load and decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    let rgba = img.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_png() {
        let path = std::env::temp_dir().join(format!("ocrmark_media_{}.png", std::process::id()));
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&loaded.pixels[..4], &[10, 20, 30, 255]);
        assert_eq!(loaded.info("page.png"), ImageInfo::new(3, 2, "page.png"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_image(Path::new("/definitely/not/here.png")).is_err());
    }
}
