//! Image loading utilities for texture data
//!
//! Provides PNG and JPEG loading for use with the texture system.

use std::path::Path;

use crate::assets::AssetError;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// A missing file is reported as [`AssetError::NotFound`] so that scene
    /// construction can name the texture that was not shipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|e| {
            AssetError::LoadFailed(format!("Failed to load image {}: {}", path_ref.display(), e))
        })?;

        // Convert to RGBA8 format (standard for GPU upload)
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    #[must_use]
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let data = color.iter().copied().cycle().take(pixel_count * 4).collect();

        Self {
            data,
            width,
            height,
        }
    }

    /// Write the image to disk; the format follows the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AssetError> {
        let path_ref = path.as_ref();
        image::save_buffer(path_ref, &self.data, self.width, self.height, image::ColorType::Rgba8)
            .map_err(|e| {
                let reason = format!("Failed to save image {}: {}", path_ref.display(), e);
                AssetError::LoadFailed(reason)
            })
    }

    /// Get the size of the image data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);

        // Check first pixel is red
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = ImageData::from_file("does/not/exist/earth_month04.jpg");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_save_then_load_solid_color() {
        let path =
            std::env::temp_dir().join(format!("scene_engine_solid_{}.png", std::process::id()));
        ImageData::solid_color(4, 1, [0, 128, 255, 255]).save(&path).unwrap();

        let img = ImageData::from_file(&path).unwrap();
        assert_eq!((img.width, img.height), (4, 1));
        assert_eq!(&img.data[12..16], &[0, 128, 255, 255]);
    }

    #[test]
    fn test_load_png_roundtrip_dimensions() {
        let dir = std::env::temp_dir().join(format!("scene_engine_img_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let img = ImageData::from_file(&path).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(&img.data[0..4], &[10, 20, 30, 255]);
    }
}
