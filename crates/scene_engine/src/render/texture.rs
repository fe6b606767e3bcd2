//! 2D textures
//!
//! A [`Texture2D`] is decoded from an image file and uploaded through the
//! backend once, at scene construction. Afterwards it is an opaque handle
//! that programs bind to numbered texture units.

use std::path::{Path, PathBuf};

use crate::assets::ImageData;
use crate::render::{RenderBackend, TextureHandle};
use crate::scene::SceneError;

/// A texture uploaded to the GPU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture2D {
    /// Source file, kept for diagnostics
    pub path: PathBuf,
    /// Backend handle
    pub handle: TextureHandle,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Texture2D {
    /// Load an image file and upload it
    ///
    /// A missing or undecodable file aborts scene construction.
    pub fn from_file(
        backend: &mut dyn RenderBackend,
        path: impl AsRef<Path>,
    ) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let image = ImageData::from_file(path)?;
        Ok(Self::from_image(backend, path, &image)?)
    }

    /// Upload already decoded image data
    pub fn from_image(
        backend: &mut dyn RenderBackend,
        path: impl Into<PathBuf>,
        image: &ImageData,
    ) -> crate::render::RenderResult<Self> {
        let handle = backend.create_texture(image)?;
        Ok(Self {
            path: path.into(),
            handle,
            width: image.width,
            height: image.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{RecordingBackend, RenderCall};

    #[test]
    fn test_from_image_uploads_once() {
        let mut backend = RecordingBackend::new();
        let image = ImageData::solid_color(2, 2, [0, 0, 255, 255]);
        let uploaded = Texture2D::from_image(&mut backend, "memory", &image).unwrap();

        assert_eq!((uploaded.width, uploaded.height), (2, 2));
        let calls = backend.log().snapshot();
        assert_eq!(calls.len(), 1);
        assert!(matches!(
            calls[0],
            RenderCall::CreateTexture { texture, .. } if texture == uploaded.handle
        ));
    }

    #[test]
    fn test_missing_file_aborts() {
        let mut backend = RecordingBackend::new();
        let err = Texture2D::from_file(&mut backend, "textures/missing_clouds.jpg").unwrap_err();
        assert!(matches!(err, SceneError::Asset(_)));
        assert!(backend.log().is_empty());
    }
}
