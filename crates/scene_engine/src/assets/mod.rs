//! Asset loading
//!
//! Image files are decoded here into CPU-side pixel data; uploading them to
//! the GPU is the backend's job (see [`crate::render::Texture2D`]).

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
}
