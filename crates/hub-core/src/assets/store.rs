//! Asset store port

use async_trait::async_trait;
use thiserror::Error;

use super::asset_ref::AssetRef;
use super::limits::{AssetLimits, AssetUpload};

/// Asset store failures
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid asset reference: {0}")]
    InvalidRef(String),

    #[error("Asset I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssetError {
    /// True when the client sent something the store refuses to keep
    pub fn is_invalid_upload(&self) -> bool {
        matches!(self, Self::InvalidArchive(_) | Self::InvalidImage(_))
    }
}

/// Persistence for uploaded archives and images
///
/// Implementations generate the stored name themselves (128 random bits,
/// hex, plus the validated extension); the client's file name never reaches
/// the file system.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Limits enforced by this store
    fn limits(&self) -> &AssetLimits;

    /// Validate and persist a ZIP archive
    async fn store_archive(&self, upload: &AssetUpload) -> Result<AssetRef, AssetError>;

    /// Validate and persist a preview image
    async fn store_image(&self, upload: &AssetUpload) -> Result<AssetRef, AssetError>;

    /// Remove a stored asset. Callers treat failure as a warning.
    async fn delete_asset(&self, asset: &AssetRef) -> Result<(), AssetError>;
}
