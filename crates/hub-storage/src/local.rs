//! Local filesystem asset store

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use hub_core::assets::{AssetError, AssetKind, AssetLimits, AssetRef, AssetStore, AssetUpload};
use tracing::{debug, instrument};

use crate::naming::random_file_name;

/// Stores assets below `root`, one directory per [`AssetKind`]
///
/// The root is usually the directory served as static files, so a locator
/// such as `/downloads/<name>.zip` is also the public download path.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
    limits: AssetLimits,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>, limits: AssetLimits) -> Self {
        Self {
            root: root.into(),
            limits,
        }
    }

    /// Create the per-kind directories
    pub async fn ensure_directories(&self) -> Result<(), AssetError> {
        for kind in [AssetKind::Archive, AssetKind::Image] {
            tokio::fs::create_dir_all(self.root.join(kind.directory())).await?;
        }
        Ok(())
    }

    fn path_for(&self, kind: AssetKind, file_name: &str) -> PathBuf {
        self.root.join(kind.directory()).join(file_name)
    }

    async fn store(&self, kind: AssetKind, upload: &AssetUpload) -> Result<AssetRef, AssetError> {
        let extension = self.limits.check(kind, upload)?;
        let file_name = random_file_name(&extension);
        let path = self.path_for(kind, &file_name);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &upload.bytes).await?;

        let asset = AssetRef::new(kind, &file_name);
        debug!(asset = %asset, size = upload.size(), "Asset stored");
        Ok(asset)
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    fn limits(&self) -> &AssetLimits {
        &self.limits
    }

    #[instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    async fn store_archive(&self, upload: &AssetUpload) -> Result<AssetRef, AssetError> {
        self.store(AssetKind::Archive, upload).await
    }

    #[instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    async fn store_image(&self, upload: &AssetUpload) -> Result<AssetRef, AssetError> {
        self.store(AssetKind::Image, upload).await
    }

    #[instrument(skip(self))]
    async fn delete_asset(&self, asset: &AssetRef) -> Result<(), AssetError> {
        let (kind, file_name) = asset
            .parse()
            .ok_or_else(|| AssetError::InvalidRef(asset.to_string()))?;

        match tokio::fs::remove_file(self.path_for(kind, file_name)).await {
            Ok(()) => {
                debug!(asset = %asset, "Asset deleted");
                Ok(())
            }
            // already gone; nothing left to clean up
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssetError::Io(e)),
        }
    }
}
