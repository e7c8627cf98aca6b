//! Shared upload pipeline for resource creation and new versions

use std::fmt;

use hub_core::assets::{AssetRef, AssetUpload};
use hub_core::entities::User;
use hub_core::traits::RateDecision;
use hub_core::{DomainError, Snowflake};
use tracing::{debug, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A cleanup step that failed without failing the surrounding operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupWarning {
    /// A stored file could not be removed
    Asset { asset: AssetRef, error: String },
    /// A pruned version record could not be removed
    Record { version_id: Snowflake, error: String },
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset { asset, error } => write!(f, "failed to delete asset {asset}: {error}"),
            Self::Record { version_id, error } => {
                write!(f, "failed to delete version {version_id}: {error}")
            }
        }
    }
}

/// Assets written for one version
#[derive(Debug, Clone)]
pub(crate) struct StoredAssets {
    pub archive: AssetRef,
    pub images: Vec<AssetRef>,
    pub archive_bytes: u64,
}

impl StoredAssets {
    pub fn iter(&self) -> impl Iterator<Item = &AssetRef> {
        std::iter::once(&self.archive).chain(self.images.iter())
    }
}

pub(crate) fn upload_key(user_id: Snowflake) -> String {
    format!("upload:{user_id}")
}

/// Count one upload attempt for a non-admin actor
///
/// A limiter backend failure lets the upload through; throttling is best effort.
pub(crate) async fn throttle(ctx: &ServiceContext, actor: &User) -> ServiceResult<()> {
    if actor.is_admin() {
        return Ok(());
    }

    match ctx.rate_limiter().check(&upload_key(actor.id)).await {
        Ok(RateDecision::Allowed) => Ok(()),
        Ok(RateDecision::Denied { retry_after }) => {
            warn!(user_id = %actor.id, retry_after_secs = retry_after.as_secs(), "Upload rate limit exceeded");
            Err(ServiceError::RateLimited {
                retry_after_secs: retry_after.as_secs().max(1),
            })
        }
        Err(e) => {
            warn!(user_id = %actor.id, error = %e, "Upload rate limiter unavailable, allowing request");
            Ok(())
        }
    }
}

/// Validate every file before anything is written
pub(crate) fn check_uploads(
    ctx: &ServiceContext,
    archive: &AssetUpload,
    images: &[AssetUpload],
) -> ServiceResult<()> {
    let limits = ctx.asset_store().limits();
    limits.check_archive(archive).map_err(DomainError::from)?;
    for image in images {
        limits.check_image(image).map_err(DomainError::from)?;
    }
    Ok(())
}

/// Write the archive and images; on a failed write, remove what was already stored
pub(crate) async fn store_assets(
    ctx: &ServiceContext,
    archive: &AssetUpload,
    images: &[AssetUpload],
) -> ServiceResult<StoredAssets> {
    let store = ctx.asset_store();
    let archive_ref = store.store_archive(archive).await.map_err(DomainError::from)?;

    let mut image_refs = Vec::with_capacity(images.len());
    for image in images {
        match store.store_image(image).await {
            Ok(asset) => image_refs.push(asset),
            Err(e) => {
                let written = std::iter::once(&archive_ref).chain(image_refs.iter());
                discard_assets(ctx, written).await;
                return Err(DomainError::from(e).into());
            }
        }
    }

    Ok(StoredAssets {
        archive: archive_ref,
        images: image_refs,
        archive_bytes: archive.size(),
    })
}

/// Best-effort removal; each failure becomes a warning
pub(crate) async fn discard_assets<'a>(
    ctx: &ServiceContext,
    assets: impl IntoIterator<Item = &'a AssetRef>,
) -> Vec<CleanupWarning> {
    let assets: Vec<&AssetRef> = assets.into_iter().collect();
    let mut warnings = Vec::new();
    for asset in assets {
        match ctx.asset_store().delete_asset(asset).await {
            Ok(()) => debug!(asset = %asset, "Asset removed"),
            Err(e) => {
                let warning = CleanupWarning::Asset {
                    asset: asset.clone(),
                    error: e.to_string(),
                };
                warn!(%warning, "Asset cleanup failed");
                warnings.push(warning);
            }
        }
    }
    warnings
}
