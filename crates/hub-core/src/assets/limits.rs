//! Upload limits and pre-write validation

use super::asset_ref::AssetKind;
use super::store::AssetError;

pub const MIB: u64 = 1024 * 1024;

pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// An uploaded file as received from the client
///
/// Only the extension of `file_name` is ever used.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AssetUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lower-cased extension, if the name has one
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        (!stem.is_empty() && !ext.is_empty()).then(|| ext.to_ascii_lowercase())
    }
}

/// Size ceilings per asset kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetLimits {
    pub max_archive_bytes: u64,
    pub max_image_bytes: u64,
}

impl Default for AssetLimits {
    fn default() -> Self {
        Self {
            max_archive_bytes: 50 * MIB,
            max_image_bytes: 5 * MIB,
        }
    }
}

impl AssetLimits {
    pub fn from_megabytes(archive_mb: u64, image_mb: u64) -> Self {
        Self {
            max_archive_bytes: archive_mb * MIB,
            max_image_bytes: image_mb * MIB,
        }
    }

    pub fn max_bytes(&self, kind: AssetKind) -> u64 {
        match kind {
            AssetKind::Archive => self.max_archive_bytes,
            AssetKind::Image => self.max_image_bytes,
        }
    }

    /// Validate an upload for `kind`, returning the extension to store it under
    pub fn check(&self, kind: AssetKind, upload: &AssetUpload) -> Result<String, AssetError> {
        let (allowed, reject): (&[&str], fn(String) -> AssetError) = match kind {
            AssetKind::Archive => (ARCHIVE_EXTENSIONS, AssetError::InvalidArchive),
            AssetKind::Image => (IMAGE_EXTENSIONS, AssetError::InvalidImage),
        };

        let extension = upload
            .extension()
            .filter(|ext| allowed.contains(&ext.as_str()))
            .ok_or_else(|| {
                reject(format!(
                    "{} must have one of the extensions: {}",
                    upload.file_name,
                    allowed.join(", ")
                ))
            })?;

        let max = self.max_bytes(kind);
        if upload.size() > max {
            return Err(reject(format!(
                "{} exceeds the {} MB limit",
                upload.file_name,
                max / MIB
            )));
        }

        Ok(extension)
    }

    pub fn check_archive(&self, upload: &AssetUpload) -> Result<String, AssetError> {
        self.check(AssetKind::Archive, upload)
    }

    pub fn check_image(&self, upload: &AssetUpload) -> Result<String, AssetError> {
        self.check(AssetKind::Image, upload)
    }
}
