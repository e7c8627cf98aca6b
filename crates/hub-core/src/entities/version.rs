//! ResourceVersion entity - one snapshot (archive + images + changelog) in a history

use chrono::{DateTime, Utc};

use crate::assets::AssetRef;
use crate::value_objects::Snowflake;

/// Changelog stored with the first version when none is supplied
pub const DEFAULT_INITIAL_CHANGELOG: &str = "Initial release";

/// Changelog stored with later versions when none is supplied
pub const DEFAULT_ADD_CHANGELOG: &str = "No changelog provided";

/// An immutable entry in a resource's version history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceVersion {
    pub id: Snowflake,
    pub resource_id: Snowflake,
    /// Free-text label, not semver-validated
    pub version: String,
    pub changelog: String,
    pub zip_url: AssetRef,
    /// Ordered as uploaded; may be empty
    pub image_urls: Vec<AssetRef>,
    /// Human-readable archive size, see [`format_file_size`]
    pub file_size: String,
    pub created_at: DateTime<Utc>,
}

impl ResourceVersion {
    pub fn new(
        id: Snowflake,
        resource_id: Snowflake,
        version: String,
        changelog: String,
        zip_url: AssetRef,
        image_urls: Vec<AssetRef>,
        archive_bytes: u64,
    ) -> Self {
        Self {
            id,
            resource_id,
            version,
            changelog,
            zip_url,
            image_urls,
            file_size: format_file_size(archive_bytes),
            created_at: Utc::now(),
        }
    }

    /// Every stored asset backing this version, archive first
    pub fn assets(&self) -> impl Iterator<Item = &AssetRef> {
        std::iter::once(&self.zip_url).chain(self.image_urls.iter())
    }
}

/// Format a byte count as `"<n> <unit>"` in base 1024
///
/// Two decimals at most, trailing zeros dropped: `1536` is `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKind;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(100), "100 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2048), "2 KB");
        assert_eq!(format_file_size(1234), "1.21 KB");
        assert_eq!(format_file_size(1_572_864), "1.5 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn test_format_file_size_caps_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_assets_lists_archive_then_images() {
        let zip = AssetRef::new(AssetKind::Archive, "aa.zip");
        let img = AssetRef::new(AssetKind::Image, "bb.png");
        let version = ResourceVersion::new(
            Snowflake::new(2),
            Snowflake::new(1),
            "1.0".into(),
            DEFAULT_INITIAL_CHANGELOG.into(),
            zip.clone(),
            vec![img.clone()],
            2048,
        );

        let assets: Vec<_> = version.assets().cloned().collect();
        assert_eq!(assets, vec![zip, img]);
        assert_eq!(version.file_size, "2 KB");
    }
}
