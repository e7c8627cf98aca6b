//! Asset kinds and the opaque locators persisted on versions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of stored asset; decides the storage directory and upload limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Archive,
    Image,
}

impl AssetKind {
    /// Public path prefix, relative to the store root
    pub fn directory(self) -> &'static str {
        match self {
            Self::Archive => "downloads",
            Self::Image => "images/items",
        }
    }

    fn from_directory(dir: &str) -> Option<Self> {
        [Self::Archive, Self::Image]
            .into_iter()
            .find(|kind| kind.directory() == dir)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archive => f.write_str("archive"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// Locator of a stored asset, e.g. `/downloads/3f2a...e1.zip`
///
/// Built from a kind and a generated file name; callers persist it verbatim
/// and hand it back for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(kind: AssetKind, file_name: &str) -> Self {
        Self(format!("/{}/{file_name}", kind.directory()))
    }

    /// Wrap a locator read back from storage
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into kind and file name
    ///
    /// Returns `None` for anything that is not exactly
    /// `/<kind directory>/<plain file name>`, so a locator can never
    /// address a path outside its kind's directory.
    pub fn parse(&self) -> Option<(AssetKind, &str)> {
        let path = self.0.strip_prefix('/')?;
        let (dir, name) = path.rsplit_once('/')?;
        let kind = AssetKind::from_directory(dir)?;

        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('\\')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');
        plain.then_some((kind, name))
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(AssetRef::new(AssetKind::Archive, "ab.zip").as_str(), "/downloads/ab.zip");
        assert_eq!(AssetRef::new(AssetKind::Image, "cd.png").as_str(), "/images/items/cd.png");
    }

    #[test]
    fn test_parse_round_trips() {
        let asset = AssetRef::new(AssetKind::Image, "0123abcd.webp");
        assert_eq!(asset.parse(), Some((AssetKind::Image, "0123abcd.webp")));
    }

    #[test]
    fn test_parse_rejects_traversal_and_unknown_dirs() {
        for raw in [
            "/downloads/../secrets.zip",
            "/downloads/..",
            "/downloads/",
            "/etc/passwd",
            "downloads/a.zip",
            "/images/items/sub/a.png",
            "/images/a.png",
        ] {
            assert_eq!(AssetRef::from_stored(raw).parse(), None, "{raw}");
        }
    }
}
