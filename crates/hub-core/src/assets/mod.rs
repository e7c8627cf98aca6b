//! Asset handling contracts - stored archives and images referenced by versions
//!
//! The concrete store lives in `hub-storage`; this module owns the rules every
//! store applies (size and extension limits, naming, locator layout).

mod asset_ref;
mod limits;
mod store;

pub use asset_ref::{AssetKind, AssetRef};
pub use limits::{AssetLimits, AssetUpload, ARCHIVE_EXTENSIONS, IMAGE_EXTENSIONS, MIB};
pub use store::{AssetError, AssetStore};
