//! # hub-storage
//!
//! [`AssetStore`](hub_core::AssetStore) implementations.
//!
//! - [`LocalAssetStore`]: files under a root directory, laid out as
//!   `<root>/downloads/<name>.zip` and `<root>/images/items/<name>.<ext>`
//! - [`InMemoryAssetStore`]: keeps bytes in memory; used by service tests

mod local;
mod memory;
mod naming;

pub use local::LocalAssetStore;
pub use memory::InMemoryAssetStore;
pub use naming::random_file_name;
