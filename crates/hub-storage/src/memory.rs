//! In-memory asset store

use std::collections::HashMap;
use std::io;

use async_trait::async_trait;
use hub_core::assets::{AssetError, AssetKind, AssetLimits, AssetRef, AssetStore, AssetUpload};
use parking_lot::Mutex;

use crate::naming::random_file_name;

#[derive(Debug, Default)]
struct State {
    files: HashMap<AssetRef, Vec<u8>>,
    deleted: Vec<AssetRef>,
    fail_writes: bool,
    fail_deletes: bool,
}

/// Applies the same validation and naming as [`LocalAssetStore`](crate::LocalAssetStore)
/// but keeps bytes in a map. Writes and deletes can be made to fail.
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    limits: AssetLimits,
    state: Mutex<State>,
}

impl InMemoryAssetStore {
    pub fn new(limits: AssetLimits) -> Self {
        Self {
            limits,
            state: Mutex::new(State::default()),
        }
    }

    /// Make every following store call fail with an I/O error
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    /// Make every following delete fail with an I/O error
    pub fn fail_deletes(&self, fail: bool) {
        self.state.lock().fail_deletes = fail;
    }

    pub fn contains(&self, asset: &AssetRef) -> bool {
        self.state.lock().files.contains_key(asset)
    }

    pub fn stored_count(&self) -> usize {
        self.state.lock().files.len()
    }

    /// Assets removed so far, in deletion order
    pub fn deleted(&self) -> Vec<AssetRef> {
        self.state.lock().deleted.clone()
    }

    fn store(&self, kind: AssetKind, upload: &AssetUpload) -> Result<AssetRef, AssetError> {
        let extension = self.limits.check(kind, upload)?;
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(AssetError::Io(io::Error::other("write failed")));
        }

        let asset = AssetRef::new(kind, &random_file_name(&extension));
        state.files.insert(asset.clone(), upload.bytes.clone());
        Ok(asset)
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    fn limits(&self) -> &AssetLimits {
        &self.limits
    }

    async fn store_archive(&self, upload: &AssetUpload) -> Result<AssetRef, AssetError> {
        self.store(AssetKind::Archive, upload)
    }

    async fn store_image(&self, upload: &AssetUpload) -> Result<AssetRef, AssetError> {
        self.store(AssetKind::Image, upload)
    }

    async fn delete_asset(&self, asset: &AssetRef) -> Result<(), AssetError> {
        if asset.parse().is_none() {
            return Err(AssetError::InvalidRef(asset.to_string()));
        }

        let mut state = self.state.lock();
        if state.fail_deletes {
            return Err(AssetError::Io(io::Error::other("delete failed")));
        }
        state.files.remove(asset);
        state.deleted.push(asset.clone());
        Ok(())
    }
}
