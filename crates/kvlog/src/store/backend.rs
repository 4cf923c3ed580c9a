use super::file::{FileStore, SyncMode};
use super::{BatchStore, InMemoryStore, StoreLimits};
use crate::error::StoreError;
use crate::record::WriteItem;
use std::path::Path;

/// The store implementations this crate ships with.
#[derive(Debug)]
pub enum StoreBackend {
    Memory(InMemoryStore),
    File(FileStore),
}

impl StoreBackend {
    pub fn new_memory() -> Self {
        StoreBackend::Memory(InMemoryStore::new())
    }

    pub fn new_memory_with_limits(limits: StoreLimits) -> Self {
        StoreBackend::Memory(InMemoryStore::with_limits(limits))
    }

    pub fn new_file<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        Ok(StoreBackend::File(FileStore::new(data_dir)?))
    }

    pub fn new_file_with_config<P: AsRef<Path>>(
        data_dir: P,
        sync_mode: SyncMode,
        limits: StoreLimits,
    ) -> Result<Self, StoreError> {
        Ok(StoreBackend::File(FileStore::with_config(
            data_dir, sync_mode, limits,
        )?))
    }

    pub fn as_memory(&self) -> Option<&InMemoryStore> {
        match self {
            StoreBackend::Memory(store) => Some(store),
            StoreBackend::File(_) => None,
        }
    }
}

impl BatchStore for StoreBackend {
    fn batch_put(&self, domain: &str, items: &[WriteItem]) -> Result<(), StoreError> {
        match self {
            StoreBackend::Memory(store) => store.batch_put(domain, items),
            StoreBackend::File(store) => store.batch_put(domain, items),
        }
    }
}
