use super::{BatchStore, StoreLimits};
use crate::error::StoreError;
use crate::record::WriteItem;
use fs4::fs_std::FileExt;
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
    #[default]
    None,
    /// fsync after every batch.
    Always,
}

/// Appends each item as one JSON line to `<data_dir>/<domain>.jsonl`.
///
/// A batch is written under an exclusive file lock so that concurrent
/// writers never interleave lines from different batches.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
    sync_mode: SyncMode,
    limits: StoreLimits,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        Self::with_config(data_dir, SyncMode::None, StoreLimits::default())
    }

    pub fn with_config<P: AsRef<Path>>(
        data_dir: P,
        sync_mode: SyncMode,
        limits: StoreLimits,
    ) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| StoreError::from_io_error(e, "Failed to create data directory"))?;
        Ok(Self {
            data_dir,
            sync_mode,
            limits,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn domain_path(&self, domain: &str) -> Result<PathBuf, StoreError> {
        validate_domain(domain)?;
        Ok(self.data_dir.join(format!("{domain}.jsonl")))
    }

    fn open_locked(&self, path: &Path) -> Result<File, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::from_io_error(e, "Failed to open domain file"))?;
        FileExt::lock_exclusive(&file).map_err(|_| StoreError::LockAcquisitionFailed)?;
        Ok(file)
    }
}

fn validate_domain(domain: &str) -> Result<(), StoreError> {
    let valid = !domain.is_empty()
        && domain != "."
        && domain != ".."
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidDomain(domain.to_string()))
    }
}

impl BatchStore for FileStore {
    fn batch_put(&self, domain: &str, items: &[WriteItem]) -> Result<(), StoreError> {
        self.limits.check(domain, items)?;
        let path = self.domain_path(domain)?;

        let mut buf = Vec::new();
        for item in items {
            serde_json::to_writer(&mut buf, item)
                .map_err(|e| StoreError::from_serialization_error(e, "item encoding"))?;
            buf.push(b'\n');
        }

        // The lock is released when `file` is dropped.
        let mut file = self.open_locked(&path)?;
        file.write_all(&buf)
            .map_err(|e| StoreError::from_io_error(e, "Failed to append batch"))?;
        if self.sync_mode == SyncMode::Always {
            file.sync_data()
                .map_err(|e| StoreError::from_io_error(e, "Failed to sync batch"))?;
        }
        debug!("appended {} items to {}", items.len(), path.display());
        Ok(())
    }
}
