//! Mapping log records onto store batch writes.
//!
//! Writes are synchronous: batches go out one at a time and each call
//! completes before the next starts. A failed batch aborts the write; earlier
//! batches stay persisted, so a caller can observe a partially applied write.

use crate::batch::Batcher;
use crate::config::WriterConfig;
use crate::error::{ConfigError, WriteError};
use crate::keys::{KeyGenerator, UuidKeyGenerator};
use crate::record::{Attribute, LogRecord, WriteItem, columns};
use crate::store::BatchStore;
use crate::time_format::TimeZoneSetting;
use crate::truncate::ByteBoundedTruncator;
use log::{debug, trace, warn};
use std::sync::Arc;

/// Outcome of a successful [`RecordWriter::write`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub records: usize,
    pub batches: usize,
    pub truncated_attributes: usize,
}

pub struct RecordWriter {
    store: Arc<dyn BatchStore>,
    keys: Arc<dyn KeyGenerator>,
    config: WriterConfig,
    truncator: ByteBoundedTruncator,
}

impl std::fmt::Debug for RecordWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordWriter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RecordWriter {
    /// Writer with random UUID keys.
    pub fn new(store: Arc<dyn BatchStore>, config: WriterConfig) -> Result<Self, ConfigError> {
        Self::with_key_generator(store, Arc::new(UuidKeyGenerator), config)
    }

    pub fn with_key_generator(
        store: Arc<dyn BatchStore>,
        keys: Arc<dyn KeyGenerator>,
        config: WriterConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let truncator = ByteBoundedTruncator::new(config.max_attribute_bytes, config.encoding);
        Ok(Self {
            store,
            keys,
            config,
            truncator,
        })
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn set_time_zone(&mut self, time_zone: TimeZoneSetting) {
        self.config.time_zone = time_zone;
    }

    /// Parses and applies a zone name such as `UTC`, `+05:30` or
    /// `Europe/Paris`. The current zone is kept on error.
    pub fn set_time_zone_str(&mut self, time_zone: &str) -> Result<(), ConfigError> {
        self.config.time_zone = time_zone.parse()?;
        Ok(())
    }

    /// Builds the write item for one record, returning it together with the
    /// number of attribute values that had to be truncated.
    pub fn to_write_item(&self, record: &LogRecord) -> Result<(WriteItem, usize), WriteError> {
        let time = self
            .config
            .time_zone
            .format_millis(record.timestamp)
            .ok_or(WriteError::InvalidTimestamp {
                millis: record.timestamp,
            })?;

        let mut attributes = Vec::with_capacity(6 + record.mdc.len());
        let mut truncated = 0;
        let mut push = |name: &str, value: Option<&str>| {
            if let Some(value) = value {
                let (value, cut) = self.truncator.truncate_checked(value);
                if cut {
                    trace!(
                        "truncated attribute '{name}' to {} bytes",
                        self.truncator.encoding().encoded_len(value)
                    );
                    truncated += 1;
                }
                attributes.push(Attribute::new(name, value));
            }
        };

        push(columns::HOST, record.host.as_deref());
        push(columns::MESSAGE, record.message.as_deref());
        push(columns::LEVEL, record.level.as_deref());
        push(columns::LOGGER, record.logger.as_deref());
        push(columns::CONTEXT, record.context.as_deref());
        push(columns::TIME, Some(time.as_str()));
        for (key, value) in &record.mdc {
            let name = format!("{}{key}", columns::MDC_PREFIX);
            push(&name, Some(value.as_str()));
        }

        Ok((WriteItem::new(self.keys.next_key(), attributes), truncated))
    }

    /// Writes `records` in order, one store call per batch.
    ///
    /// Every record is mapped before the first store call, so a record that
    /// cannot be mapped fails the write without side effects. On a store
    /// failure the remaining batches are not sent and
    /// [`WriteError::BatchFailed`] reports how many items already landed.
    pub fn write(&self, records: &[LogRecord]) -> Result<WriteSummary, WriteError> {
        if records.is_empty() {
            return Ok(WriteSummary::default());
        }

        let mut truncated_attributes = 0;
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let (item, truncated) = self.to_write_item(record)?;
            truncated_attributes += truncated;
            items.push(item);
        }

        let domain = self.config.domain.as_str();
        let mut written = 0;
        let mut batches = 0;
        for (batch_index, batch) in Batcher::new(&items, self.config.max_batch_items).enumerate() {
            debug!(
                "writing batch {batch_index} of {} items to '{domain}'",
                batch.len()
            );
            if let Err(source) = self.store.batch_put(domain, batch) {
                warn!(
                    "batch {batch_index} to '{domain}' failed after {written} items were written: {source}"
                );
                return Err(WriteError::BatchFailed {
                    batch_index,
                    items_written: written,
                    source,
                });
            }
            written += batch.len();
            batches += 1;
        }

        Ok(WriteSummary {
            records: written,
            batches,
            truncated_attributes,
        })
    }
}
