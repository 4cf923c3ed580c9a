use crate::config::{DEFAULT_MAX_ATTRIBUTE_BYTES, DEFAULT_MAX_BATCH_ITEMS};
use crate::error::StoreError;
use crate::record::WriteItem;
use crate::truncate::TextEncoding;

/// A store that accepts batched attribute writes.
///
/// One call persists one batch. Implementations do not retry; a failure is
/// returned to the caller as-is.
pub trait BatchStore: Send + Sync {
    fn batch_put(&self, domain: &str, items: &[WriteItem]) -> Result<(), StoreError>;
}

/// Service limits a store enforces on each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_batch_items: usize,
    pub max_attribute_bytes: usize,
    pub encoding: TextEncoding,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_batch_items: DEFAULT_MAX_BATCH_ITEMS.get(),
            max_attribute_bytes: DEFAULT_MAX_ATTRIBUTE_BYTES,
            encoding: TextEncoding::Utf8,
        }
    }
}

impl StoreLimits {
    /// Reject batches the real service would refuse.
    pub fn check(&self, domain: &str, items: &[WriteItem]) -> Result<(), StoreError> {
        if items.len() > self.max_batch_items {
            return Err(StoreError::LimitExceeded {
                context: format!("batch_put to '{domain}'"),
                limit: self.max_batch_items,
                actual: items.len(),
            });
        }
        for item in items {
            for attribute in &item.attributes {
                let size = self.encoding.encoded_len(&attribute.value);
                if size > self.max_attribute_bytes {
                    return Err(StoreError::LimitExceeded {
                        context: format!("attribute '{}' of item '{}'", attribute.name, item.key),
                        limit: self.max_attribute_bytes,
                        actual: size,
                    });
                }
            }
        }
        Ok(())
    }
}

impl From<&crate::config::WriterConfig> for StoreLimits {
    fn from(config: &crate::config::WriterConfig) -> Self {
        Self {
            max_batch_items: config.max_batch_items.get(),
            max_attribute_bytes: config.max_attribute_bytes,
            encoding: config.encoding,
        }
    }
}
