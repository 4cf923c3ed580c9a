//! Writer configuration and file loading.

use crate::error::ConfigError;
use crate::time_format::TimeZoneSetting;
use crate::truncate::TextEncoding;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;

/// Items per batch write accepted by the store.
pub const DEFAULT_MAX_BATCH_ITEMS: NonZeroUsize = match NonZeroUsize::new(25) {
    Some(n) => n,
    None => unreachable!(),
};

/// Encoded bytes per attribute value accepted by the store.
pub const DEFAULT_MAX_ATTRIBUTE_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Destination domain (collection) for every batch.
    pub domain: String,
    #[serde(default = "default_max_batch_items")]
    pub max_batch_items: NonZeroUsize,
    #[serde(default = "default_max_attribute_bytes")]
    pub max_attribute_bytes: usize,
    #[serde(default)]
    pub time_zone: TimeZoneSetting,
    #[serde(default)]
    pub encoding: TextEncoding,
}

fn default_max_batch_items() -> NonZeroUsize {
    DEFAULT_MAX_BATCH_ITEMS
}

fn default_max_attribute_bytes() -> usize {
    DEFAULT_MAX_ATTRIBUTE_BYTES
}

impl WriterConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            max_batch_items: DEFAULT_MAX_BATCH_ITEMS,
            max_attribute_bytes: DEFAULT_MAX_ATTRIBUTE_BYTES,
            time_zone: TimeZoneSetting::default(),
            encoding: TextEncoding::default(),
        }
    }

    pub fn with_max_batch_items(mut self, max: NonZeroUsize) -> Self {
        self.max_batch_items = max;
        self
    }

    pub fn with_max_attribute_bytes(mut self, max: usize) -> Self {
        self.max_attribute_bytes = max;
        self
    }

    pub fn with_time_zone(mut self, time_zone: TimeZoneSetting) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.domain.trim().is_empty() {
            return Err(ConfigError::invalid_value("domain", "must not be empty"));
        }
        if self.max_attribute_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "max_attribute_bytes",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Loads [`WriterConfig`] from disk.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a config file.
    /// JSON (.json) and YAML (.yaml/.yml) are picked by extension; anything
    /// else is tried as JSON, then YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<WriterConfig, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::from_io_error(e, "config loading"))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let config: WriterConfig = match extension.to_lowercase().as_str() {
            "json" => serde_json::from_str(&content)
                .map_err(|e| ConfigError::from_parse_error(e, "JSON config parsing"))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::from_parse_error(e, "YAML config parsing"))?,
            _ => serde_json::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .map_err(|e| {
                    ConfigError::from_parse_error(e, "config parsing (tried both JSON and YAML)")
                })?,
        };

        config.validate()?;
        Ok(config)
    }
}
