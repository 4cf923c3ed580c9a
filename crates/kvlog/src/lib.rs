//! Persist structured log records into an attribute-based key-value store.
//!
//! Records are mapped to size-bounded text attributes, keyed with a synthetic
//! unique identifier and written in store-sized batches through a
//! [`BatchStore`](store::BatchStore).

pub mod batch;
pub mod config;
pub mod error;
pub mod keys;
pub mod record;
pub mod store;
pub mod telemetry;
pub mod time_format;
pub mod truncate;
pub mod writer;

pub use batch::Batcher;
pub use config::{ConfigLoader, WriterConfig};
pub use error::{ConfigError, StoreError, WriteError};
pub use keys::{KeyGenerator, SequentialKeyGenerator, UuidKeyGenerator};
pub use record::{Attribute, LogRecord, WriteItem};
pub use time_format::TimeZoneSetting;
pub use truncate::{ByteBoundedTruncator, TextEncoding};
pub use writer::{RecordWriter, WriteSummary};

// Re-export logging macros for consistent usage across the crate
pub use log::{debug, error, info, trace, warn};
