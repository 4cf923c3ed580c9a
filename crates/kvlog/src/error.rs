use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum WriteError {
    InvalidTimestamp {
        millis: i64,
    },
    /// A batch was rejected by the store. Batches before `batch_index` were
    /// already persisted and are not rolled back.
    BatchFailed {
        batch_index: usize,
        items_written: usize,
        source: StoreError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    WriteFailed {
        context: String,
        source: Box<StoreErrorSource>,
    },
    Throttled {
        context: String,
    },
    Unavailable {
        context: String,
    },
    LimitExceeded {
        context: String,
        limit: usize,
        actual: usize,
    },
    PermissionDenied {
        context: String,
    },
    InvalidDomain(String),
    LockAcquisitionFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreErrorSource {
    Io(String),
    Serialization(String),
    Network(String),
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidTimeZone { value: String },
    InvalidValue { field: String, reason: String },
    Io { context: String, reason: String },
    Parse { context: String, reason: String },
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::InvalidTimestamp { millis } => {
                write!(f, "Timestamp {millis}ms is outside the representable range")
            }
            WriteError::BatchFailed {
                batch_index,
                items_written,
                source,
            } => write!(
                f,
                "Batch {batch_index} failed after {items_written} items were written: {source}"
            ),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::WriteFailed { context, source } => {
                write!(f, "Write failed in {context}: {source}")
            }
            StoreError::Throttled { context } => write!(f, "Request throttled in {context}"),
            StoreError::Unavailable { context } => write!(f, "Store unavailable in {context}"),
            StoreError::LimitExceeded {
                context,
                limit,
                actual,
            } => write!(f, "Limit exceeded in {context}: {actual} > {limit}"),
            StoreError::PermissionDenied { context } => {
                write!(f, "Permission denied in {context}")
            }
            StoreError::InvalidDomain(domain) => write!(f, "Invalid domain: '{domain}'"),
            StoreError::LockAcquisitionFailed => {
                write!(f, "Failed to acquire exclusive lock on file")
            }
        }
    }
}

impl fmt::Display for StoreErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreErrorSource::Io(msg) => write!(f, "IO error: {msg}"),
            StoreErrorSource::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            StoreErrorSource::Network(msg) => write!(f, "Network error: {msg}"),
            StoreErrorSource::Custom(msg) => write!(f, "Custom error: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeZone { value } => write!(f, "Invalid time zone '{value}'"),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{field}': {reason}")
            }
            ConfigError::Io { context, reason } => write!(f, "I/O error in {context}: {reason}"),
            ConfigError::Parse { context, reason } => {
                write!(f, "Parse error in {context}: {reason}")
            }
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::BatchFailed { source, .. } => Some(source),
            WriteError::InvalidTimestamp { .. } => None,
        }
    }
}
impl std::error::Error for StoreError {}
impl std::error::Error for StoreErrorSource {}
impl std::error::Error for ConfigError {}

impl WriteError {
    /// Number of items persisted before the failure.
    pub fn items_written(&self) -> usize {
        match self {
            WriteError::BatchFailed { items_written, .. } => *items_written,
            WriteError::InvalidTimestamp { .. } => 0,
        }
    }

    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            WriteError::BatchFailed { source, .. } => Some(source),
            WriteError::InvalidTimestamp { .. } => None,
        }
    }
}

impl StoreError {
    /// Failures a caller may reasonably retry. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::Throttled { .. } | StoreError::Unavailable { .. }
        )
    }

    pub fn from_io_error(e: std::io::Error, context: &str) -> Self {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
                context: context.to_string(),
            },
            std::io::ErrorKind::WouldBlock => StoreError::LockAcquisitionFailed,
            _ => StoreError::WriteFailed {
                context: context.to_string(),
                source: Box::new(StoreErrorSource::Io(e.to_string())),
            },
        }
    }

    pub fn from_serialization_error(e: impl std::fmt::Display, context: &str) -> Self {
        StoreError::WriteFailed {
            context: context.to_string(),
            source: Box::new(StoreErrorSource::Serialization(e.to_string())),
        }
    }
}

impl ConfigError {
    pub fn from_io_error(e: std::io::Error, context: &str) -> Self {
        ConfigError::Io {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn from_parse_error(e: impl std::fmt::Display, context: &str) -> Self {
        ConfigError::Parse {
            context: context.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
