//! Shared helpers for writer integration tests.

use kvlog::error::StoreError;
use kvlog::store::{BatchStore, InMemoryStore};
use kvlog::{
    LogRecord, RecordWriter, SequentialKeyGenerator, TimeZoneSetting, WriteItem, WriterConfig,
};
use parking_lot::Mutex;
use std::sync::Arc;

pub const DOMAIN: &str = "app-logs";

/// 2024-03-15T17:30:00Z
pub const BASE_MILLIS: i64 = 1_710_523_800_000;

pub fn make_record(i: usize) -> LogRecord {
    LogRecord::new(BASE_MILLIS + i as i64)
        .with_host("web-1")
        .with_level("INFO")
        .with_logger("app.http")
        .with_message(format!("request {i}"))
}

pub fn test_config() -> WriterConfig {
    WriterConfig::new(DOMAIN).with_time_zone(TimeZoneSetting::Utc)
}

pub fn writer_for(store: Arc<dyn BatchStore>, config: WriterConfig) -> RecordWriter {
    RecordWriter::with_key_generator(store, Arc::new(SequentialKeyGenerator::new("rec")), config)
        .unwrap()
}

pub fn memory_writer() -> (Arc<InMemoryStore>, RecordWriter) {
    let store = Arc::new(InMemoryStore::new());
    let writer = writer_for(store.clone(), test_config());
    (store, writer)
}

/// Store that delegates to an in-memory store until call number
/// `fail_on_call` (zero based), which it rejects.
#[derive(Debug)]
pub struct FailingStore {
    pub inner: InMemoryStore,
    fail_on_call: usize,
    error: StoreError,
    calls: Mutex<usize>,
}

impl FailingStore {
    pub fn new(fail_on_call: usize, error: StoreError) -> Self {
        Self {
            inner: InMemoryStore::new(),
            fail_on_call,
            error,
            calls: Mutex::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        *self.calls.lock()
    }
}

impl BatchStore for FailingStore {
    fn batch_put(&self, domain: &str, items: &[WriteItem]) -> Result<(), StoreError> {
        let mut calls = self.calls.lock();
        let call = *calls;
        *calls += 1;
        if call == self.fail_on_call {
            return Err(self.error.clone());
        }
        self.inner.batch_put(domain, items)
    }
}
