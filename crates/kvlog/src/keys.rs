//! Item key generation.
//!
//! The store has no auto-increment, so every written record gets a synthetic
//! key that carries no meaning beyond being unique.

use std::sync::atomic::{AtomicU64, Ordering};

pub trait KeyGenerator: Send + Sync {
    fn next_key(&self) -> String;
}

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidKeyGenerator;

impl KeyGenerator for UuidKeyGenerator {
    fn next_key(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic keys (`<prefix>-0`, `<prefix>-1`, ...), mainly for tests.
#[derive(Debug, Default)]
pub struct SequentialKeyGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialKeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl KeyGenerator for SequentialKeyGenerator {
    fn next_key(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
