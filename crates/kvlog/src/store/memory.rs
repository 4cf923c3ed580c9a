use super::{BatchStore, StoreLimits};
use crate::error::StoreError;
use crate::record::WriteItem;
use log::trace;
use parking_lot::RwLock;

/// One accepted `batch_put` call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BatchPut {
    pub domain: String,
    pub items: Vec<WriteItem>,
}

/// Keeps every accepted batch in memory, in call order.
///
/// Applies the same per-call limits as the hosted service so that writers
/// misconfigured beyond those limits fail here too.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    limits: StoreLimits,
    calls: RwLock<Vec<BatchPut>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: StoreLimits) -> Self {
        Self {
            limits,
            calls: RwLock::new(Vec::new()),
        }
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    pub fn calls(&self) -> Vec<BatchPut> {
        self.calls.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().len()
    }

    /// All items written to `domain`, flattened in write order.
    pub fn items(&self, domain: &str) -> Vec<WriteItem> {
        self.calls
            .read()
            .iter()
            .filter(|call| call.domain == domain)
            .flat_map(|call| call.items.iter().cloned())
            .collect()
    }

    pub fn clear(&self) {
        self.calls.write().clear();
    }
}

impl BatchStore for InMemoryStore {
    fn batch_put(&self, domain: &str, items: &[WriteItem]) -> Result<(), StoreError> {
        self.limits.check(domain, items)?;
        trace!("memory store accepted {} items for '{domain}'", items.len());
        self.calls.write().push(BatchPut {
            domain: domain.to_string(),
            items: items.to_vec(),
        });
        Ok(())
    }
}
