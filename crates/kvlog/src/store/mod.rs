pub mod backend;
pub mod file;
pub mod memory;
pub mod r#trait;

// Re-exports for ergonomics
pub use backend::StoreBackend;
pub use file::{FileStore, SyncMode};
pub use memory::{BatchPut, InMemoryStore};
pub use r#trait::{BatchStore, StoreLimits};
