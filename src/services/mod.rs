//! External collaborators module
//!
//! This module contains the durable store, the alert sink and the
//! snapshot persistence built on top of the store.

pub mod alert;
pub mod persistence;
pub mod store;

// Re-export main types
pub use alert::{Alert, BellAlert, LogAlert};
pub use persistence::{Loaded, PersistenceCodec, STORAGE_KEY};
pub use store::{DurableStore, FileStore, MemoryStore, StoreError};
