//! Key-value store seam.
//!
//! The router never touches storage directly; it is handed an
//! `Arc<dyn KvStore>` through `AppState`. Backends only need plain get/put of
//! text; there are no transactions, so read-increment-write on the same key
//! from concurrent requests can lose updates.

pub mod dir;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use hitbadge_core::error::{HitError, Result};

use crate::config::{StoreKind, StoreSection};

pub use dir::DirStore;
pub use memory::MemoryStore;

/// Minimal text key-value capability.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> Result<()>;
}

/// Build the backend selected in config.
pub async fn from_config(cfg: &StoreSection) -> Result<Arc<dyn KvStore>> {
    match cfg.kind {
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreKind::Dir => {
            let path = cfg
                .path
                .clone()
                .ok_or_else(|| HitError::BadConfig("store.path is required for kind=dir".into()))?;
            Ok(Arc::new(DirStore::open(path).await?))
        }
    }
}
