//! One file per key under a directory.
//!
//! Keys must be plain `[A-Za-z0-9_-]` so they map to filenames without
//! escaping; counter keys are hex and always qualify. Writes land in a
//! uniquely named temp file which is then renamed over the target.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use hitbadge_core::error::{HitError, Result};

use super::KvStore;

#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
    tmp_seq: AtomicU64,
}

impl DirStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| HitError::StorageUnavailable(format!("create {}: {e}", root.display())))?;
        Ok(Self {
            root,
            tmp_seq: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_for(&self, key: &str) -> Result<PathBuf> {
        let ok = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !ok {
            return Err(HitError::StorageUnavailable(format!("key not storable: {key:?}")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl KvStore for DirStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.file_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HitError::StorageUnavailable(format!("read {key}: {e}"))),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let path = self.file_for(key)?;
        let seq = self.tmp_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = self.root.join(format!(".{key}.{seq}.tmp"));

        if let Err(e) = tokio::fs::write(&tmp, value.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(HitError::StorageUnavailable(format!("write {key}: {e}")));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(HitError::StorageUnavailable(format!("commit {key}: {e}")));
        }
        Ok(())
    }
}
