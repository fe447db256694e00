use hitbadge_core::count::{increment, parse_stored};
use hitbadge_core::error::Result;
use hitbadge_core::key::CounterKey;

use crate::store::KvStore;

/// Increment the counter for `path` and return the new value.
///
/// Read and write are separate store calls. Two concurrent bumps of the same
/// path can both read N and both write N+1. A stored value that does not parse
/// aborts before anything is written.
pub async fn bump(store: &dyn KvStore, path: &str) -> Result<u64> {
    let key = CounterKey::from_path(path);

    let stored = store.get(key.as_str()).await?;
    let current = parse_stored(&key, stored.as_deref())?;
    let next = increment(&key, current)?;

    store.put(key.as_str(), next.to_string()).await?;
    tracing::debug!(%key, count = next, "counter bumped");
    Ok(next)
}
