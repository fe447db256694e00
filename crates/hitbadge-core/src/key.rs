//! Path -> storage key encoding.
//!
//! Keys are `count-` followed by the lowercase hex of the path's UTF-8 bytes.
//! Hex of bytes is injective and the prefix is fixed, so two paths share a
//! key only if they are byte-identical, and the output is always ASCII.

use std::fmt;

/// Namespace prefix for counter keys.
pub const KEY_PREFIX: &str = "count-";

/// Storage key for one counted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey(String);

impl CounterKey {
    /// Encode a request path.
    pub fn from_path(path: &str) -> Self {
        let mut s = String::with_capacity(KEY_PREFIX.len() + path.len() * 2);
        s.push_str(KEY_PREFIX);
        s.push_str(&hex::encode(path.as_bytes()));
        Self(s)
    }

    /// Recover the original path. `None` if the key was not produced by
    /// [`CounterKey::from_path`].
    pub fn decode_path(key: &str) -> Option<String> {
        let hex_part = key.strip_prefix(KEY_PREFIX)?;
        let bytes = hex::decode(hex_part).ok()?;
        String::from_utf8(bytes).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CounterKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
