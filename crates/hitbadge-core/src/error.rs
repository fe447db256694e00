//! Shared error type across hitbadge crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Wrong number of glyph URLs.
    InvalidGlyphCount,
    /// Key-value store read or write failed.
    StorageUnavailable,
    /// Stored counter text is not a number.
    CorruptCounterValue,
    /// A glyph could not be fetched or decoded.
    GlyphFetchFailure,
    /// Compositing or encoding the badge failed.
    RenderFailure,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
}

impl ClientCode {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidGlyphCount => "INVALID_GLYPH_COUNT",
            ClientCode::StorageUnavailable => "STORAGE_UNAVAILABLE",
            ClientCode::CorruptCounterValue => "CORRUPT_COUNTER_VALUE",
            ClientCode::GlyphFetchFailure => "GLYPH_FETCH_FAILURE",
            ClientCode::RenderFailure => "RENDER_FAILURE",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }

    /// HTTP status code the gateway answers with.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::InvalidGlyphCount => 400,
            ClientCode::StorageUnavailable => 503,
            ClientCode::GlyphFetchFailure => 502,
            ClientCode::CorruptCounterValue
            | ClientCode::RenderFailure
            | ClientCode::BadConfig
            | ClientCode::UnsupportedVersion => 500,
        }
    }

    /// Plain-text body sent to the caller. Details stay in the logs.
    pub fn public_message(self) -> &'static str {
        match self {
            ClientCode::InvalidGlyphCount => "Invalid image count",
            ClientCode::StorageUnavailable => "storage unavailable",
            ClientCode::CorruptCounterValue => "corrupt counter value",
            ClientCode::GlyphFetchFailure => "glyph fetch failed",
            ClientCode::RenderFailure => "render failed",
            ClientCode::BadConfig | ClientCode::UnsupportedVersion => "internal error",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HitError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum HitError {
    #[error("invalid glyph count: expected 10, got {0}")]
    InvalidGlyphCount(usize),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("corrupt counter value under {key}: {value:?}")]
    CorruptCounterValue { key: String, value: String },
    #[error("glyph {index} fetch failed: {reason}")]
    GlyphFetchFailure { index: usize, reason: String },
    #[error("render failed: {0}")]
    RenderFailure(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl HitError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HitError::InvalidGlyphCount(_) => ClientCode::InvalidGlyphCount,
            HitError::StorageUnavailable(_) => ClientCode::StorageUnavailable,
            HitError::CorruptCounterValue { .. } => ClientCode::CorruptCounterValue,
            HitError::GlyphFetchFailure { .. } => ClientCode::GlyphFetchFailure,
            HitError::RenderFailure(_) => ClientCode::RenderFailure,
            HitError::BadConfig(_) => ClientCode::BadConfig,
            HitError::UnsupportedVersion => ClientCode::UnsupportedVersion,
        }
    }
}
