//! hitbadge core: transport-agnostic counter primitives, error types, and the
//! digit compositor.
//!
//! This crate defines how request paths become storage keys, how stored
//! counter text is interpreted, how the query string selects a response
//! representation, and how ten digit glyphs are stitched into a badge. It
//! carries no HTTP or runtime dependencies so it can be reused by other
//! front ends and exercised directly in tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `HitError`/`Result` so a malformed
//! stored value or a bad glyph never brings the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod count;
pub mod error;
pub mod key;
pub mod query;
pub mod render;

/// Shared result type.
pub use error::{Result, HitError};
