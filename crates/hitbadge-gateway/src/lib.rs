//! hitbadge gateway library entry.
//!
//! Wires config, storage backends, glyph fetching, and the counting handlers
//! into an axum service. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod glyphs;
pub mod hits;
pub mod obs;
pub mod router;
pub mod store;
