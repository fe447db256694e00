//! Glyph fetching and badge rendering.
//!
//! Every render fetches all ten glyphs again; nothing is cached between
//! requests. Fetches run one after another in digit order and the first
//! failure aborts the render, so no partial badge is ever produced.

pub mod http;

use async_trait::async_trait;
use bytes::Bytes;

use hitbadge_core::error::{HitError, Result};
use hitbadge_core::query::GLYPH_COUNT;
use hitbadge_core::render::{decode_glyph, render_png, DecodeLimits, GlyphSet};

pub use http::HttpGlyphFetcher;

/// Source of raw glyph image bytes.
#[async_trait]
pub trait GlyphFetcher: Send + Sync {
    /// `index` is the digit the glyph stands for; used for error reporting.
    async fn fetch(&self, index: usize, url: &str) -> Result<Bytes>;
}

/// Fetch the ten glyphs named by `urls` and draw `count` with them.
pub async fn render_badge(
    fetcher: &dyn GlyphFetcher,
    count: u64,
    urls: &[String],
    limits: DecodeLimits,
) -> Result<Vec<u8>> {
    if urls.len() != GLYPH_COUNT {
        return Err(HitError::InvalidGlyphCount(urls.len()));
    }

    let mut decoded = Vec::with_capacity(GLYPH_COUNT);
    for (index, url) in urls.iter().enumerate() {
        let body = fetcher.fetch(index, url).await?;
        decoded.push(decode_glyph(index, &body, limits)?);
    }
    let glyphs = GlyphSet::new(decoded)?;

    tokio::task::spawn_blocking(move || render_png(count, &glyphs))
        .await
        .map_err(|e| HitError::RenderFailure(format!("render task: {e}")))?
}
