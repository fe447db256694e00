//! HTTP(S) glyph fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use url::Url;

use hitbadge_core::error::{HitError, Result};

use super::GlyphFetcher;
use crate::config::GlyphSection;

pub struct HttpGlyphFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpGlyphFetcher {
    pub fn new(cfg: &GlyphSection) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.fetch_timeout_ms))
            .build()
            .map_err(|e| HitError::BadConfig(format!("http client: {e}")))?;
        Ok(Self::with_client(client, cfg.max_glyph_bytes))
    }

    /// Use a preconfigured client; the body cap still applies.
    pub fn with_client(client: reqwest::Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }
}

/// Only absolute http/https URLs are fetched.
pub fn parse_glyph_url(index: usize, raw: &str) -> Result<Url> {
    let fail = |reason: String| HitError::GlyphFetchFailure { index, reason };
    let url = Url::parse(raw).map_err(|e| fail(format!("bad url {raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(fail(format!("unsupported scheme {other:?}"))),
    }
}

#[async_trait]
impl GlyphFetcher for HttpGlyphFetcher {
    async fn fetch(&self, index: usize, url: &str) -> Result<Bytes> {
        let fail = |reason: String| HitError::GlyphFetchFailure { index, reason };
        let url = parse_glyph_url(index, url)?;

        let mut resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fail(format!("request: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fail(format!("status {status}")));
        }
        if resp.content_length().is_some_and(|n| n > self.max_bytes as u64) {
            return Err(fail(format!("body exceeds {} bytes", self.max_bytes)));
        }

        let mut buf = BytesMut::new();
        while let Some(chunk) = resp.chunk().await.map_err(|e| fail(format!("body: {e}")))? {
            if buf.len() + chunk.len() > self.max_bytes {
                return Err(fail(format!("body exceeds {} bytes", self.max_bytes)));
            }
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}
