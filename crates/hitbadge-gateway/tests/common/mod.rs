//! Shared fixtures for gateway integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bytes::Bytes;
use image::{ImageFormat, Rgba, RgbaImage};
use tower::ServiceExt;

use hitbadge_core::error::{HitError, Result};
use hitbadge_gateway::app_state::AppState;
use hitbadge_gateway::config::GatewayConfig;
use hitbadge_gateway::glyphs::GlyphFetcher;
use hitbadge_gateway::router::build_router;
use hitbadge_gateway::store::{KvStore, MemoryStore};

pub const GLYPH_W: u32 = 5;
pub const GLYPH_H: u32 = 8;

/// Solid PNG whose red channel encodes `id`.
pub fn glyph_png(id: u8) -> Vec<u8> {
    let img = RgbaImage::from_pixel(GLYPH_W, GLYPH_H, Rgba([id * 20 + 10, 0, 0, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Glyph id drawn in badge cell `cell`.
pub fn glyph_id_at(img: &RgbaImage, cell: u32) -> u8 {
    let px = img.get_pixel(cell * GLYPH_W + GLYPH_W / 2, GLYPH_H / 2);
    ((f32::from(px[0]) - 10.0) / 20.0).round() as u8
}

/// `http://glyphs.test/<id>.png` for each id, `;`-joined.
pub fn images_param(ids: &[u8]) -> String {
    ids.iter()
        .map(|i| format!("http://glyphs.test/{i}.png"))
        .collect::<Vec<_>>()
        .join(";")
}

pub fn digit_glyphs() -> String {
    images_param(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9])
}

/// Serves `glyph_png(id)` for `http://glyphs.test/<id>.png`, fails otherwise.
#[derive(Default)]
pub struct StubGlyphs {
    pub fetches: AtomicUsize,
}

#[async_trait]
impl GlyphFetcher for StubGlyphs {
    async fn fetch(&self, index: usize, url: &str) -> Result<Bytes> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let id = url
            .strip_prefix("http://glyphs.test/")
            .and_then(|s| s.strip_suffix(".png"))
            .and_then(|s| s.parse::<u8>().ok())
            .ok_or_else(|| HitError::GlyphFetchFailure {
                index,
                reason: format!("404 {url}"),
            })?;
        Ok(Bytes::from(glyph_png(id)))
    }
}

/// Wraps a store; can be told to fail reads or writes.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_get: AtomicBool,
    pub fail_put: AtomicBool,
    pub puts: AtomicUsize,
}

#[async_trait]
impl KvStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(HitError::StorageUnavailable("injected get failure".into()));
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(HitError::StorageUnavailable("injected put failure".into()));
        }
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, value).await
    }
}

pub struct Harness {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<FlakyStore>,
    pub glyphs: Arc<StubGlyphs>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    pub fn with_config(cfg: GatewayConfig) -> Self {
        let store = Arc::new(FlakyStore::default());
        let glyphs = Arc::new(StubGlyphs::default());
        let state = AppState::with_parts(cfg, store.clone(), glyphs.clone());
        Self {
            router: build_router(state.clone()),
            state,
            store,
            glyphs,
        }
    }

    pub async fn send(&self, method: &str, uri: &str) -> (Response<Body>, Bytes) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let (parts, body) = resp.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        (Response::from_parts(parts, Body::empty()), bytes)
    }

    pub async fn get(&self, uri: &str) -> (Response<Body>, Bytes) {
        self.send("GET", uri).await
    }

    /// Write raw counter text for `path`, bypassing the handler.
    pub async fn seed(&self, path: &str, text: &str) {
        let key = hitbadge_core::key::CounterKey::from_path(path);
        self.store.inner.put(key.as_str(), text.to_string()).await.unwrap();
    }

    pub async fn stored(&self, path: &str) -> Option<String> {
        let key = hitbadge_core::key::CounterKey::from_path(path);
        self.store.inner.get(key.as_str()).await.unwrap()
    }
}

pub fn content_type(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
