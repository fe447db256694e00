//! Shared application state for the counter gateway.
//!
//! Storage and glyph fetching are injected as trait objects so tests and
//! alternative deployments can swap them without touching the router.

use std::sync::Arc;

use hitbadge_core::error::Result;

use crate::config::GatewayConfig;
use crate::glyphs::{GlyphFetcher, HttpGlyphFetcher};
use crate::obs::HitMetrics;
use crate::store::{self, KvStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    store: Arc<dyn KvStore>,
    glyphs: Arc<dyn GlyphFetcher>,
    metrics: HitMetrics,
}

impl AppState {
    /// Build application state from config (store backend + HTTP glyph fetcher).
    /// Returns Result so main can report startup errors.
    pub async fn new(cfg: GatewayConfig) -> Result<Self> {
        let store = store::from_config(&cfg.store).await?;
        let glyphs: Arc<dyn GlyphFetcher> = Arc::new(HttpGlyphFetcher::new(&cfg.glyphs)?);

        tracing::info!(store = ?cfg.store.kind, "app state ready");
        Ok(Self::with_parts(cfg, store, glyphs))
    }

    /// Assemble state from explicit collaborators.
    pub fn with_parts(
        cfg: GatewayConfig,
        store: Arc<dyn KvStore>,
        glyphs: Arc<dyn GlyphFetcher>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                glyphs,
                metrics: HitMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &dyn KvStore {
        self.inner.store.as_ref()
    }

    pub fn glyphs(&self) -> &dyn GlyphFetcher {
        self.inner.glyphs.as_ref()
    }

    pub fn metrics(&self) -> &HitMetrics {
        &self.inner.metrics
    }
}
