use std::path::PathBuf;

use serde::Deserialize;
use hitbadge_core::error::{HitError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub glyphs: GlyphSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HitError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.store.validate()?;
        self.glyphs.validate()?;

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            store: StoreSection::default(),
            glyphs: GlyphSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Serve Prometheus text here instead of counting it. Disabled when absent.
    #[serde(default)]
    pub metrics_path: Option<String>,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: None,
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if let Some(p) = &self.metrics_path {
            if !p.starts_with('/') || p == "/" {
                return Err(HitError::BadConfig(
                    "gateway.metrics_path must start with '/' and not be the root".into(),
                ));
            }
            if p.contains([':', '*', '{', '}']) {
                return Err(HitError::BadConfig(
                    "gateway.metrics_path must be a literal path (no ':', '*', '{' or '}')".into(),
                ));
            }
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    Dir,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub kind: StoreKind,

    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.kind == StoreKind::Dir && self.path.is_none() {
            return Err(HitError::BadConfig("store.path is required for kind=dir".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlyphSection {
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    #[serde(default = "default_max_glyph_bytes")]
    pub max_glyph_bytes: usize,

    /// Largest decoded glyph, width * height.
    #[serde(default = "default_max_glyph_pixels")]
    pub max_glyph_pixels: u64,
}

impl Default for GlyphSection {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            max_glyph_bytes: default_max_glyph_bytes(),
            max_glyph_pixels: default_max_glyph_pixels(),
        }
    }
}

impl GlyphSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.fetch_timeout_ms) {
            return Err(HitError::BadConfig(
                "glyphs.fetch_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if !(1..=16 * 1024 * 1024).contains(&self.max_glyph_bytes) {
            return Err(HitError::BadConfig(
                "glyphs.max_glyph_bytes must be between 1 and 16777216".into(),
            ));
        }
        if !(1..=4096 * 4096).contains(&self.max_glyph_pixels) {
            return Err(HitError::BadConfig(
                "glyphs.max_glyph_pixels must be between 1 and 16777216".into(),
            ));
        }
        Ok(())
    }
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}
fn default_max_glyph_bytes() -> usize {
    1024 * 1024
}
fn default_max_glyph_pixels() -> u64 {
    512 * 512
}
