//! Digit badge compositing.
//!
//! A badge is the decimal digits of a count laid side by side, each digit
//! drawn with the glyph at the same position in a ten-entry glyph set. Glyph
//! dimensions are taken from glyph 0; any glyph with a different size is
//! resized to fit its cell.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Limits, RgbaImage};

use crate::count::decimal_digits;
use crate::error::{HitError, Result};
use crate::query::GLYPH_COUNT;

/// Ten decoded glyphs, index = digit.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    glyphs: Vec<RgbaImage>,
}

impl GlyphSet {
    pub fn new(glyphs: Vec<DynamicImage>) -> Result<Self> {
        if glyphs.len() != GLYPH_COUNT {
            return Err(HitError::InvalidGlyphCount(glyphs.len()));
        }
        Ok(Self {
            glyphs: glyphs.into_iter().map(|g| g.to_rgba8()).collect(),
        })
    }

    /// Cell size, from glyph 0.
    pub fn cell(&self) -> (u32, u32) {
        self.glyphs
            .first()
            .map(|g| g.dimensions())
            .unwrap_or((0, 0))
    }

    fn glyph(&self, digit: u8) -> Result<&RgbaImage> {
        self.glyphs
            .get(usize::from(digit))
            .ok_or_else(|| HitError::RenderFailure(format!("no glyph for digit {digit}")))
    }
}

/// Upper bound on a decoded glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// width * height
    pub max_pixels: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self { max_pixels: 512 * 512 }
    }
}

// Widest decoder output: four f32 channels.
const MAX_BYTES_PER_PIXEL: u64 = 16;
// Decoder scratch space on top of the pixel buffer.
const DECODE_SLACK_BYTES: u64 = 1 << 20;

/// Decode one fetched glyph body (PNG, GIF or JPEG).
///
/// Dimensions are read from the header and checked against `limits` before
/// any pixel buffer is allocated; the decoder itself also runs with an
/// allocation cap derived from the same bound.
pub fn decode_glyph(index: usize, bytes: &[u8], limits: DecodeLimits) -> Result<DynamicImage> {
    let fail = |reason: String| HitError::GlyphFetchFailure { index, reason };
    let reader = || {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| fail(format!("sniff: {e}")))
    };

    let (w, h) = reader()?
        .into_dimensions()
        .map_err(|e| fail(format!("decode: {e}")))?;
    if u64::from(w) * u64::from(h) > limits.max_pixels {
        return Err(fail(format!("{w}x{h} exceeds {} pixels", limits.max_pixels)));
    }

    let side = u32::try_from(limits.max_pixels).unwrap_or(u32::MAX);
    let mut caps = Limits::default();
    caps.max_image_width = Some(side);
    caps.max_image_height = Some(side);
    caps.max_alloc = Some(
        limits
            .max_pixels
            .saturating_mul(MAX_BYTES_PER_PIXEL)
            .saturating_add(DECODE_SLACK_BYTES),
    );

    let mut reader = reader()?;
    reader.limits(caps);
    reader.decode().map_err(|e| fail(format!("decode: {e}")))
}

/// Lay out the digits of `count` into a single raster.
pub fn compose(count: u64, glyphs: &GlyphSet) -> Result<RgbaImage> {
    let (cw, ch) = glyphs.cell();
    if cw == 0 || ch == 0 {
        return Err(HitError::RenderFailure(format!("degenerate glyph size {cw}x{ch}")));
    }

    let digits = decimal_digits(count);
    let width = u32::try_from(digits.len())
        .ok()
        .and_then(|n| n.checked_mul(cw))
        .ok_or_else(|| HitError::RenderFailure("badge width overflows".into()))?;

    let mut canvas = RgbaImage::new(width, ch);
    for (i, &d) in digits.iter().enumerate() {
        let glyph = glyphs.glyph(d)?;
        let x = i64::from(cw) * i as i64;
        if glyph.dimensions() == (cw, ch) {
            imageops::replace(&mut canvas, glyph, x, 0);
        } else {
            let fitted = imageops::resize(glyph, cw, ch, FilterType::Triangle);
            imageops::replace(&mut canvas, &fitted, x, 0);
        }
    }

    tracing::trace!(count, width, height = ch, "badge composed");
    Ok(canvas)
}

/// Encode a composed badge as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| HitError::RenderFailure(format!("png encode: {e}")))?;
    Ok(buf.into_inner())
}

/// `compose` then `encode_png`.
pub fn render_png(count: u64, glyphs: &GlyphSet) -> Result<Vec<u8>> {
    encode_png(&compose(count, glyphs)?)
}
