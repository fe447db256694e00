//! Badge compositing tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Rgba, RgbaImage};

use hitbadge_core::render::{compose, decode_glyph, encode_png, render_png, DecodeLimits, GlyphSet};

const W: u32 = 4;
const H: u32 = 6;

/// Solid glyph whose red channel identifies the digit.
fn glyph(d: u8, w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([d * 20 + 10, 0, 0, 255])))
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

// Smallest well-formed GIF89a: one transparent pixel.
const ONE_PIXEL_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x21, 0xf9, 0x04, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
    0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

fn glyph_set() -> GlyphSet {
    GlyphSet::new((0..10).map(|d| glyph(d, W, H)).collect()).unwrap()
}

fn digit_at(img: &RgbaImage, cell: u32) -> u8 {
    let px = img.get_pixel(cell * W + W / 2, H / 2);
    ((f32::from(px[0]) - 10.0) / 20.0).round() as u8
}

#[test]
fn wrong_glyph_count_is_rejected() {
    for n in [0usize, 1, 9, 11] {
        let err = GlyphSet::new((0..n).map(|_| glyph(0, W, H)).collect()).unwrap_err();
        assert_eq!(err.client_code().as_str(), "INVALID_GLYPH_COUNT", "n={n}");
    }
}

#[test]
fn single_digit_is_one_cell() {
    let img = compose(7, &glyph_set()).unwrap();
    assert_eq!(img.dimensions(), (W, H));
    assert_eq!(digit_at(&img, 0), 7);
}

#[test]
fn zero_renders_one_zero_glyph() {
    let img = compose(0, &glyph_set()).unwrap();
    assert_eq!(img.dimensions(), (W, H));
    assert_eq!(digit_at(&img, 0), 0);
}

#[test]
fn multi_digit_order_is_left_to_right() {
    let img = compose(104, &glyph_set()).unwrap();
    assert_eq!(img.dimensions(), (W * 3, H));
    assert_eq!(digit_at(&img, 0), 1);
    assert_eq!(digit_at(&img, 1), 0);
    assert_eq!(digit_at(&img, 2), 4);
}

#[test]
fn odd_sized_glyph_is_fitted_to_cell() {
    let mut glyphs: Vec<DynamicImage> = (0..10).map(|d| glyph(d, W, H)).collect();
    glyphs[5] = glyph(5, W * 3, H * 2);
    let set = GlyphSet::new(glyphs).unwrap();

    let img = compose(55, &set).unwrap();
    assert_eq!(img.dimensions(), (W * 2, H));
    assert_eq!(digit_at(&img, 0), 5);
    assert_eq!(digit_at(&img, 1), 5);
}

#[test]
fn degenerate_cell_fails() {
    let mut glyphs: Vec<DynamicImage> = (0..10).map(|d| glyph(d, W, H)).collect();
    glyphs[0] = DynamicImage::ImageRgba8(RgbaImage::new(0, H));
    let set = GlyphSet::new(glyphs).unwrap();
    let err = compose(1, &set).unwrap_err();
    assert_eq!(err.client_code().as_str(), "RENDER_FAILURE");
}

#[test]
fn png_output_decodes_back() {
    let bytes = render_png(2024, &glyph_set()).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let back = decode_glyph(0, &bytes, DecodeLimits::default()).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (W * 4, H));
    assert_eq!(digit_at(&back, 3), 4);
}

#[test]
fn undecodable_glyph_reports_index() {
    let err = decode_glyph(3, b"not an image", DecodeLimits::default()).unwrap_err();
    assert_eq!(err.client_code().as_str(), "GLYPH_FETCH_FAILURE");
    assert!(err.to_string().contains("glyph 3"));
}

#[test]
fn encode_png_of_composed_badge() {
    let img = compose(9, &glyph_set()).unwrap();
    assert!(!encode_png(&img).unwrap().is_empty());
}

#[test]
fn gif_glyph_decodes() {
    let img = decode_glyph(0, ONE_PIXEL_GIF, DecodeLimits::default()).unwrap();
    assert_eq!((img.width(), img.height()), (1, 1));
}

#[test]
fn badge_from_gif_glyphs() {
    let glyphs = (0..10)
        .map(|d| {
            let bytes = encode(&glyph(d, W, H), ImageFormat::Gif);
            decode_glyph(usize::from(d), &bytes, DecodeLimits::default()).unwrap()
        })
        .collect();
    let img = compose(381, &GlyphSet::new(glyphs).unwrap()).unwrap();
    assert_eq!(img.dimensions(), (W * 3, H));
    assert_eq!(digit_at(&img, 0), 3);
    assert_eq!(digit_at(&img, 1), 8);
    assert_eq!(digit_at(&img, 2), 1);
}

#[test]
fn jpeg_glyph_decodes() {
    let rgb = DynamicImage::ImageRgb8(glyph(2, W, H).to_rgb8());
    let bytes = encode(&rgb, ImageFormat::Jpeg);
    let img = decode_glyph(2, &bytes, DecodeLimits::default()).unwrap();
    assert_eq!((img.width(), img.height()), (W, H));
}

#[test]
fn oversized_glyph_is_refused_before_decode() {
    // a large, flat image compresses to a tiny body
    let big = DynamicImage::ImageLuma8(GrayImage::new(2000, 2000));
    let bytes = encode(&big, ImageFormat::Png);
    assert!(bytes.len() < 64 * 1024);

    let err = decode_glyph(6, &bytes, DecodeLimits { max_pixels: 512 * 512 }).unwrap_err();
    assert_eq!(err.client_code().as_str(), "GLYPH_FETCH_FAILURE");
    assert!(err.to_string().contains("glyph 6"));
    assert!(err.to_string().contains("2000x2000"));
}

#[test]
fn glyph_at_the_pixel_limit_is_accepted() {
    let bytes = encode(&glyph(1, W, H), ImageFormat::Png);
    let limits = DecodeLimits {
        max_pixels: u64::from(W * H),
    };
    assert!(decode_glyph(1, &bytes, limits).is_ok());
    let tighter = DecodeLimits {
        max_pixels: u64::from(W * H) - 1,
    };
    assert!(decode_glyph(1, &bytes, tighter).is_err());
}
