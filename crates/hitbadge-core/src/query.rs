//! Query string interpretation.
//!
//! Parsing is lenient: unknown parameters are ignored and, as with the
//! browser `URLSearchParams.get`, the first occurrence of a name wins.

use url::form_urlencoded;

/// Number of glyphs a badge needs (digits 0-9).
pub const GLYPH_COUNT: usize = 10;

/// Response representation selected by `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Text,
    Json,
    Image,
}

impl Representation {
    pub fn as_str(self) -> &'static str {
        match self {
            Representation::Text => "text",
            Representation::Json => "json",
            Representation::Image => "image",
        }
    }
}

/// Parameters relevant to a counting request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitQuery {
    pub kind: Option<String>,
    pub images: Option<String>,
}

impl HitQuery {
    /// Parse a raw (still percent-encoded) query string.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut q = HitQuery::default();
        let Some(raw) = raw else {
            return q;
        };

        for (k, v) in form_urlencoded::parse(raw.as_bytes()) {
            match k.as_ref() {
                "type" if q.kind.is_none() => q.kind = Some(v.into_owned()),
                "images" if q.images.is_none() => q.images = Some(v.into_owned()),
                _ => {}
            }
        }
        q
    }

    /// Unrecognised `type` values fall back to plain text.
    pub fn representation(&self) -> Representation {
        match self.kind.as_deref() {
            Some("json") => Representation::Json,
            Some("image") => Representation::Image,
            _ => Representation::Text,
        }
    }

    /// `images` split on `;`. Absent yields an empty list; an empty value
    /// yields one empty entry.
    pub fn glyph_urls(&self) -> Vec<String> {
        match self.images.as_deref() {
            None => Vec::new(),
            Some(s) => s.split(';').map(str::to_owned).collect(),
        }
    }
}
