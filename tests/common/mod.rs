//! Shared test shapers. Rendering glyph rectangles instead of real font
//! outlines keeps the geometry deterministic and the suite independent of
//! installed fonts.

use lyon::math::point;
use lyon::path::Path;

use concentric_face::face::text::{FontMetricsSnapshot, TextPath, TextShaper};

pub const BLOCK_ADVANCE_FACTOR: f32 = 0.6;
pub const BLOCK_HEIGHT_FACTOR: f32 = 0.7;
pub const BLOCK_ASCENT_FACTOR: f32 = 0.74;
pub const BLOCK_DESCENT_FACTOR: f32 = -0.26;

/// Shapes every character as a solid rectangle sitting on the baseline.
pub struct BlockShaper {
    pub face_key: u64,
}

impl BlockShaper {
    pub fn new() -> Self {
        Self { face_key: 1 }
    }
}

impl TextShaper for BlockShaper {
    fn text_path(&self, text: &str, px: f32) -> TextPath {
        let advance = px * BLOCK_ADVANCE_FACTOR;
        let height = px * BLOCK_HEIGHT_FACTOR;
        let mut builder = Path::builder();
        for (i, _) in text.chars().enumerate() {
            let left = i as f32 * advance;
            builder.begin(point(left, -height));
            builder.line_to(point(left + advance, -height));
            builder.line_to(point(left + advance, 0.0));
            builder.line_to(point(left, 0.0));
            builder.end(true);
        }
        TextPath::from_path(builder.build())
    }

    fn metrics(&self, px: f32) -> FontMetricsSnapshot {
        FontMetricsSnapshot {
            face_key: self.face_key,
            px,
            ascent: px * BLOCK_ASCENT_FACTOR,
            descent: px * BLOCK_DESCENT_FACTOR,
        }
    }
}

/// Produces no outline for any input, modelling a face without usable
/// glyph data.
pub struct EmptyShaper;

impl TextShaper for EmptyShaper {
    fn text_path(&self, _text: &str, _px: f32) -> TextPath {
        TextPath::from_path(Path::builder().build())
    }

    fn metrics(&self, px: f32) -> FontMetricsSnapshot {
        FontMetricsSnapshot {
            face_key: 0,
            px,
            ascent: px * BLOCK_ASCENT_FACTOR,
            descent: px * BLOCK_DESCENT_FACTOR,
        }
    }
}
