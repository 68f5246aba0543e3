//! Glyph outlines and font metrics. Text on the face is vector geometry, so
//! glyphs are outlined once per cache rebuild and re-stroked every frame.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ab_glyph::{Font, FontArc, FontVec, GlyphId, OutlineCurve, PxScale, ScaleFont};
use anyhow::{anyhow, Context, Result};
use fontdb::{Database, Family, Query};
use lyon::math::{point, Box2D};
use lyon::path::Path;
use tracing::{debug, info};

use crate::face::geometry::{is_degenerate, path_bounds};

/// Measured font state a cached layout was computed against. Two paints with
/// the same measurements compare equal regardless of object identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetricsSnapshot {
    pub face_key: u64,
    pub px: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// A shaped run: vector outline with baseline at y = 0 and the pen starting
/// at x = 0, plus its control-point bounds.
#[derive(Clone)]
pub struct TextPath {
    pub path: Arc<Path>,
    pub bounds: Box2D,
}

impl TextPath {
    pub fn from_path(path: Path) -> Self {
        let bounds = path_bounds(&path);
        Self {
            path: Arc::new(path),
            bounds,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        is_degenerate(&self.bounds)
    }
}

/// Outline and measurement source for the face's numerals.
pub trait TextShaper {
    fn text_path(&self, text: &str, px: f32) -> TextPath;
    fn metrics(&self, px: f32) -> FontMetricsSnapshot;
}

/// Everything a component needs to lay out and color a run of text.
pub struct TextPaint<'a> {
    pub shaper: &'a dyn TextShaper,
    pub px: f32,
    pub color: crate::face::canvas::Color,
}

impl TextPaint<'_> {
    pub fn metrics(&self) -> FontMetricsSnapshot {
        self.shaper.metrics(self.px)
    }
}

/// Production shaper over an `ab_glyph` face.
pub struct FaceFont {
    font: FontArc,
    key: u64,
}

impl FaceFont {
    pub fn new(font: FontArc, key: u64) -> Self {
        Self { font, key }
    }
}

impl TextShaper for FaceFont {
    fn text_path(&self, text: &str, px: f32) -> TextPath {
        let scaled = self.font.as_scaled(PxScale::from(px));
        // ab_glyph outlines are in font units with y up; scale to px and
        // flip into screen space.
        let units_to_px = scaled.scale().y / self.font.height_unscaled();
        let mut builder = Path::builder();
        let mut pen_x = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = previous {
                pen_x += scaled.kern(prev, id);
            }
            if let Some(outline) = self.font.outline(id) {
                append_outline(&mut builder, &outline.curves, units_to_px, pen_x);
            }
            pen_x += scaled.h_advance(id);
            previous = Some(id);
        }
        TextPath::from_path(builder.build())
    }

    fn metrics(&self, px: f32) -> FontMetricsSnapshot {
        let scaled = self.font.as_scaled(PxScale::from(px));
        FontMetricsSnapshot {
            face_key: self.key,
            px,
            ascent: scaled.ascent(),
            descent: scaled.descent(),
        }
    }
}

fn append_outline(
    builder: &mut lyon::path::path::Builder,
    curves: &[OutlineCurve],
    scale: f32,
    pen_x: f32,
) {
    let map = |p: ab_glyph::Point| point(pen_x + p.x * scale, -p.y * scale);
    let mut started = false;
    let mut cursor = ab_glyph::Point::default();
    for curve in curves {
        let (start, end) = match curve {
            OutlineCurve::Line(a, b) => (*a, *b),
            OutlineCurve::Quad(a, _, c) => (*a, *c),
            OutlineCurve::Cubic(a, _, _, d) => (*a, *d),
        };
        if !started || start != cursor {
            if started {
                builder.end(true);
            }
            builder.begin(map(start));
            started = true;
        }
        match curve {
            OutlineCurve::Line(_, b) => {
                builder.line_to(map(*b));
            }
            OutlineCurve::Quad(_, b, c) => {
                builder.quadratic_bezier_to(map(*b), map(*c));
            }
            OutlineCurve::Cubic(_, b, c, d) => {
                builder.cubic_bezier_to(map(*b), map(*c), map(*d));
            }
        }
        cursor = end;
    }
    if started {
        builder.end(true);
    }
}

/// Resolves font options against the installed system faces. Fonts are
/// resolved once at startup; a miss here is fatal, never handled per frame.
pub struct FontLibrary {
    db: Database,
}

impl FontLibrary {
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        info!(faces = db.len(), "system font database loaded");
        Self { db }
    }

    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Looks up the first matching family, falling back to any sans-serif.
    pub fn resolve(&self, families: &[&str]) -> Result<FaceFont> {
        let mut query_families: Vec<Family> =
            families.iter().copied().map(Family::Name).collect();
        query_families.push(Family::SansSerif);
        let id = self
            .db
            .query(&Query {
                families: &query_families,
                ..Query::default()
            })
            .ok_or_else(|| anyhow!("no usable font face for {:?}", families))?;
        let font = self
            .db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index)
                    .ok()
                    .map(FontArc::new)
            })
            .flatten()
            .with_context(|| format!("decoding font face for {:?}", families))?;
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        let key = hasher.finish();
        debug!(requested = ?families, key, "font face resolved");
        Ok(FaceFont::new(font, key))
    }
}
