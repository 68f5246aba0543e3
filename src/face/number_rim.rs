//! Ring of twelve numerals, one every five ticks. Each glyph stays upright
//! relative to its radial anchor while the whole ring rotates.

use std::sync::Arc;

use lyon::math::{point, Angle, Point, Transform};
use lyon::path::Path;
use tracing::debug;

use crate::face::canvas::Canvas;
use crate::face::geometry::{bounds_center, rotation_about, DialBounds};
use crate::face::text::{FontMetricsSnapshot, TextPaint};

const NUMBER_COUNT: usize = 12;
const DEGREES_PER_LABEL: f32 = 360.0 / 60.0 * 5.0;

struct Cache {
    bounds: DialBounds,
    padding: f32,
    metrics: FontMetricsSnapshot,
    // Glyph outlines re-centered on their bounding-box center.
    glyphs: Vec<Option<Arc<Path>>>,
    anchor: Point,
}

/// Places a numeral whose outline is centered at the origin: spin it about
/// its own center by `-theta`, carry it to the anchor, then rotate the whole
/// arrangement about the dial center by `theta`. The net linear part is the
/// identity, so the numeral stays upright.
pub fn placement_transform(theta_deg: f32, anchor: Point, center: Point) -> Transform {
    Transform::rotation(Angle::degrees(-theta_deg))
        .then_translate(anchor.to_vector())
        .then(&rotation_about(center, theta_deg))
}

pub struct NumberRim {
    labels: [&'static str; NUMBER_COUNT],
    cache: Option<Cache>,
    revision: u64,
}

impl NumberRim {
    /// Minute numerals 00, 05, .. 55 read counter-clockwise from 3 o'clock.
    pub fn minutes() -> Self {
        Self::new([
            "00", "05", "10", "15", "20", "25", "30", "35", "40", "45", "50", "55",
        ])
    }

    /// Second numerals share the minute labels.
    pub fn seconds() -> Self {
        Self::minutes()
    }

    pub fn new(labels: [&'static str; NUMBER_COUNT]) -> Self {
        Self {
            labels,
            cache: None,
            revision: 0,
        }
    }

    pub fn draw(
        &mut self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        padding: f32,
        rotation: f32,
        paint: &TextPaint,
    ) {
        let metrics = paint.metrics();
        let stale = match self.cache.as_ref() {
            Some(cache) => {
                cache.bounds != *bounds || cache.padding != padding || cache.metrics != metrics
            }
            None => true,
        };
        if stale {
            self.rebuild(bounds, padding, metrics, paint);
        }
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let center = bounds.center();
        for (i, glyph) in cache.glyphs.iter().enumerate() {
            let Some(path) = glyph else { continue };
            let theta = rotation + DEGREES_PER_LABEL * (NUMBER_COUNT - i) as f32;
            let transform = placement_transform(theta, cache.anchor, center);
            canvas.fill_path(Arc::clone(path), transform, paint.color);
        }
    }

    fn rebuild(
        &mut self,
        bounds: &DialBounds,
        padding: f32,
        metrics: FontMetricsSnapshot,
        paint: &TextPaint,
    ) {
        let mut glyphs = Vec::with_capacity(NUMBER_COUNT);
        let mut max_extent = 0.0f32;
        for label in &self.labels {
            let shaped = paint.shaper.text_path(label, paint.px);
            if shaped.is_degenerate() {
                glyphs.push(None);
                continue;
            }
            let center = bounds_center(&shaped.bounds);
            let mut builder = Path::builder();
            let recenter = Transform::translation(-center.x, -center.y);
            crate::face::geometry::append_transformed(&mut builder, &shaped.path, &recenter);
            max_extent = max_extent
                .max(shaped.bounds.max.x - shaped.bounds.min.x)
                .max(shaped.bounds.max.y - shaped.bounds.min.y);
            glyphs.push(Some(Arc::new(builder.build())));
        }
        let anchor = if glyphs.iter().any(Option::is_some) {
            point(bounds.right - padding - max_extent / 2.0, bounds.center_y())
        } else {
            bounds.center()
        };
        self.cache = Some(Cache {
            bounds: *bounds,
            padding,
            metrics,
            glyphs,
            anchor,
        });
        self.revision += 1;
        debug!(revision = self.revision, padding, "number rim rebuilt");
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cached_anchor(&self) -> Option<Point> {
        self.cache.as_ref().map(|cache| cache.anchor)
    }
}
