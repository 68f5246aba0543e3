//! Capsule framing the minute readout: a stroked outline plus a dimmed
//! backdrop clipped to the dial's inner disc.

use std::sync::Arc;

use lyon::math::{point, Point};
use lyon::path::Path;
use tracing::debug;

use crate::face::boolean;
use crate::face::canvas::{Canvas, Color};
use crate::face::geometry::{
    arc_points, circle_contour, contour_to_path, DialBounds, LARGE_INDEX_LENGTH_FRACTION,
    MINUTES_INDEX_PADDING_FRACTION, SMALL_INDEX_LENGTH_FRACTION,
};
use crate::face::text::FontMetricsSnapshot;

const CAP_SEGMENTS: usize = 16;
const DISC_SEGMENTS: usize = 96;

struct Cache {
    bounds: DialBounds,
    metrics: FontMetricsSnapshot,
    low_bit: bool,
    outline: Arc<Path>,
    backdrop: Arc<Path>,
}

pub struct MinuteFrame {
    minute_center: Point,
    cache: Option<Cache>,
    revision: u64,
}

impl MinuteFrame {
    pub fn new(minute_center: Point) -> Self {
        Self {
            minute_center,
            cache: None,
            revision: 0,
        }
    }

    pub fn set_minute_center(&mut self, minute_center: Point) {
        if self.minute_center != minute_center {
            self.minute_center = minute_center;
            self.cache = None;
        }
    }

    pub fn draw(
        &mut self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        metrics: FontMetricsSnapshot,
        low_bit: bool,
        border_color: Color,
        backdrop_color: Color,
        stroke_width: f32,
    ) {
        let stale = match self.cache.as_ref() {
            Some(cache) => {
                cache.bounds != *bounds || cache.metrics != metrics || cache.low_bit != low_bit
            }
            None => true,
        };
        if stale {
            self.rebuild(bounds, metrics, low_bit);
        }
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let identity = lyon::math::Transform::identity();
        canvas.fill_path(Arc::clone(&cache.backdrop), identity, backdrop_color);
        canvas.stroke_path(Arc::clone(&cache.outline), identity, border_color, stroke_width);
    }

    fn rebuild(&mut self, bounds: &DialBounds, metrics: FontMetricsSnapshot, low_bit: bool) {
        let width = bounds.width();
        let cy = self.minute_center.y;
        let radius = metrics.ascent.abs();
        let small_len = SMALL_INDEX_LENGTH_FRACTION * width;
        let left_cap = point(self.minute_center.x - small_len / 2.0, cy);
        // In low-bit modes the capsule stops short of the dial edge instead
        // of running under the (hidden) minute rim.
        let right_cap = if low_bit {
            point(self.minute_center.x + small_len / 2.0, cy)
        } else {
            point(bounds.right, cy)
        };

        let mut capsule = Vec::with_capacity(2 * (CAP_SEGMENTS + 1));
        capsule.extend(arc_points(left_cap, radius, 90.0, 180.0, CAP_SEGMENTS));
        capsule.extend(arc_points(right_cap, radius, -90.0, 180.0, CAP_SEGMENTS));
        let outline = contour_to_path(&capsule);

        let inner_right =
            bounds.right - (MINUTES_INDEX_PADDING_FRACTION + LARGE_INDEX_LENGTH_FRACTION) * width;
        let disc_radius = inner_right - bounds.center_x();
        let disc = circle_contour(bounds.center(), disc_radius, DISC_SEGMENTS);
        let backdrop = boolean::intersection(
            vec![boolean::to_contour(&disc)],
            vec![boolean::to_contour(&capsule)],
        );

        self.cache = Some(Cache {
            bounds: *bounds,
            metrics,
            low_bit,
            outline: Arc::new(outline),
            backdrop: Arc::new(backdrop),
        });
        self.revision += 1;
        debug!(revision = self.revision, low_bit, "minute frame rebuilt");
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
