//! Ring of 60 tick marks. The ring geometry depends only on the dial bounds
//! and the edge padding, so it is rebuilt rarely and rotated per frame.

use std::sync::Arc;

use lyon::path::Path;
use tracing::debug;

use crate::face::canvas::{Canvas, Color};
use crate::face::geometry::{
    append_transformed, contour_to_path, rounded_rect_contour, rotation_about, wrap_degrees,
    DialBounds, LARGE_INDEX_LENGTH_FRACTION, LARGE_INDEX_WIDTH_FRACTION,
    SMALL_INDEX_LENGTH_FRACTION, SMALL_INDEX_WIDTH_FRACTION,
};

const TICK_COUNT: usize = 60;
const TICK_STEP_DEGREES: f32 = 360.0 / TICK_COUNT as f32;
const TICK_CORNER_RADIUS: f32 = 2.0;

struct Cache {
    bounds: DialBounds,
    padding: f32,
    path: Arc<Path>,
}

/// One rim of tick marks at a configurable inset from the dial edge. The
/// face carries two: the minute rim and the inner seconds rim.
pub struct IndexRim {
    small_width_fraction: f32,
    small_length_fraction: f32,
    large_width_fraction: f32,
    large_length_fraction: f32,
    cache: Option<Cache>,
    revision: u64,
}

impl IndexRim {
    pub fn new(
        small_width_fraction: f32,
        small_length_fraction: f32,
        large_width_fraction: f32,
        large_length_fraction: f32,
    ) -> Self {
        Self {
            small_width_fraction,
            small_length_fraction,
            large_width_fraction,
            large_length_fraction,
            cache: None,
            revision: 0,
        }
    }

    /// Rim with the stock tick proportions, used for both the minute and
    /// the seconds track.
    pub fn standard() -> Self {
        Self::new(
            SMALL_INDEX_WIDTH_FRACTION,
            SMALL_INDEX_LENGTH_FRACTION,
            LARGE_INDEX_WIDTH_FRACTION,
            LARGE_INDEX_LENGTH_FRACTION,
        )
    }

    pub fn draw(
        &mut self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        padding: f32,
        rotation: f32,
        color: Color,
    ) {
        let stale = match self.cache.as_ref() {
            Some(cache) => cache.bounds != *bounds || cache.padding != padding,
            None => true,
        };
        if stale {
            self.rebuild(bounds, padding);
        }
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let transform = rotation_about(bounds.center(), wrap_degrees(rotation));
        canvas.fill_path(Arc::clone(&cache.path), transform, color);
    }

    fn rebuild(&mut self, bounds: &DialBounds, padding: f32) {
        let width = bounds.width();
        let center = bounds.center();
        let mut builder = Path::builder();
        for i in 0..TICK_COUNT {
            let large = i % 5 == 0;
            let (tick_width, tick_length) = if large {
                (
                    self.large_width_fraction * width,
                    self.large_length_fraction * width,
                )
            } else {
                (
                    self.small_width_fraction * width,
                    self.small_length_fraction * width,
                )
            };
            let right = bounds.right - padding;
            let radius = TICK_CORNER_RADIUS.min(tick_width / 2.0);
            let tick = contour_to_path(&rounded_rect_contour(
                right - tick_length,
                center.y - tick_width / 2.0,
                right,
                center.y + tick_width / 2.0,
                radius,
            ));
            let placement = rotation_about(center, TICK_STEP_DEGREES * i as f32);
            append_transformed(&mut builder, &tick, &placement);
        }
        self.cache = Some(Cache {
            bounds: *bounds,
            padding,
            path: Arc::new(builder.build()),
        });
        self.revision += 1;
        debug!(revision = self.revision, padding, "index rim rebuilt");
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cached_path(&self) -> Option<Arc<Path>> {
        self.cache.as_ref().map(|cache| Arc::clone(&cache.path))
    }
}
