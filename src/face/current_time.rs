//! Large hour and minute readout. The hour sits on the dial center; the
//! minute hangs at a fixed x so it lines up with the minute rim's anchor.

use std::sync::Arc;

use lyon::math::{Point, Transform, Vector};
use lyon::path::Path;
use tracing::debug;

use crate::face::canvas::Canvas;
use crate::face::geometry::{bounds_center, DialBounds};
use crate::face::text::{FontMetricsSnapshot, TextPaint, TextPath};

struct Cache {
    bounds: DialBounds,
    hour: u8,
    minute: u8,
    hour_metrics: FontMetricsSnapshot,
    minute_metrics: FontMetricsSnapshot,
    // None when the shaper produced no drawable outline.
    hour_placed: Option<(Arc<Path>, Vector)>,
    minute_placed: Option<(Arc<Path>, Vector)>,
}

pub struct CurrentTime {
    minute_center: Point,
    cache: Option<Cache>,
    revision: u64,
}

impl CurrentTime {
    pub fn new(minute_center: Point) -> Self {
        Self {
            minute_center,
            cache: None,
            revision: 0,
        }
    }

    /// X anchor for the minute digits, refreshed whenever the layout pass
    /// re-measures the reference glyphs.
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
        hour: u8,
        minute: u8,
        hour_paint: &TextPaint,
        minute_paint: &TextPaint,
    ) {
        let hour_metrics = hour_paint.metrics();
        let minute_metrics = minute_paint.metrics();
        let stale = match self.cache.as_ref() {
            Some(cache) => {
                cache.bounds != *bounds
                    || cache.hour != hour
                    || cache.minute != minute
                    || cache.hour_metrics != hour_metrics
                    || cache.minute_metrics != minute_metrics
            }
            None => true,
        };
        if stale {
            self.rebuild(bounds, hour, minute, hour_paint, minute_paint);
        }
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        if let Some((path, offset)) = &cache.hour_placed {
            canvas.fill_path(
                Arc::clone(path),
                Transform::translation(offset.x, offset.y),
                hour_paint.color,
            );
        }
        if let Some((path, offset)) = &cache.minute_placed {
            canvas.fill_path(
                Arc::clone(path),
                Transform::translation(offset.x, offset.y),
                minute_paint.color,
            );
        }
    }

    fn rebuild(
        &mut self,
        bounds: &DialBounds,
        hour: u8,
        minute: u8,
        hour_paint: &TextPaint,
        minute_paint: &TextPaint,
    ) {
        let hour_text = format!("{hour:02}");
        let minute_text = format!("{minute:02}");
        let hour_shaped = hour_paint.shaper.text_path(&hour_text, hour_paint.px);
        let minute_shaped = minute_paint.shaper.text_path(&minute_text, minute_paint.px);

        let hour_placed = center_on(&hour_shaped, bounds.center());
        let minute_placed = center_on(&minute_shaped, self.minute_center);

        self.cache = Some(Cache {
            bounds: *bounds,
            hour,
            minute,
            hour_metrics: hour_paint.metrics(),
            minute_metrics: minute_paint.metrics(),
            hour_placed,
            minute_placed,
        });
        self.revision += 1;
        debug!(revision = self.revision, hour, minute, "time readout rebuilt");
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cached_hour_offset(&self) -> Option<Vector> {
        self.cache
            .as_ref()
            .and_then(|cache| cache.hour_placed.as_ref().map(|(_, offset)| *offset))
    }

    pub fn cached_minute_offset(&self) -> Option<Vector> {
        self.cache
            .as_ref()
            .and_then(|cache| cache.minute_placed.as_ref().map(|(_, offset)| *offset))
    }
}

fn center_on(shaped: &TextPath, target: Point) -> Option<(Arc<Path>, Vector)> {
    if shaped.is_degenerate() {
        return None;
    }
    let center = bounds_center(&shaped.bounds);
    Some((Arc::clone(&shaped.path), target - center))
}
