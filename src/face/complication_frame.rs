//! Curved band enclosing the active complication slots: two rounded end
//! caps and an annular middle section, unioned into one outline.

use std::sync::Arc;

use lyon::math::{point, Point};
use lyon::path::Path;
use tracing::debug;

use crate::face::boolean::{self, Contour};
use crate::face::canvas::{Canvas, Color};
use crate::face::geometry::{
    arc_points, complication_angle_degrees, rotation_about, DialBounds, COMPLICATION_OFFSET,
    COMPLICATION_RADIUS,
};

const CAP_SEGMENTS: usize = 16;
const ARC_SEGMENTS_PER_DEGREE: f32 = 0.5;

struct Cache {
    bounds: DialBounds,
    min_slot: usize,
    max_slot: usize,
    stroke_width: f32,
    path: Arc<Path>,
}

pub struct ComplicationFrame {
    cache: Option<Cache>,
    revision: u64,
}

impl ComplicationFrame {
    pub fn new() -> Self {
        Self {
            cache: None,
            revision: 0,
        }
    }

    /// Draws the band around slots `min_slot..=max_slot`. Callers gate on
    /// the active range; passing no range means nothing to draw.
    pub fn draw(
        &mut self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        active_range: Option<(usize, usize)>,
        fill_color: Color,
        border_color: Color,
        stroke_width: f32,
    ) {
        let Some((min_slot, max_slot)) = active_range else {
            return;
        };
        let stale = match self.cache.as_ref() {
            Some(cache) => {
                cache.bounds != *bounds
                    || cache.min_slot != min_slot
                    || cache.max_slot != max_slot
                    || cache.stroke_width != stroke_width
            }
            None => true,
        };
        if stale {
            self.rebuild(bounds, min_slot, max_slot, stroke_width);
        }
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        let identity = lyon::math::Transform::identity();
        canvas.fill_path(Arc::clone(&cache.path), identity, fill_color);
        canvas.stroke_path(Arc::clone(&cache.path), identity, border_color, stroke_width);
    }

    fn rebuild(&mut self, bounds: &DialBounds, min_slot: usize, max_slot: usize, stroke_width: f32) {
        let w = bounds.width();
        let center = bounds.center();
        let edge_radius = w * COMPLICATION_RADIUS;
        let padding = w * COMPLICATION_OFFSET;
        let band = w * 2.0 * (COMPLICATION_RADIUS + COMPLICATION_OFFSET) - edge_radius;

        // Whole-degree cap angles keep the caps flush with the band arcs.
        let start_angle = complication_angle_degrees(min_slot).floor();
        let end_angle = complication_angle_degrees(max_slot).floor();

        let start_cap = rotate_contour(
            &start_cap_contour(bounds, stroke_width, band, edge_radius, padding),
            center,
            start_angle,
        );
        let end_cap = rotate_contour(
            &end_cap_contour(bounds, stroke_width, band, edge_radius, padding),
            center,
            end_angle,
        );
        let middle = rotate_contour(
            &middle_contour(bounds, stroke_width, band, edge_radius, end_angle - start_angle),
            center,
            start_angle,
        );

        let path = boolean::union(vec![start_cap], vec![middle, end_cap]);
        self.cache = Some(Cache {
            bounds: *bounds,
            min_slot,
            max_slot,
            stroke_width,
            path: Arc::new(path),
        });
        self.revision += 1;
        debug!(revision = self.revision, min_slot, max_slot, "complication frame rebuilt");
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for ComplicationFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Leading end cap at 3 o'clock before rotation: straight edges from just
/// past the dial rim, rounded off with a quarter turn back to the midline.
fn start_cap_contour(
    bounds: &DialBounds,
    stroke_width: f32,
    band: f32,
    edge_radius: f32,
    padding: f32,
) -> Contour {
    let cy = bounds.center_y();
    let mut pts = Vec::with_capacity(CAP_SEGMENTS + 5);
    pts.push(point(bounds.right + stroke_width, cy));
    pts.push(point(bounds.right + stroke_width, cy + edge_radius + padding));
    pts.push(point(bounds.right - band, cy + edge_radius + padding));
    pts.extend(arc_points(
        point(bounds.right - band, cy + padding),
        edge_radius,
        90.0,
        90.0,
        CAP_SEGMENTS,
    ));
    pts.push(point(bounds.right - band - edge_radius, cy));
    boolean::to_contour(&pts)
}

/// Trailing end cap, mirrored across the midline.
fn end_cap_contour(
    bounds: &DialBounds,
    stroke_width: f32,
    band: f32,
    edge_radius: f32,
    padding: f32,
) -> Contour {
    let cy = bounds.center_y();
    let mut pts = Vec::with_capacity(CAP_SEGMENTS + 5);
    pts.push(point(bounds.right + stroke_width, cy));
    pts.push(point(bounds.right + stroke_width, cy - edge_radius - padding));
    pts.push(point(bounds.right - band, cy - edge_radius - padding));
    pts.extend(arc_points(
        point(bounds.right - band, cy - padding),
        edge_radius,
        -90.0,
        -90.0,
        CAP_SEGMENTS,
    ));
    pts.push(point(bounds.right - band - edge_radius, cy));
    boolean::to_contour(&pts)
}

/// Annular section at 3 o'clock before rotation, swept through `sweep`
/// degrees. The outer radius overshoots by the stroke width so the union
/// swallows the cap seams.
fn middle_contour(bounds: &DialBounds, stroke_width: f32, band: f32, edge_radius: f32, sweep: f32) -> Contour {
    let center = bounds.center();
    let outer_radius = bounds.right - center.x + stroke_width;
    let inner_radius = bounds.right - center.x - band - edge_radius;
    let segments = ((sweep.abs() * ARC_SEGMENTS_PER_DEGREE).ceil() as usize).max(8);
    let mut pts = Vec::with_capacity(2 * (segments + 1));
    pts.extend(arc_points(center, outer_radius, 0.0, sweep, segments));
    let mut inner = arc_points(center, inner_radius, 0.0, sweep, segments);
    inner.reverse();
    pts.extend(inner);
    boolean::to_contour(&pts)
}

fn rotate_contour(contour: &Contour, center: Point, degrees: f32) -> Contour {
    let transform = rotation_about(center, degrees);
    contour
        .iter()
        .map(|p| {
            let mapped = transform.transform_point(point(p[0], p[1]));
            [mapped.x, mapped.y]
        })
        .collect()
}
