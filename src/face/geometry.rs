//! Closed-form dial geometry: every length on the face is a fraction of the
//! dial width, every placement a rotation about the dial center.

use std::f32::consts::PI;

use lyon::math::{point, vector, Angle, Box2D, Point, Transform};
use lyon::path::{Event, Path};

// Index (tick) and text layout fractions of the dial width.
pub const SMALL_INDEX_WIDTH_FRACTION: f32 = 0.005;
pub const SMALL_INDEX_LENGTH_FRACTION: f32 = 0.022;
pub const LARGE_INDEX_WIDTH_FRACTION: f32 = 0.005;
pub const LARGE_INDEX_LENGTH_FRACTION: f32 = 0.035;
pub const MINUTES_TEXT_PADDING_FRACTION: f32 = 0.185;
pub const MINUTES_INDEX_PADDING_FRACTION: f32 = 0.140;
pub const SECONDS_TEXT_PADDING_FRACTION: f32 = 0.050;
pub const SECONDS_INDEX_PADDING_FRACTION: f32 = 0.005;
pub const HOUR_TEXT_SIZE_FRACTION: f32 = 0.235;
pub const MINUTE_TEXT_SIZE_FRACTION: f32 = 0.1;
pub const MINUTES_TEXT_SIZE_FRACTION: f32 = 0.063;
pub const SECONDS_TEXT_SIZE_FRACTION: f32 = 0.063;

// Complication cluster layout, in dial fractions.
pub const COMPLICATION_OFFSET: f32 = 0.025;
pub const COMPLICATION_RADIUS: f32 = 0.1;
pub const COMPLICATION_ANGLE_STEP: f32 = PI / 5.0;

const MILLIS_PER_HOUR: u32 = 3_600_000;
const MILLIS_PER_MINUTE: u32 = 60_000;

/// The square region the watch face occupies this frame. All proportional
/// geometry derives from its width; value equality drives cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DialBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl DialBounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn square(size: f32) -> Self {
        Self::new(0.0, 0.0, size, size)
    }

    /// Largest centered square inside a surface of the given pixel size.
    pub fn from_surface(width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        let side = w.min(h);
        let left = (w - side) / 2.0;
        let top = (h - side) / 2.0;
        Self::new(left, top, left + side, top + side)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    pub fn center(&self) -> Point {
        point(self.center_x(), self.center_y())
    }
}

/// Relative bounds of a complication slot, in [0, 1] dial-fraction space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SlotRect {
    pub fn to_px(&self, bounds: &DialBounds) -> (Point, Point) {
        let w = bounds.width();
        let h = bounds.height();
        (
            point(bounds.left + self.left * w, bounds.top + self.top * h),
            point(bounds.left + self.right * w, bounds.top + self.bottom * h),
        )
    }
}

/// Angular position of complication slot `i`, in radians. Slot 2 sits at
/// 9 o'clock; its neighbors fan out by one step each.
pub fn complication_angle(i: usize) -> f32 {
    PI + (2.0 - i as f32) * COMPLICATION_ANGLE_STEP
}

pub fn complication_angle_degrees(i: usize) -> f32 {
    complication_angle(i).to_degrees()
}

/// Dial-fraction bounds of complication slot `i`, projected from its polar
/// angle against a fixed radial offset.
pub fn complication_slot_bounds(i: usize) -> SlotRect {
    let angle = complication_angle(i);
    let radial = 0.5 - COMPLICATION_RADIUS - COMPLICATION_OFFSET;
    let cx = radial * angle.cos() + 0.5;
    let cy = radial * angle.sin() + 0.5;
    SlotRect {
        left: cx - COMPLICATION_RADIUS,
        right: cx + COMPLICATION_RADIUS,
        top: cy - COMPLICATION_RADIUS,
        bottom: cy + COMPLICATION_RADIUS,
    }
}

/// Minute-ring rotation for the given millisecond of day, in [0, 360).
pub fn minute_rotation(milli_of_day: u32) -> f32 {
    (milli_of_day % MILLIS_PER_HOUR) as f32 * 360.0 / MILLIS_PER_HOUR as f32
}

/// Second-ring rotation for the given millisecond of day, in [0, 360).
pub fn second_rotation(milli_of_day: u32) -> f32 {
    (milli_of_day % MILLIS_PER_MINUTE) as f32 * 360.0 / MILLIS_PER_MINUTE as f32
}

pub fn wrap_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

/// Rotation by `degrees` about an arbitrary pivot, as a single affine matrix.
pub fn rotation_about(pivot: Point, degrees: f32) -> Transform {
    Transform::translation(-pivot.x, -pivot.y)
        .then_rotate(Angle::degrees(degrees))
        .then_translate(vector(pivot.x, pivot.y))
}

/// Points on a circular arc. Angles start at 3 o'clock and sweep clockwise
/// in screen space (y grows downward). Endpoints included.
pub fn arc_points(center: Point, radius: f32, start_deg: f32, sweep_deg: f32, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);
    let mut out = Vec::with_capacity(segments + 1);
    for step in 0..=segments {
        let t = step as f32 / segments as f32;
        let a = (start_deg + sweep_deg * t).to_radians();
        out.push(point(center.x + radius * a.cos(), center.y + radius * a.sin()));
    }
    out
}

/// A full circle as a closed polyline contour.
pub fn circle_contour(center: Point, radius: f32, segments: usize) -> Vec<Point> {
    let mut pts = arc_points(center, radius, 0.0, 360.0, segments.max(8));
    pts.pop(); // drop the duplicated seam point
    pts
}

/// A rounded rectangle as a closed polyline contour, corners sampled with
/// quarter arcs. The radius is clamped to half the shorter side.
pub fn rounded_rect_contour(left: f32, top: f32, right: f32, bottom: f32, radius: f32) -> Vec<Point> {
    let r = radius.max(0.0).min((right - left).abs() / 2.0).min((bottom - top).abs() / 2.0);
    const CORNER_SEGMENTS: usize = 4;
    let mut pts = Vec::with_capacity(4 * (CORNER_SEGMENTS + 2));
    pts.push(point(left + r, top));
    pts.push(point(right - r, top));
    pts.extend(arc_points(point(right - r, top + r), r, -90.0, 90.0, CORNER_SEGMENTS));
    pts.push(point(right, bottom - r));
    pts.extend(arc_points(point(right - r, bottom - r), r, 0.0, 90.0, CORNER_SEGMENTS));
    pts.push(point(left + r, bottom));
    pts.extend(arc_points(point(left + r, bottom - r), r, 90.0, 90.0, CORNER_SEGMENTS));
    pts.push(point(left, top + r));
    pts.extend(arc_points(point(left + r, top + r), r, 180.0, 90.0, CORNER_SEGMENTS));
    pts
}

/// Builds a closed single-contour path from polyline points.
pub fn contour_to_path(points: &[Point]) -> Path {
    let mut builder = Path::builder();
    if points.len() >= 3 {
        builder.begin(points[0]);
        for p in &points[1..] {
            builder.line_to(*p);
        }
        builder.end(true);
    }
    builder.build()
}

/// Appends every subpath of `path`, transformed, into `builder`.
pub fn append_transformed(builder: &mut lyon::path::path::Builder, path: &Path, transform: &Transform) {
    for event in path.iter() {
        match event {
            Event::Begin { at } => {
                builder.begin(transform.transform_point(at));
            }
            Event::Line { to, .. } => {
                builder.line_to(transform.transform_point(to));
            }
            Event::Quadratic { ctrl, to, .. } => {
                builder.quadratic_bezier_to(transform.transform_point(ctrl), transform.transform_point(to));
            }
            Event::Cubic { ctrl1, ctrl2, to, .. } => {
                builder.cubic_bezier_to(
                    transform.transform_point(ctrl1),
                    transform.transform_point(ctrl2),
                    transform.transform_point(to),
                );
            }
            Event::End { close, .. } => builder.end(close),
        }
    }
}

/// Control-point bounding box of a path. Curves contribute their control
/// points, which can only over-estimate the true extent.
pub fn path_bounds(path: &Path) -> Box2D {
    let mut min = point(f32::MAX, f32::MAX);
    let mut max = point(f32::MIN, f32::MIN);
    let mut any = false;
    let mut grow = |p: Point| {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        any = true;
    };
    for event in path.iter() {
        match event {
            Event::Begin { at } => grow(at),
            Event::Line { to, .. } => grow(to),
            Event::Quadratic { ctrl, to, .. } => {
                grow(ctrl);
                grow(to);
            }
            Event::Cubic { ctrl1, ctrl2, to, .. } => {
                grow(ctrl1);
                grow(ctrl2);
                grow(to);
            }
            Event::End { .. } => {}
        }
    }
    if any {
        Box2D::new(min, max)
    } else {
        Box2D::zero()
    }
}

pub fn bounds_center(bounds: &Box2D) -> Point {
    point((bounds.min.x + bounds.max.x) / 2.0, (bounds.min.y + bounds.max.y) / 2.0)
}

pub fn is_degenerate(bounds: &Box2D) -> bool {
    bounds.max.x - bounds.min.x <= 0.0 || bounds.max.y - bounds.min.y <= 0.0
}
