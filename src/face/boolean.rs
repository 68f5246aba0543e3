//! Boolean composition of closed contours. Joins and carves the capsule and
//! cluster shapes that the platform path API did upstream; contours go in as
//! flattened polylines and come back out as a single lyon path.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use lyon::math::{point, Point};
use lyon::path::iterator::PathIterator;
use lyon::path::Path;

pub type Contour = Vec<[f32; 2]>;

pub fn to_contour(points: &[Point]) -> Contour {
    points.iter().map(|p| [p.x, p.y]).collect()
}

/// Union of two contour sets.
pub fn union(subject: Vec<Contour>, clip: Vec<Contour>) -> Path {
    overlay(subject, clip, OverlayRule::Union)
}

/// Intersection of two contour sets.
pub fn intersection(subject: Vec<Contour>, clip: Vec<Contour>) -> Path {
    overlay(subject, clip, OverlayRule::Intersect)
}

fn overlay(subject: Vec<Contour>, clip: Vec<Contour>, rule: OverlayRule) -> Path {
    let subject: Vec<Contour> = subject.into_iter().map(normalize_winding).collect();
    let clip: Vec<Contour> = clip.into_iter().map(normalize_winding).collect();
    let shapes = subject.overlay(&clip, rule, FillRule::NonZero);
    let mut builder = Path::builder();
    for shape in &shapes {
        for contour in shape {
            if contour.len() < 3 {
                continue;
            }
            builder.begin(point(contour[0][0], contour[0][1]));
            for p in &contour[1..] {
                builder.line_to(point(p[0], p[1]));
            }
            builder.end(true);
        }
    }
    builder.build()
}

/// Flattens a path into closed polyline contours, suitable as overlay input.
pub fn flatten(path: &Path, tolerance: f32) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut current: Contour = Vec::new();
    for event in path.iter().flattened(tolerance) {
        match event {
            lyon::path::Event::Begin { at } => {
                current = vec![[at.x, at.y]];
            }
            lyon::path::Event::Line { to, .. } => current.push([to.x, to.y]),
            lyon::path::Event::End { .. } => {
                if current.len() >= 3 {
                    contours.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
            _ => {}
        }
    }
    contours
}

// Non-zero filling requires all input contours to wind the same way; flips
// clockwise contours (negative shoelace area in y-down space).
fn normalize_winding(mut contour: Contour) -> Contour {
    if signed_area(&contour) < 0.0 {
        contour.reverse();
    }
    contour
}

fn signed_area(contour: &[[f32; 2]]) -> f32 {
    let mut doubled = 0.0;
    for (i, a) in contour.iter().enumerate() {
        let b = contour[(i + 1) % contour.len()];
        doubled += a[0] * b[1] - b[0] * a[1];
    }
    doubled / 2.0
}
