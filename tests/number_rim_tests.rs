mod common;

use common::BlockShaper;
use concentric_face::face::canvas::DisplayList;
use concentric_face::face::geometry::DialBounds;
use concentric_face::face::number_rim::{placement_transform, NumberRim};
use concentric_face::face::text::TextPaint;
use lyon::math::point;

const TEXT_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 1.0];

fn paint(shaper: &BlockShaper, px: f32) -> TextPaint<'_> {
    TextPaint {
        shaper,
        px,
        color: TEXT_COLOR,
    }
}

#[test]
fn placement_keeps_numerals_upright() {
    let anchor = point(350.0, 200.0);
    let center = point(200.0, 200.0);
    for theta in [0.0, 30.0, 123.0, 359.0] {
        let transform = placement_transform(theta, anchor, center);
        // The linear part must be the identity: the glyph spins about its
        // own center exactly opposite to the ring rotation.
        assert!((transform.m11 - 1.0).abs() < 1e-4, "theta {theta}");
        assert!(transform.m12.abs() < 1e-4, "theta {theta}");
        assert!(transform.m21.abs() < 1e-4, "theta {theta}");
        assert!((transform.m22 - 1.0).abs() < 1e-4, "theta {theta}");
    }
}

#[test]
fn zero_rotation_places_the_top_label_at_the_anchor() {
    let anchor = point(350.0, 200.0);
    let center = point(200.0, 200.0);
    let transform = placement_transform(360.0, anchor, center);
    let mapped = transform.transform_point(point(0.0, 0.0));
    assert!((mapped.x - anchor.x).abs() < 1e-3);
    assert!((mapped.y - anchor.y).abs() < 1e-3);
}

#[test]
fn draws_all_twelve_numerals() {
    let shaper = BlockShaper::new();
    let mut rim = NumberRim::minutes();
    let bounds = DialBounds::square(400.0);
    let mut list = DisplayList::new();
    rim.draw(&mut list, &bounds, 74.0, 45.0, &paint(&shaper, 25.2));
    assert_eq!(list.fill_count(), 12);
}

#[test]
fn equal_metrics_do_not_invalidate() {
    let first = BlockShaper::new();
    let second = BlockShaper::new();
    let mut rim = NumberRim::minutes();
    let bounds = DialBounds::square(400.0);

    let mut list = DisplayList::new();
    rim.draw(&mut list, &bounds, 74.0, 0.0, &paint(&first, 25.2));
    let revision = rim.revision();

    // A different shaper object with identical measurements hits the cache.
    let mut list = DisplayList::new();
    rim.draw(&mut list, &bounds, 74.0, 180.0, &paint(&second, 25.2));
    assert_eq!(rim.revision(), revision);
}

#[test]
fn size_change_rebuilds() {
    let shaper = BlockShaper::new();
    let mut rim = NumberRim::minutes();
    let bounds = DialBounds::square(400.0);

    let mut list = DisplayList::new();
    rim.draw(&mut list, &bounds, 74.0, 0.0, &paint(&shaper, 25.2));
    let before = rim.revision();

    let mut list = DisplayList::new();
    rim.draw(&mut list, &bounds, 74.0, 0.0, &paint(&shaper, 28.35));
    assert_eq!(rim.revision(), before + 1);
}

#[test]
fn anchor_sits_inside_the_right_edge() {
    let shaper = BlockShaper::new();
    let mut rim = NumberRim::minutes();
    let bounds = DialBounds::square(400.0);
    let padding = 74.0;

    let mut list = DisplayList::new();
    rim.draw(&mut list, &bounds, padding, 0.0, &paint(&shaper, 25.2));
    let anchor = rim.cached_anchor().unwrap();
    assert!(anchor.x < bounds.right - padding);
    assert!((anchor.y - bounds.center_y()).abs() < 1e-3);
}
