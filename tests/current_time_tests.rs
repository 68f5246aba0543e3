mod common;

use chrono::NaiveTime;
use common::{BlockShaper, EmptyShaper, BLOCK_ADVANCE_FACTOR, BLOCK_HEIGHT_FACTOR};
use concentric_face::face::canvas::DisplayList;
use concentric_face::face::current_time::CurrentTime;
use concentric_face::face::geometry::DialBounds;
use concentric_face::face::text::TextPaint;
use concentric_face::face::FrameTime;
use lyon::math::point;

const HOUR_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
const MINUTE_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

#[test]
fn hour_is_centered_on_the_dial() {
    let shaper = BlockShaper::new();
    let bounds = DialBounds::square(400.0);
    let minute_center = point(320.0, 200.0);
    let mut readout = CurrentTime::new(minute_center);

    let hour_paint = TextPaint {
        shaper: &shaper,
        px: 94.0,
        color: HOUR_COLOR,
    };
    let minute_paint = TextPaint {
        shaper: &shaper,
        px: 40.0,
        color: MINUTE_COLOR,
    };
    let mut list = DisplayList::new();
    readout.draw(&mut list, &bounds, 14, 7, &hour_paint, &minute_paint);
    assert_eq!(list.fill_count(), 2);

    // Two block digits at 94 px: 112.8 wide, 65.8 tall, baseline at y 0.
    let offset = readout.cached_hour_offset().unwrap();
    let width = 2.0 * 94.0 * BLOCK_ADVANCE_FACTOR;
    let height = 94.0 * BLOCK_HEIGHT_FACTOR;
    assert!((offset.x - (200.0 - width / 2.0)).abs() < 1e-3);
    assert!((offset.y - (200.0 + height / 2.0)).abs() < 1e-3);
}

#[test]
fn minute_tracks_its_anchor() {
    let shaper = BlockShaper::new();
    let bounds = DialBounds::square(400.0);
    let minute_center = point(320.0, 200.0);
    let mut readout = CurrentTime::new(minute_center);

    let hour_paint = TextPaint {
        shaper: &shaper,
        px: 94.0,
        color: HOUR_COLOR,
    };
    let minute_paint = TextPaint {
        shaper: &shaper,
        px: 40.0,
        color: MINUTE_COLOR,
    };
    let mut list = DisplayList::new();
    readout.draw(&mut list, &bounds, 9, 30, &hour_paint, &minute_paint);

    let offset = readout.cached_minute_offset().unwrap();
    let width = 2.0 * 40.0 * BLOCK_ADVANCE_FACTOR;
    assert!((offset.x - (minute_center.x - width / 2.0)).abs() < 1e-3);

    // The x anchor is independent of the displayed minute.
    let mut list = DisplayList::new();
    readout.draw(&mut list, &bounds, 9, 31, &hour_paint, &minute_paint);
    let next = readout.cached_minute_offset().unwrap();
    assert!((next.x - offset.x).abs() < 1e-3);
}

#[test]
fn unchanged_time_hits_the_cache() {
    let shaper = BlockShaper::new();
    let bounds = DialBounds::square(400.0);
    let mut readout = CurrentTime::new(point(320.0, 200.0));
    let hour_paint = TextPaint {
        shaper: &shaper,
        px: 94.0,
        color: HOUR_COLOR,
    };
    let minute_paint = TextPaint {
        shaper: &shaper,
        px: 40.0,
        color: MINUTE_COLOR,
    };

    let mut list = DisplayList::new();
    readout.draw(&mut list, &bounds, 14, 7, &hour_paint, &minute_paint);
    let revision = readout.revision();
    let mut list = DisplayList::new();
    readout.draw(&mut list, &bounds, 14, 7, &hour_paint, &minute_paint);
    assert_eq!(readout.revision(), revision);

    let mut list = DisplayList::new();
    readout.draw(&mut list, &bounds, 14, 8, &hour_paint, &minute_paint);
    assert_eq!(readout.revision(), revision + 1);
}

#[test]
fn degenerate_glyphs_draw_nothing() {
    let shaper = EmptyShaper;
    let bounds = DialBounds::square(400.0);
    let mut readout = CurrentTime::new(point(320.0, 200.0));
    let hour_paint = TextPaint {
        shaper: &shaper,
        px: 94.0,
        color: HOUR_COLOR,
    };
    let minute_paint = TextPaint {
        shaper: &shaper,
        px: 40.0,
        color: MINUTE_COLOR,
    };

    let mut list = DisplayList::new();
    readout.draw(&mut list, &bounds, 14, 7, &hour_paint, &minute_paint);
    assert!(list.is_empty());
}

#[test]
fn frame_time_resolves_clock_hours() {
    let afternoon = NaiveTime::from_hms_milli_opt(14, 7, 30, 500).unwrap();
    let t24 = FrameTime::from_time(afternoon, true);
    assert_eq!(t24.hour, 14);
    assert_eq!(t24.minute, 7);
    assert_eq!(t24.milli_of_day, 50_850_500);

    let t12 = FrameTime::from_time(afternoon, false);
    assert_eq!(t12.hour, 2);

    let midnight = NaiveTime::from_hms_opt(0, 5, 0).unwrap();
    assert_eq!(FrameTime::from_time(midnight, false).hour, 12);
    assert_eq!(FrameTime::from_time(midnight, true).hour, 0);
}
