use concentric_face::complications::{ComplicationData, ComplicationSlots};
use concentric_face::face::canvas::DisplayList;
use concentric_face::face::complication_frame::ComplicationFrame;
use concentric_face::face::geometry::DialBounds;

const FILL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const BORDER: [f32; 4] = [0.2, 0.7, 0.6, 1.0];

fn slots_with(active: &[usize]) -> ComplicationSlots {
    let mut slots = ComplicationSlots::new();
    for &i in active {
        slots.set_enabled(i, true);
        slots.set_data(i, ComplicationData::ShortText("7".to_string()));
    }
    slots
}

#[test]
fn no_active_slots_draws_nothing() {
    let mut frame = ComplicationFrame::new();
    let bounds = DialBounds::square(400.0);
    let slots = ComplicationSlots::new();

    let mut list = DisplayList::new();
    frame.draw(&mut list, &bounds, slots.active_range(), FILL, BORDER, 2.0);
    assert!(list.is_empty());
    assert_eq!(frame.revision(), 0);
}

#[test]
fn disabled_slots_with_data_stay_inactive() {
    let mut slots = ComplicationSlots::new();
    slots.set_data(1, ComplicationData::ShortText("7".to_string()));
    assert_eq!(slots.active_range(), None);

    let mut enabled_empty = ComplicationSlots::new();
    enabled_empty.set_enabled(1, true);
    assert_eq!(enabled_empty.active_range(), None);
}

#[test]
fn active_range_spans_outermost_active_slots() {
    assert_eq!(slots_with(&[0, 2, 4]).active_range(), Some((0, 4)));
    assert_eq!(slots_with(&[2]).active_range(), Some((2, 2)));
    assert_eq!(slots_with(&[1, 3]).active_range(), Some((1, 3)));
}

#[test]
fn active_range_emits_fill_and_border() {
    let mut frame = ComplicationFrame::new();
    let bounds = DialBounds::square(400.0);
    let slots = slots_with(&[1, 3]);

    let mut list = DisplayList::new();
    frame.draw(&mut list, &bounds, slots.active_range(), FILL, BORDER, 2.0);
    assert_eq!(list.fill_count(), 1);
    assert_eq!(list.stroke_count(), 1);
    assert_eq!(frame.revision(), 1);
}

#[test]
fn unchanged_range_hits_the_cache() {
    let mut frame = ComplicationFrame::new();
    let bounds = DialBounds::square(400.0);
    let slots = slots_with(&[0, 4]);

    let mut list = DisplayList::new();
    frame.draw(&mut list, &bounds, slots.active_range(), FILL, BORDER, 2.0);
    let revision = frame.revision();

    let mut list = DisplayList::new();
    frame.draw(&mut list, &bounds, slots.active_range(), FILL, BORDER, 2.0);
    assert_eq!(frame.revision(), revision);
}

#[test]
fn range_change_rebuilds() {
    let mut frame = ComplicationFrame::new();
    let bounds = DialBounds::square(400.0);

    let mut list = DisplayList::new();
    frame.draw(
        &mut list,
        &bounds,
        slots_with(&[0, 4]).active_range(),
        FILL,
        BORDER,
        2.0,
    );
    let before = frame.revision();

    let mut list = DisplayList::new();
    frame.draw(
        &mut list,
        &bounds,
        slots_with(&[1, 4]).active_range(),
        FILL,
        BORDER,
        2.0,
    );
    assert_eq!(frame.revision(), before + 1);
}
