mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{BlockShaper, EmptyShaper};
use concentric_face::complications::{
    sample, ComplicationData, ComplicationSlots, SlotRenderer, SourceKind, TextSlotRenderer,
};
use concentric_face::face::canvas::DisplayList;
use concentric_face::face::geometry::DialBounds;
use concentric_face::face::text::TextPaint;

const TEXT_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 1.0];

fn noon(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn sources_sample_from_wall_time() {
    let saturday = noon(2026, 8, 29);
    assert_eq!(
        sample(&SourceKind::DayOfMonth, saturday),
        ComplicationData::ShortText("29".to_string())
    );
    assert_eq!(
        sample(&SourceKind::Weekday, saturday),
        ComplicationData::ShortText("SAT".to_string())
    );
    assert_eq!(
        sample(
            &SourceKind::StaticText {
                text: "LDN".to_string()
            },
            saturday
        ),
        ComplicationData::ShortText("LDN".to_string())
    );
    assert_eq!(
        sample(
            &SourceKind::StaticText {
                text: String::new()
            },
            saturday
        ),
        ComplicationData::Empty
    );
}

#[test]
fn slot_ids_are_stable() {
    let slots = ComplicationSlots::new();
    let ids: Vec<u32> = slots.iter().map(|slot| slot.id).collect();
    assert_eq!(ids, vec![100, 101, 102, 103, 104]);
}

#[test]
fn renderer_skips_disabled_and_empty_slots() {
    let shaper = BlockShaper::new();
    let paint = TextPaint {
        shaper: &shaper,
        px: 25.0,
        color: TEXT_COLOR,
    };
    let renderer = TextSlotRenderer;
    let bounds = DialBounds::square(400.0);

    let mut slots = ComplicationSlots::new();
    slots.set_data(0, ComplicationData::ShortText("29".to_string()));
    slots.set_enabled(1, true);

    let mut list = DisplayList::new();
    for slot in slots.iter() {
        renderer.render(&mut list, &bounds, slot, &paint);
    }
    assert!(list.is_empty());
}

#[test]
fn renderer_centers_text_in_the_slot() {
    let shaper = BlockShaper::new();
    let paint = TextPaint {
        shaper: &shaper,
        px: 25.0,
        color: TEXT_COLOR,
    };
    let renderer = TextSlotRenderer;
    let bounds = DialBounds::square(400.0);

    let mut slots = ComplicationSlots::new();
    slots.set_enabled(2, true);
    slots.set_data(2, ComplicationData::ShortText("29".to_string()));

    let mut list = DisplayList::new();
    for slot in slots.iter() {
        renderer.render(&mut list, &bounds, slot, &paint);
    }
    assert_eq!(list.fill_count(), 1);
}

#[test]
fn degenerate_slot_text_draws_nothing() {
    let shaper = EmptyShaper;
    let paint = TextPaint {
        shaper: &shaper,
        px: 25.0,
        color: TEXT_COLOR,
    };
    let renderer = TextSlotRenderer;
    let bounds = DialBounds::square(400.0);

    let mut slots = ComplicationSlots::new();
    slots.set_enabled(2, true);
    slots.set_data(2, ComplicationData::ShortText("29".to_string()));

    let mut list = DisplayList::new();
    for slot in slots.iter() {
        renderer.render(&mut list, &bounds, slot, &paint);
    }
    assert!(list.is_empty());
}
