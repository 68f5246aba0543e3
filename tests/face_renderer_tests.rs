mod common;

use common::BlockShaper;
use concentric_face::complications::{ComplicationData, ComplicationSlots};
use concentric_face::face::canvas::DisplayList;
use concentric_face::face::geometry::DialBounds;
use concentric_face::face::{DrawMode, FaceRenderer, FrameTime, Layers, RenderParams};
use concentric_face::style::StyleSnapshot;

fn renderer() -> FaceRenderer {
    FaceRenderer::with_shaper(StyleSnapshot::default(), Box::new(BlockShaper::new()))
}

fn frame_time() -> FrameTime {
    FrameTime {
        hour: 14,
        minute: 7,
        milli_of_day: 50_850_500,
    }
}

fn params(mode: DrawMode) -> RenderParams {
    RenderParams {
        draw_mode: mode,
        layers: Layers::all(),
    }
}

fn active_slots() -> ComplicationSlots {
    let mut slots = ComplicationSlots::new();
    slots.set_enabled(1, true);
    slots.set_data(1, ComplicationData::ShortText("MON".to_string()));
    slots
}

#[test]
fn interactive_frame_draws_every_component() {
    let mut face = renderer();
    let bounds = DialBounds::square(400.0);
    let slots = active_slots();

    let mut list = DisplayList::new();
    face.render(&mut list, bounds, frame_time(), params(DrawMode::Interactive), &slots);

    assert_eq!(list.background(), Some(face.palette().background));
    // Both rims (ticks + 12 numerals each), frame fill/stroke, readout,
    // cluster frame and one slot's content.
    assert!(list.fill_count() > 26, "fills: {}", list.fill_count());
    assert_eq!(list.stroke_count(), 2);
}

#[test]
fn ambient_frame_drops_rims_and_cluster() {
    let mut face = renderer();
    let bounds = DialBounds::square(400.0);
    let slots = active_slots();

    let mut list = DisplayList::new();
    face.render(&mut list, bounds, frame_time(), params(DrawMode::Ambient), &slots);

    // Capsule backdrop, hour, minute, slot content. No rims, no cluster.
    assert_eq!(list.fill_count(), 4);
    assert_eq!(list.stroke_count(), 1);
}

#[test]
fn mute_mode_is_low_bit() {
    let mut face = renderer();
    let bounds = DialBounds::square(400.0);
    let slots = ComplicationSlots::new();

    let mut ambient = DisplayList::new();
    face.render(&mut ambient, bounds, frame_time(), params(DrawMode::Ambient), &slots);
    let mut face = renderer();
    let mut mute = DisplayList::new();
    face.render(&mut mute, bounds, frame_time(), params(DrawMode::Mute), &slots);

    assert_eq!(ambient.fill_count(), mute.fill_count());
    assert_eq!(ambient.stroke_count(), mute.stroke_count());
}

#[test]
fn base_layer_can_be_suppressed() {
    let mut face = renderer();
    let bounds = DialBounds::square(400.0);
    let slots = active_slots();
    let params = RenderParams {
        draw_mode: DrawMode::Interactive,
        layers: Layers {
            base: false,
            complications: true,
            complications_overlay: false,
        },
    };

    let mut list = DisplayList::new();
    face.render(&mut list, bounds, frame_time(), params, &slots);

    // Cluster frame plus the delegated slot content only.
    assert_eq!(list.fill_count(), 2);
    assert_eq!(list.stroke_count(), 1);
}

#[test]
fn slot_content_is_drawn_even_without_layers() {
    let mut face = renderer();
    let bounds = DialBounds::square(400.0);
    let slots = active_slots();
    let params = RenderParams {
        draw_mode: DrawMode::Interactive,
        layers: Layers {
            base: false,
            complications: false,
            complications_overlay: false,
        },
    };

    let mut list = DisplayList::new();
    face.render(&mut list, bounds, frame_time(), params, &slots);
    assert_eq!(list.fill_count(), 1);
    assert_eq!(list.stroke_count(), 0);
}

#[test]
fn bounds_change_triggers_relayout() {
    let mut face = renderer();
    let slots = ComplicationSlots::new();

    let mut list = DisplayList::new();
    face.render(
        &mut list,
        DialBounds::square(400.0),
        frame_time(),
        params(DrawMode::Interactive),
        &slots,
    );
    let before = face.minute_frame_revision();

    let mut list = DisplayList::new();
    face.render(
        &mut list,
        DialBounds::square(450.0),
        frame_time(),
        params(DrawMode::Interactive),
        &slots,
    );
    assert_eq!(face.minute_frame_revision(), before + 1);
}

#[test]
fn highlight_layer_tints_and_outlines() {
    let mut face = renderer();
    let bounds = DialBounds::square(400.0);
    let slots = active_slots();

    let mut list = DisplayList::new();
    face.render_highlight_layer(&mut list, bounds, &slots, [0.0, 0.0, 0.0, 0.5]);
    assert_eq!(list.fill_count(), 1);
    assert_eq!(list.stroke_count(), 1);
}
