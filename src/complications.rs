//! Complication slot model and the delegated slot renderer. Slots are fixed
//! in number and position; only their content and enablement vary.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::Deserialize;

use crate::face::canvas::{Canvas, Color};
use crate::face::geometry::{
    bounds_center, complication_slot_bounds, rounded_rect_contour, DialBounds, SlotRect,
};
use crate::face::text::TextPaint;
use lyon::math::Transform;
use std::sync::Arc;

pub const SLOT_COUNT: usize = 5;
pub const FIRST_SLOT_ID: u32 = 100;

/// Content of a single slot. An empty slot is an expected state, not an
/// error; it simply draws nothing and drops out of the cluster frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ComplicationData {
    #[default]
    Empty,
    ShortText(String),
}

impl ComplicationData {
    pub fn is_empty(&self) -> bool {
        matches!(self, ComplicationData::Empty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplicationSlot {
    pub id: u32,
    pub enabled: bool,
    pub data: ComplicationData,
    pub fraction_bounds: SlotRect,
}

/// The five-slot cluster along the left dial edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplicationSlots {
    slots: Vec<ComplicationSlot>,
}

impl ComplicationSlots {
    pub fn new() -> Self {
        let slots = (0..SLOT_COUNT)
            .map(|i| ComplicationSlot {
                id: FIRST_SLOT_ID + i as u32,
                enabled: false,
                data: ComplicationData::Empty,
                fraction_bounds: complication_slot_bounds(i),
            })
            .collect();
        Self { slots }
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.enabled = enabled;
        }
    }

    pub fn set_data(&mut self, index: usize, data: ComplicationData) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.data = data;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComplicationSlot> {
        self.slots.iter()
    }

    /// Lowest and highest slot index that is enabled and carries data. The
    /// cluster frame spans exactly this range.
    pub fn active_range(&self) -> Option<(usize, usize)> {
        let mut range: Option<(usize, usize)> = None;
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.enabled && !slot.data.is_empty() {
                range = Some(match range {
                    Some((min, _)) => (min, i),
                    None => (i, i),
                });
            }
        }
        range
    }
}

impl Default for ComplicationSlots {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-slot content renderer, delegated to regardless of which face layers
/// are requested. Implementations obey the draw mode themselves.
pub trait SlotRenderer {
    fn render(
        &self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        slot: &ComplicationSlot,
        paint: &TextPaint,
    );

    fn render_highlight(
        &self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        slot: &ComplicationSlot,
        color: Color,
    );
}

const HIGHLIGHT_STROKE_WIDTH: f32 = 2.0;

/// Draws short-text content centered in the slot.
pub struct TextSlotRenderer;

impl SlotRenderer for TextSlotRenderer {
    fn render(
        &self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        slot: &ComplicationSlot,
        paint: &TextPaint,
    ) {
        if !slot.enabled {
            return;
        }
        let ComplicationData::ShortText(text) = &slot.data else {
            return;
        };
        let shaped = paint.shaper.text_path(text, paint.px);
        if shaped.is_degenerate() {
            return;
        }
        let (top_left, bottom_right) = slot.fraction_bounds.to_px(bounds);
        let target = lyon::math::point(
            (top_left.x + bottom_right.x) / 2.0,
            (top_left.y + bottom_right.y) / 2.0,
        );
        let center = bounds_center(&shaped.bounds);
        let offset = target - center;
        canvas.fill_path(
            Arc::clone(&shaped.path),
            Transform::translation(offset.x, offset.y),
            paint.color,
        );
    }

    fn render_highlight(
        &self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        slot: &ComplicationSlot,
        color: Color,
    ) {
        if !slot.enabled {
            return;
        }
        let (top_left, bottom_right) = slot.fraction_bounds.to_px(bounds);
        let radius = (bottom_right.x - top_left.x) / 2.0;
        let outline = crate::face::geometry::contour_to_path(&rounded_rect_contour(
            top_left.x,
            top_left.y,
            bottom_right.x,
            bottom_right.y,
            radius,
        ));
        canvas.stroke_path(
            Arc::new(outline),
            Transform::identity(),
            color,
            HIGHLIGHT_STROKE_WIDTH,
        );
    }
}

/// What a slot shows. Sources are sampled once per frame from wall time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    DayOfMonth,
    Weekday,
    StaticText { text: String },
}

pub fn sample(kind: &SourceKind, now: NaiveDateTime) -> ComplicationData {
    match kind {
        SourceKind::DayOfMonth => ComplicationData::ShortText(format!("{}", now.day())),
        SourceKind::Weekday => ComplicationData::ShortText(weekday_label(now.weekday()).to_string()),
        SourceKind::StaticText { text } => {
            if text.is_empty() {
                ComplicationData::Empty
            } else {
                ComplicationData::ShortText(text.clone())
            }
        }
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}
