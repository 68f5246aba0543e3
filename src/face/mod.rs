//! The watch face engine: concentric rims, the hour/minute readout and its
//! capsule frame, and the complication cluster. Platform-free; everything
//! renders into a [`canvas::Canvas`] and the GPU side consumes the result.

pub mod boolean;
pub mod canvas;
pub mod complication_frame;
pub mod current_time;
pub mod geometry;
pub mod index_rim;
pub mod minute_frame;
pub mod number_rim;
pub mod text;

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveTime, Timelike};
use lyon::math::{point, Transform};
use tracing::debug;

use crate::complications::{ComplicationSlots, SlotRenderer, TextSlotRenderer};
use crate::face::canvas::{Canvas, Color};
use crate::face::complication_frame::ComplicationFrame;
use crate::face::current_time::CurrentTime;
use crate::face::geometry::{
    contour_to_path, minute_rotation, rounded_rect_contour, second_rotation, DialBounds,
    HOUR_TEXT_SIZE_FRACTION, MINUTES_INDEX_PADDING_FRACTION, MINUTES_TEXT_PADDING_FRACTION,
    MINUTES_TEXT_SIZE_FRACTION, MINUTE_TEXT_SIZE_FRACTION, SECONDS_INDEX_PADDING_FRACTION,
    SECONDS_TEXT_PADDING_FRACTION, SECONDS_TEXT_SIZE_FRACTION,
};
use crate::face::index_rim::IndexRim;
use crate::face::minute_frame::MinuteFrame;
use crate::face::number_rim::NumberRim;
use crate::face::text::{FontLibrary, TextPaint, TextShaper};
use crate::style::{font_option_or_default, Palette, StyleSnapshot};

pub const BORDER_STROKE_WIDTH: f32 = 2.0;

/// Rendering fidelity requested by the platform for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Interactive,
    /// Muted interactive rendering, treated as low-bit.
    Mute,
    Ambient,
}

impl DrawMode {
    /// Every mode but full interactive drops the rims and long strokes.
    pub fn is_low_bit(self) -> bool {
        self != DrawMode::Interactive
    }
}

/// Which face layers the platform wants this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    pub base: bool,
    pub complications: bool,
    pub complications_overlay: bool,
}

impl Layers {
    pub fn all() -> Self {
        Self {
            base: true,
            complications: true,
            complications_overlay: true,
        }
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderParams {
    pub draw_mode: DrawMode,
    pub layers: Layers,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::Interactive,
            layers: Layers::all(),
        }
    }
}

/// Clock inputs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    pub hour: u8,
    pub minute: u8,
    pub milli_of_day: u32,
}

impl FrameTime {
    pub fn from_time(time: NaiveTime, use_24h: bool) -> Self {
        let hour_of_day = time.hour();
        let hour = if use_24h {
            hour_of_day as u8
        } else {
            let clock_hour = hour_of_day % 12;
            if clock_hour == 0 { 12 } else { clock_hour as u8 }
        };
        let milli_of_day =
            time.num_seconds_from_midnight() * 1000 + time.nanosecond() / 1_000_000;
        Self {
            hour,
            minute: time.minute() as u8,
            milli_of_day,
        }
    }
}

/// Pixel lengths derived from the dial bounds, refreshed when they change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Dimensions {
    minutes_index_padding: f32,
    minutes_text_padding: f32,
    seconds_index_padding: f32,
    seconds_text_padding: f32,
    hour_px: f32,
    minute_px: f32,
    minutes_px: f32,
    seconds_px: f32,
}

impl Dimensions {
    fn for_bounds(bounds: &DialBounds) -> Self {
        let w = bounds.width();
        Self {
            minutes_index_padding: w * MINUTES_INDEX_PADDING_FRACTION,
            minutes_text_padding: w * MINUTES_TEXT_PADDING_FRACTION,
            seconds_index_padding: w * SECONDS_INDEX_PADDING_FRACTION,
            seconds_text_padding: w * SECONDS_TEXT_PADDING_FRACTION,
            hour_px: w * HOUR_TEXT_SIZE_FRACTION,
            minute_px: w * MINUTE_TEXT_SIZE_FRACTION,
            minutes_px: w * MINUTES_TEXT_SIZE_FRACTION,
            seconds_px: w * SECONDS_TEXT_SIZE_FRACTION,
        }
    }
}

/// Owns every sub-component and decides per frame what to redraw.
pub struct FaceRenderer {
    style: StyleSnapshot,
    palette: Palette,
    shaper: Box<dyn TextShaper>,
    bounds: DialBounds,
    dims: Dimensions,
    minute_index_rim: IndexRim,
    minute_number_rim: NumberRim,
    second_index_rim: IndexRim,
    second_number_rim: NumberRim,
    current_time: CurrentTime,
    minute_frame: MinuteFrame,
    complication_frame: ComplicationFrame,
    slot_renderer: Box<dyn SlotRenderer>,
    layout_stale: bool,
}

impl FaceRenderer {
    pub fn new(style: StyleSnapshot, fonts: &FontLibrary) -> Result<Self> {
        let shaper = Box::new(fonts.resolve(font_option_or_default(&style.font_id).families)?);
        Ok(Self::with_shaper(style, shaper))
    }

    /// Builds the renderer around an explicit shaper. Layout is deferred to
    /// the first `render` call, which knows the bounds.
    pub fn with_shaper(style: StyleSnapshot, shaper: Box<dyn TextShaper>) -> Self {
        let palette = Palette::resolve(&style);
        Self {
            style,
            palette,
            shaper,
            bounds: DialBounds::default(),
            dims: Dimensions::default(),
            minute_index_rim: IndexRim::standard(),
            minute_number_rim: NumberRim::minutes(),
            second_index_rim: IndexRim::standard(),
            second_number_rim: NumberRim::seconds(),
            current_time: CurrentTime::new(point(0.0, 0.0)),
            minute_frame: MinuteFrame::new(point(0.0, 0.0)),
            complication_frame: ComplicationFrame::new(),
            slot_renderer: Box::new(TextSlotRenderer),
            layout_stale: true,
        }
    }

    pub fn style(&self) -> &StyleSnapshot {
        &self.style
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Applies a new style snapshot. Equal snapshots are ignored; a change
    /// swaps the palette and font and forces a layout pass.
    pub fn set_style(&mut self, style: StyleSnapshot, fonts: &FontLibrary) -> Result<()> {
        if style == self.style {
            return Ok(());
        }
        debug!(color = %style.color_id, font = %style.font_id, "style changed");
        self.shaper = Box::new(fonts.resolve(font_option_or_default(&style.font_id).families)?);
        self.palette = Palette::resolve(&style);
        self.style = style;
        self.layout_stale = true;
        Ok(())
    }

    pub fn render(
        &mut self,
        canvas: &mut dyn Canvas,
        bounds: DialBounds,
        time: FrameTime,
        params: RenderParams,
        slots: &ComplicationSlots,
    ) {
        if self.layout_stale || self.bounds != bounds {
            self.recalculate(bounds);
        }
        let low_bit = params.draw_mode.is_low_bit();
        let ambient = params.draw_mode == DrawMode::Ambient;

        canvas.clear(self.palette.background);

        let (hour_color, minute_color, seconds_color, borders_color, comp_text_color) = if low_bit {
            (
                self.palette.ambient_hour,
                self.palette.ambient_minute,
                self.palette.ambient_seconds,
                self.palette.ambient_borders,
                self.palette.ambient_complication_text,
            )
        } else {
            (
                self.palette.active_hour,
                self.palette.active_minute,
                self.palette.active_seconds,
                self.palette.active_borders,
                self.palette.active_complication_text,
            )
        };

        if params.layers.base {
            if !low_bit {
                self.draw_rims(canvas, &bounds, time, ambient, seconds_color);
            }
            let minute_metrics = self.shaper.metrics(self.dims.minute_px);
            self.minute_frame.draw(
                canvas,
                &bounds,
                minute_metrics,
                low_bit,
                borders_color,
                self.palette.background,
                BORDER_STROKE_WIDTH,
            );
            let hour_paint = TextPaint {
                shaper: self.shaper.as_ref(),
                px: self.dims.hour_px,
                color: hour_color,
            };
            let minute_paint = TextPaint {
                shaper: self.shaper.as_ref(),
                px: self.dims.minute_px,
                color: minute_color,
            };
            self.current_time.draw(
                canvas,
                &bounds,
                time.hour,
                time.minute,
                &hour_paint,
                &minute_paint,
            );
        }

        if params.layers.complications && !low_bit {
            self.complication_frame.draw(
                canvas,
                &bounds,
                slots.active_range(),
                self.palette.background,
                borders_color,
                BORDER_STROKE_WIDTH,
            );
        }

        // Slot content manages its own draw-mode behavior, so it is
        // delegated regardless of the layer flags.
        let comp_paint = TextPaint {
            shaper: self.shaper.as_ref(),
            px: self.dims.seconds_px,
            color: comp_text_color,
        };
        for slot in slots.iter() {
            self.slot_renderer.render(canvas, &bounds, slot, &comp_paint);
        }
    }

    /// Tap-highlight overlay: a full-face tint plus an outline per enabled
    /// slot.
    pub fn render_highlight_layer(
        &mut self,
        canvas: &mut dyn Canvas,
        bounds: DialBounds,
        slots: &ComplicationSlots,
        tint: Color,
    ) {
        let face = contour_to_path(&rounded_rect_contour(
            bounds.left,
            bounds.top,
            bounds.right,
            bounds.bottom,
            0.0,
        ));
        canvas.fill_path(Arc::new(face), Transform::identity(), tint);
        for slot in slots.iter() {
            self.slot_renderer
                .render_highlight(canvas, &bounds, slot, self.palette.active_borders);
        }
    }

    fn draw_rims(
        &mut self,
        canvas: &mut dyn Canvas,
        bounds: &DialBounds,
        time: FrameTime,
        ambient: bool,
        seconds_color: Color,
    ) {
        let minute_deg = minute_rotation(time.milli_of_day);
        self.minute_index_rim.draw(
            canvas,
            bounds,
            self.dims.minutes_index_padding,
            minute_deg,
            self.palette.index,
        );
        let minutes_paint = TextPaint {
            shaper: self.shaper.as_ref(),
            px: self.dims.minutes_px,
            color: self.palette.minutes,
        };
        self.minute_number_rim.draw(
            canvas,
            bounds,
            self.dims.minutes_text_padding,
            minute_deg,
            &minutes_paint,
        );

        if !ambient {
            let second_deg = second_rotation(time.milli_of_day);
            self.second_index_rim.draw(
                canvas,
                bounds,
                self.dims.seconds_index_padding,
                second_deg,
                self.palette.index,
            );
            let seconds_paint = TextPaint {
                shaper: self.shaper.as_ref(),
                px: self.dims.seconds_px,
                color: seconds_color,
            };
            self.second_number_rim.draw(
                canvas,
                bounds,
                self.dims.seconds_text_padding,
                second_deg,
                &seconds_paint,
            );
        }
    }

    fn recalculate(&mut self, bounds: DialBounds) {
        self.bounds = bounds;
        self.dims = Dimensions::for_bounds(&bounds);

        // The minute readout anchor derives from a "00" reference shaped at
        // the minute size, so it tracks the active font.
        let reference = self.shaper.text_path("00", self.dims.minute_px);
        let minute_center = if reference.is_degenerate() {
            bounds.center()
        } else {
            let ref_width = reference.bounds.max.x - reference.bounds.min.x;
            point(
                bounds.right - self.dims.minutes_text_padding - ref_width / 2.0,
                bounds.center_y(),
            )
        };
        self.current_time.set_minute_center(minute_center);
        self.minute_frame.set_minute_center(minute_center);
        self.layout_stale = false;
        debug!(?bounds, ?minute_center, "layout recalculated");
    }

    pub fn minute_frame_revision(&self) -> u64 {
        self.minute_frame.revision()
    }

    pub fn complication_frame_revision(&self) -> u64 {
        self.complication_frame.revision()
    }
}
