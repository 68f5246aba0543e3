//! User style catalog and the derived render palette. Option ids are stable
//! strings carried by style-change events and configuration files.

use crate::face::canvas::Color;

/// Accent color option. Ids are `#AARRGGBB` strings, names are the catalog
/// labels shown in pickers.
#[derive(Debug, Clone, Copy)]
pub struct ColorOption {
    pub id: &'static str,
    pub name: &'static str,
}

pub const COLOR_OPTIONS: &[ColorOption] = &[
    ColorOption { id: "#D3FFFFFF", name: "default" },
    ColorOption { id: "#ECF0F1", name: "clouds" },
    ColorOption { id: "#BDC3C7", name: "silver" },
    ColorOption { id: "#95A5A6", name: "concrete" },
    ColorOption { id: "#7F8C8D", name: "asbestos" },
    ColorOption { id: "#7FFFD4", name: "aquamarine" },
    ColorOption { id: "#1ABC9C", name: "turquoise" },
    ColorOption { id: "#16A085", name: "green sea" },
    ColorOption { id: "#98FB98", name: "pale green" },
    ColorOption { id: "#00FF7F", name: "spring green" },
    ColorOption { id: "#2ECC71", name: "emerald" },
    ColorOption { id: "#27AE60", name: "nephritis" },
    ColorOption { id: "#87CEEB", name: "sky" },
    ColorOption { id: "#3498DB", name: "peter river" },
    ColorOption { id: "#2980B9", name: "belize hole" },
    ColorOption { id: "#4682B4", name: "steel blue" },
    ColorOption { id: "#1E90FF", name: "dodger blue" },
    ColorOption { id: "#D8BFD8", name: "thistle" },
    ColorOption { id: "#DDA0DD", name: "plum" },
    ColorOption { id: "#EE82EE", name: "violet" },
    ColorOption { id: "#DA70D6", name: "orchid" },
    ColorOption { id: "#9B59B6", name: "amethyst" },
    ColorOption { id: "#8E44AD", name: "wisteria" },
    ColorOption { id: "#FFE4B5", name: "moccasin" },
    ColorOption { id: "#F1C40F", name: "sunflower" },
    ColorOption { id: "#F39C12", name: "orange" },
    ColorOption { id: "#E67E22", name: "carrot" },
    ColorOption { id: "#D35400", name: "pumpkin" },
    ColorOption { id: "#C0392B", name: "pomegranate" },
    ColorOption { id: "#FA8072", name: "salmon" },
    ColorOption { id: "#FF7F50", name: "coral" },
    ColorOption { id: "#E74C3C", name: "alizarin" },
    ColorOption { id: "#D2B48C", name: "tan" },
    ColorOption { id: "#CD853F", name: "peru" },
    ColorOption { id: "#A0522D", name: "sienna" },
];

/// Font option. Candidates are family names tried in order against the
/// system font database.
#[derive(Debug, Clone, Copy)]
pub struct FontOption {
    pub id: &'static str,
    pub name: &'static str,
    pub families: &'static [&'static str],
}

pub const FONT_OPTIONS: &[FontOption] = &[
    FontOption { id: "1", name: "Rubik", families: &["Rubik"] },
    FontOption { id: "2", name: "Manrope", families: &["Manrope"] },
    FontOption { id: "3", name: "EB Garamond", families: &["EB Garamond", "EB Garamond Medium"] },
    FontOption { id: "4", name: "Chakra Petch", families: &["Chakra Petch"] },
];

pub fn color_option(id: &str) -> Option<&'static ColorOption> {
    COLOR_OPTIONS.iter().find(|option| option.id == id)
}

pub fn color_option_or_default(id: &str) -> &'static ColorOption {
    color_option(id).unwrap_or(&COLOR_OPTIONS[0])
}

pub fn font_option(id: &str) -> Option<&'static FontOption> {
    FONT_OPTIONS.iter().find(|option| option.id == id)
}

pub fn font_option_or_default(id: &str) -> &'static FontOption {
    font_option(id).unwrap_or(&FONT_OPTIONS[0])
}

/// The user's current selection. Compared by value; an unchanged snapshot
/// never invalidates caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSnapshot {
    pub color_id: String,
    pub font_id: String,
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            color_id: COLOR_OPTIONS[0].id.to_string(),
            font_id: FONT_OPTIONS[0].id.to_string(),
        }
    }
}

const WHITE_90: &str = "#FFFFFFE6";
const WHITE_70: &str = "#FFFFFFB3";
const MINUTES_GREY: &str = "#FFFFFFB3";
const BACKGROUND: &str = "#000000";
const AMBIENT_ACCENT_ALPHA: f32 = 0.7;

/// All per-frame colors, already linearized for the GPU. Ambient variants
/// dim the readout and knock the accent alpha down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub index: Color,
    pub minutes: Color,
    pub active_hour: Color,
    pub active_minute: Color,
    pub active_seconds: Color,
    pub active_borders: Color,
    pub active_complication_text: Color,
    pub active_complication_icon: Color,
    pub ambient_hour: Color,
    pub ambient_minute: Color,
    pub ambient_seconds: Color,
    pub ambient_borders: Color,
    pub ambient_complication_text: Color,
    pub ambient_complication_icon: Color,
}

impl Palette {
    pub fn resolve(snapshot: &StyleSnapshot) -> Self {
        let accent = parse_argb_hex(color_option_or_default(&snapshot.color_id).id)
            .unwrap_or([1.0, 1.0, 1.0, 1.0]);
        let ambient_accent = scale_alpha(accent, AMBIENT_ACCENT_ALPHA);
        let white_90 = parse_rgba_hex(WHITE_90).unwrap_or([1.0, 1.0, 1.0, 0.9]);
        let white_70 = parse_rgba_hex(WHITE_70).unwrap_or([1.0, 1.0, 1.0, 0.7]);
        let minutes = parse_rgba_hex(MINUTES_GREY).unwrap_or([1.0, 1.0, 1.0, 0.7]);
        let background = parse_rgba_hex(BACKGROUND).unwrap_or([0.0, 0.0, 0.0, 1.0]);
        Self {
            background,
            index: minutes,
            minutes,
            active_hour: white_90,
            active_minute: white_90,
            active_seconds: accent,
            active_borders: accent,
            active_complication_text: white_90,
            active_complication_icon: accent,
            ambient_hour: white_70,
            ambient_minute: white_70,
            ambient_seconds: ambient_accent,
            ambient_borders: ambient_accent,
            ambient_complication_text: white_70,
            ambient_complication_icon: ambient_accent,
        }
    }
}

fn scale_alpha(color: Color, factor: f32) -> Color {
    [color[0], color[1], color[2], color[3] * factor]
}

/// Parses a catalog `#AARRGGBB` (or `#RRGGBB`) id into linear RGBA.
pub fn parse_argb_hex(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    match hex.len() {
        6 => parse_rgba_hex(value),
        8 => {
            let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(srgb_to_linear_rgba([
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                a as f32 / 255.0,
            ]))
        }
        _ => None,
    }
}

/// Parses `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` into linear RGBA.
pub fn parse_rgba_hex(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    let srgb = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
        }
        4 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            let a = u8::from_str_radix(&hex[3..4].repeat(2), 16).ok()?;
            [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                a as f32 / 255.0,
            ]
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
        }
        8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
            [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                a as f32 / 255.0,
            ]
        }
        _ => return None,
    };
    Some(srgb_to_linear_rgba(srgb))
}

fn srgb_to_linear_rgba(color: Color) -> Color {
    [
        srgb_to_linear(color[0]),
        srgb_to_linear(color[1]),
        srgb_to_linear(color[2]),
        color[3],
    ]
}

fn srgb_to_linear(component: f32) -> f32 {
    if component <= 0.04045 {
        component / 12.92
    } else {
        ((component + 0.055) / 1.055).powf(2.4)
    }
}
