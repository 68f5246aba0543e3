use std::io::Write;
use std::time::Duration;

use concentric_face::complications::SourceKind;
use concentric_face::config::Configuration;
use concentric_face::style::{color_option, font_option, parse_argb_hex, Palette, StyleSnapshot};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn parses_a_full_config() {
    let file = write_config(
        r##"
window:
  width: 480
  height: 480
  fullscreen: false
accent-color: "#1ABC9C"
font: "2"
use-24h: false
frame-period: 16ms
complications:
  - slot: 0
    source: weekday
  - slot: 4
    source: !static-text
      text: "LDN"
"##,
    );
    let cfg = Configuration::from_yaml_file(file.path()).expect("parse");
    assert_eq!(cfg.window.width, 480);
    assert_eq!(cfg.accent_color, "#1ABC9C");
    assert_eq!(cfg.font, "2");
    assert!(!cfg.use_24h);
    assert_eq!(cfg.frame_period, Duration::from_millis(16));
    assert_eq!(cfg.complications.len(), 2);
    assert_eq!(cfg.complications[0].source, SourceKind::Weekday);
    assert_eq!(
        cfg.complications[1].source,
        SourceKind::StaticText {
            text: "LDN".to_string()
        }
    );
    cfg.validate().expect("valid");
}

#[test]
fn defaults_fill_missing_fields() {
    let file = write_config("accent-color: \"#E74C3C\"\n");
    let cfg = Configuration::from_yaml_file(file.path()).expect("parse");
    assert_eq!(cfg.window.width, 450);
    assert!(cfg.use_24h);
    assert_eq!(cfg.frame_period, Duration::from_millis(32));
    cfg.validate().expect("valid");
}

#[test]
fn duplicate_slots_are_rejected() {
    let file = write_config(
        r#"
complications:
  - slot: 1
    source: weekday
  - slot: 1
    source: day-of-month
"#,
    );
    let cfg = Configuration::from_yaml_file(file.path()).expect("parse");
    assert!(cfg.validate().is_err());
}

#[test]
fn out_of_range_slot_is_rejected() {
    let file = write_config(
        r#"
complications:
  - slot: 5
    source: weekday
"#,
    );
    let cfg = Configuration::from_yaml_file(file.path()).expect("parse");
    assert!(cfg.validate().is_err());
}

#[test]
fn unknown_accent_color_is_rejected() {
    let file = write_config("accent-color: \"#123456\"\n");
    let cfg = Configuration::from_yaml_file(file.path()).expect("parse");
    assert!(cfg.validate().is_err());
}

#[test]
fn style_catalog_lookups() {
    assert!(color_option("#1ABC9C").is_some());
    assert!(color_option("#000000").is_none());
    assert!(font_option("4").is_some());
    assert!(font_option("5").is_none());
}

#[test]
fn catalog_ids_parse_as_argb() {
    let default = parse_argb_hex("#D3FFFFFF").expect("default id");
    // 0xD3 alpha, white.
    assert!((default[3] - 0xD3 as f32 / 255.0).abs() < 1e-4);
    assert!((default[0] - 1.0).abs() < 1e-4);

    let opaque = parse_argb_hex("#1ABC9C").expect("six digit id");
    assert!((opaque[3] - 1.0).abs() < 1e-4);
}

#[test]
fn ambient_accent_keeps_color_but_dims_alpha() {
    let palette = Palette::resolve(&StyleSnapshot {
        color_id: "#1ABC9C".to_string(),
        font_id: "1".to_string(),
    });
    let active = palette.active_seconds;
    let ambient = palette.ambient_seconds;
    for channel in 0..3 {
        assert!((active[channel] - ambient[channel]).abs() < 1e-6);
    }
    assert!((ambient[3] - active[3] * 0.7).abs() < 1e-6);
}

#[test]
fn initial_style_mirrors_the_config() {
    let cfg = Configuration::default();
    let style = cfg.initial_style();
    assert_eq!(style, StyleSnapshot::default());
}
