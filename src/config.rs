use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::complications::{SourceKind, SLOT_COUNT};
use crate::style::{color_option, font_option};

const FRAME_PERIOD_MS_DEFAULT: u64 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 450,
            height: 450,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ComplicationConfig {
    /// Slot index in the cluster, 0 at the bottom.
    pub slot: usize,
    pub source: SourceKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    pub window: WindowConfig,
    /// Accent color id from the style catalog.
    pub accent_color: String,
    /// Font id from the style catalog.
    pub font: String,
    pub use_24h: bool,
    /// Target frame period, e.g. `32ms`.
    #[serde(with = "humantime_serde")]
    pub frame_period: Duration,
    pub complications: Vec<ComplicationConfig>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            accent_color: crate::style::COLOR_OPTIONS[0].id.to_string(),
            font: crate::style::FONT_OPTIONS[0].id.to_string(),
            use_24h: true,
            frame_period: Duration::from_millis(FRAME_PERIOD_MS_DEFAULT),
            complications: vec![
                ComplicationConfig {
                    slot: 1,
                    source: SourceKind::Weekday,
                },
                ComplicationConfig {
                    slot: 2,
                    source: SourceKind::DayOfMonth,
                },
            ],
        }
    }
}

impl Configuration {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        let cfg: Configuration = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing configuration {}", path.display()))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.window.width > 0 && self.window.height > 0,
            "window size must be non-zero"
        );
        ensure!(
            !self.frame_period.is_zero(),
            "frame-period must be non-zero"
        );
        ensure!(
            color_option(&self.accent_color).is_some(),
            "unknown accent-color id {:?}",
            self.accent_color
        );
        ensure!(
            font_option(&self.font).is_some(),
            "unknown font id {:?}",
            self.font
        );
        let mut seen = [false; SLOT_COUNT];
        for complication in &self.complications {
            ensure!(
                complication.slot < SLOT_COUNT,
                "complication slot {} out of range (0..{})",
                complication.slot,
                SLOT_COUNT
            );
            ensure!(
                !seen[complication.slot],
                "complication slot {} configured twice",
                complication.slot
            );
            seen[complication.slot] = true;
        }
        Ok(())
    }

    pub fn initial_style(&self) -> crate::style::StyleSnapshot {
        crate::style::StyleSnapshot {
            color_id: self.accent_color.clone(),
            font_id: self.font.clone(),
        }
    }
}
