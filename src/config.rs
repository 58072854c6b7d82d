use plotters::style::RGBColor;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::errors::{ChartError, Result};

/// Tableau 10, the qualitative palette used for regions.
pub const TABLEAU_10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

pub const MAX_Y_TICKS: usize = 100;

/// What to do with rows whose numeric fields do not convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Drop the row and log a warning.
    #[default]
    Skip,
    /// Abort the load with `ChartError::Parse`.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 20,
            left: 30,
        }
    }
}

/// Legend placement inside the plot group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub x: f64,
    pub y: f64,
    pub swatch_size: f64,
    pub gap: f64,
    /// Extra translate applied on top of `x`/`y`.
    pub offset: (f64, f64),
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            x: 75.0,
            y: 110.0,
            swatch_size: 17.0,
            gap: 5.0,
            offset: (400.0, 150.0),
        }
    }
}

/// Immutable chart layout and encoding settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer image width in pixels.
    pub width: u32,
    /// Outer image height in pixels.
    pub height: u32,
    pub margin: Margin,
    pub radius_range: (f64, f64),
    /// Subtracted from the minimum and added to the maximum life expectancy.
    pub life_expectancy_padding: (f64, f64),
    pub marker_opacity: f64,
    pub x_tick_values: Vec<f64>,
    pub y_tick_count: usize,
    pub palette: Vec<String>,
    pub legend: LegendConfig,
    pub on_malformed: MalformedPolicy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 650,
            height: 500,
            margin: Margin::default(),
            radius_range: (4.0, 30.0),
            life_expectancy_padding: (2.0, 5.0),
            marker_opacity: 0.67,
            x_tick_values: vec![1000.0, 2000.0, 4000.0, 8000.0, 16000.0, 32000.0, 100000.0],
            y_tick_count: 10,
            palette: TABLEAU_10.iter().map(|c| c.to_string()).collect(),
            legend: LegendConfig::default(),
            on_malformed: MalformedPolicy::Skip,
        }
    }
}

impl ChartConfig {
    /// Width of the plot area inside the margins.
    pub fn chart_width(&self) -> f64 {
        self.width as f64 - self.margin.left as f64 - self.margin.right as f64
    }

    /// Height of the plot area inside the margins.
    pub fn chart_height(&self) -> f64 {
        self.height as f64 - self.margin.top as f64 - self.margin.bottom as f64
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ChartConfig = toml::from_str(contents)
            .map_err(|e| ChartError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ChartError::Fetch {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chart_width() <= 0.0 || self.chart_height() <= 0.0 {
            return Err(ChartError::Config(format!(
                "margins leave no plot area in a {}x{} image",
                self.width, self.height
            )));
        }
        let (r0, r1) = self.radius_range;
        if !(r0 >= 0.0 && r1 >= r0) {
            return Err(ChartError::Config(format!(
                "radius_range must satisfy 0 <= min <= max, got ({}, {})",
                r0, r1
            )));
        }
        if !(0.0..=1.0).contains(&self.marker_opacity) {
            return Err(ChartError::Config("marker_opacity must be between 0.0 and 1.0".into()));
        }
        if !(1..=MAX_Y_TICKS).contains(&self.y_tick_count) {
            return Err(ChartError::Config(format!(
                "y_tick_count must be between 1 and {}, got {}",
                MAX_Y_TICKS, self.y_tick_count
            )));
        }
        if self.legend.swatch_size <= 0.0 {
            return Err(ChartError::Config("legend.swatch_size must be positive".into()));
        }
        self.palette_colors().map(|_| ())
    }

    /// The palette as concrete colors. Fails on an empty palette or a
    /// malformed hex string.
    pub fn palette_colors(&self) -> Result<Vec<RGBColor>> {
        if self.palette.is_empty() {
            return Err(ChartError::Config("palette must contain at least one color".into()));
        }
        self.palette.iter().map(|hex| parse_hex_color(hex)).collect()
    }
}

/// Parses `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(hex: &str) -> Result<RGBColor> {
    let digits = hex.trim().trim_start_matches('#');
    let bad = || ChartError::Config(format!("invalid color '{}'", hex));
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(bad());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
