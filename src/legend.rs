use plotters::style::RGBColor;

use crate::config::LegendConfig;
use crate::errors::{ChartError, Result};
use crate::scales::OrdinalScale;

/// One legend row: a square swatch and its label, in plot-group pixels with
/// the legend offset already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub region: String,
    pub color: RGBColor,
    /// Top-left corner of the swatch.
    pub swatch: (f64, f64),
    pub swatch_size: f64,
    /// Left edge and vertical center of the label.
    pub label: (f64, f64),
}

pub fn build_legend(scale: &OrdinalScale, layout: &LegendConfig) -> Result<Vec<LegendEntry>> {
    let step = layout.swatch_size + layout.gap;
    let (dx, dy) = layout.offset;

    scale
        .categories()
        .iter()
        .enumerate()
        .map(|(i, region)| {
            let top = layout.y + i as f64 * step;
            let color = scale
                .color(region)
                .ok_or_else(|| ChartError::UnknownCategory(region.clone()))?;
            Ok(LegendEntry {
                region: region.clone(),
                color,
                swatch: (layout.x + dx, top + dy),
                swatch_size: layout.swatch_size,
                label: (
                    layout.x + layout.swatch_size * 1.2 + dx,
                    top + layout.swatch_size / 2.0 + dy,
                ),
            })
        })
        .collect()
}
