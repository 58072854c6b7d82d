use crate::config::ChartConfig;
use crate::scales::{LinearScale, LogScale};

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    /// Pixel offset along the axis.
    pub position: f64,
    pub label: String,
}

/// Formats with comma thousands separators, rounded to a whole number
/// (d3's `,.0f`). Used for axis ticks.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    format_grouped(value.round())
}

/// Formats with comma thousands separators and keeps any fractional digits
/// (d3's `,`). Used for tooltip values.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = value.abs().to_string();
    let (digits, fraction) = match text.split_once('.') {
        Some((digits, fraction)) => (digits, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Horizontal offset of the y axis from the plot area's left edge.
pub const Y_AXIS_SHIFT: f64 = -5.0;

/// Axis lines and titles in plot-group pixels. The y axis sits 5px left of
/// the plot area and both titles are drawn inside the plot group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLayout {
    pub x_line: [(f64, f64); 2],
    pub y_line: [(f64, f64); 2],
    /// Bottom-left corner of the "Income" title.
    pub income_title: (f64, f64),
    /// Top-left corner of the vertical "Life Expectancy" title.
    pub life_expectancy_title: (f64, f64),
}

pub fn axis_layout(config: &ChartConfig) -> AxisLayout {
    let width = config.chart_width();
    let height = config.chart_height();
    let (left, top) = (config.margin.left as f64, config.margin.top as f64);
    AxisLayout {
        x_line: [(0.0, height), (width, height)],
        y_line: [(Y_AXIS_SHIFT, 0.0), (Y_AXIS_SHIFT, height)],
        income_title: (width - 3.0 * left, height - 10.0),
        life_expectancy_title: (left - 21.0, top - 10.0),
    }
}

/// Income ticks at fixed values; values outside the domain are dropped.
pub fn income_ticks(scale: &LogScale, values: &[f64]) -> Vec<AxisTick> {
    values
        .iter()
        .copied()
        .filter(|&v| scale.contains(v))
        .map(|value| AxisTick {
            value,
            position: scale.apply(value),
            label: format_thousands(value),
        })
        .filter(|tick| tick.position.is_finite())
        .collect()
}

pub fn life_expectancy_ticks(scale: &LinearScale, count: usize) -> Vec<AxisTick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: scale.apply(value),
            label: format!("{}", value),
        })
        .collect()
}
