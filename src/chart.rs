use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;

use crate::axis::{axis_layout, income_ticks, life_expectancy_ticks, AxisTick, Y_AXIS_SHIFT};
use crate::config::ChartConfig;
use crate::encode::{sort_by_population, ScaleSet, VisualAttributes};
use crate::errors::{ChartError, Result};
use crate::legend::{build_legend, LegendEntry};
use crate::models::Record;
use crate::tooltip::{hit_test, tooltip_for, PointerEvent, TooltipRequest};

const FONT: &str = "sans-serif";
const TICK_SIZE: f64 = 6.0;

/// A fully encoded bubble chart: records in draw order with one marker each,
/// plus axes and legend. Nothing here changes after construction.
#[derive(Debug, Clone)]
pub struct BubbleChart {
    pub records: Vec<Record>,
    pub scales: ScaleSet,
    pub markers: Vec<VisualAttributes>,
    pub legend: Vec<LegendEntry>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub markers_drawn: usize,
    pub markers_skipped: usize,
    pub legend_entries: usize,
}

impl BubbleChart {
    /// Sorts, builds the scales and encodes every record.
    pub fn from_records(mut records: Vec<Record>, config: &ChartConfig) -> Result<Self> {
        sort_by_population(&mut records);
        let scales = ScaleSet::build(&records, config)?;
        let markers = records
            .iter()
            .map(|r| scales.encode(r))
            .collect::<Result<Vec<_>>>()?;
        let legend = build_legend(&scales.color, &config.legend)?;
        let x_ticks = income_ticks(&scales.income, &config.x_tick_values);
        let y_ticks = life_expectancy_ticks(&scales.life_expectancy, config.y_tick_count);

        Ok(Self {
            records,
            scales,
            markers,
            legend,
            x_ticks,
            y_ticks,
        })
    }

    /// Record under a device coordinate, if any.
    pub fn record_at(&self, config: &ChartConfig, x: f64, y: f64) -> Option<&Record> {
        hit_test(&self.markers, &config.margin, x, y).map(|i| &self.records[i])
    }

    /// Simulates the pointer entering the chart at a device coordinate.
    pub fn hover(&self, config: &ChartConfig, x: f64, y: f64) -> TooltipRequest {
        tooltip_for(&PointerEvent::Enter { x, y }, self.record_at(config, x, y))
    }
}

fn render_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Render(err.to_string())
}

/// Fill and outline of a marker. Opacity applies to the whole circle,
/// outline included.
pub fn marker_styles(fill: RGBColor, opacity: f64) -> (ShapeStyle, ShapeStyle) {
    (fill.mix(opacity).filled(), BLACK.mix(opacity).stroke_width(1))
}

/// Writes the chart as SVG when the extension is `.svg`, PNG otherwise.
pub fn render_to_file(
    chart: &BubbleChart,
    config: &ChartConfig,
    output_file: &Path,
) -> Result<RenderSummary> {
    let size = (config.width, config.height);
    let is_svg = output_file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    let summary = if is_svg {
        let root = SVGBackend::new(output_file, size).into_drawing_area();
        draw_chart(&root, chart, config)?
    } else {
        let root = BitMapBackend::new(output_file, size).into_drawing_area();
        draw_chart(&root, chart, config)?
    };

    log::info!(
        "Chart saved to {} ({} markers, {} skipped)",
        output_file.display(),
        summary.markers_drawn,
        summary.markers_skipped
    );
    Ok(summary)
}

pub fn render_svg_string(
    chart: &BubbleChart,
    config: &ChartConfig,
) -> Result<(String, RenderSummary)> {
    let mut buffer = String::new();
    let summary = {
        let root = SVGBackend::with_string(&mut buffer, (config.width, config.height))
            .into_drawing_area();
        draw_chart(&root, chart, config)?
    };
    Ok((buffer, summary))
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &BubbleChart,
    config: &ChartConfig,
) -> Result<RenderSummary> {
    let (left, top) = (config.margin.left as f64, config.margin.top as f64);
    // Plot-group coordinates to device pixels.
    let at = |x: f64, y: f64| ((x + left).round() as i32, (y + top).round() as i32);
    let height = config.chart_height();
    let axes = axis_layout(config);

    root.fill(&WHITE).map_err(render_err)?;

    let mut summary = RenderSummary::default();
    for (record, marker) in chart.records.iter().zip(&chart.markers) {
        if !marker.is_finite() {
            log::warn!("Skipping {}: marker position is not finite", record.country);
            summary.markers_skipped += 1;
            continue;
        }
        let center = at(marker.x, marker.y);
        let radius = marker.radius.round() as i32;
        let (fill, outline) = marker_styles(marker.fill, config.marker_opacity);
        root.draw(&Circle::new(center, radius, fill)).map_err(render_err)?;
        root.draw(&Circle::new(center, radius, outline)).map_err(render_err)?;
        summary.markers_drawn += 1;
    }

    let tick_font = TextStyle::from((FONT, 10).into_font()).color(&BLACK);
    let label_font = TextStyle::from((FONT, 12).into_font()).color(&BLACK);

    // x axis along the bottom of the plot area
    let [(x0, y0), (x1, y1)] = axes.x_line;
    root.draw(&PathElement::new(vec![at(x0, y0), at(x1, y1)], BLACK.stroke_width(1)))
        .map_err(render_err)?;
    for tick in &chart.x_ticks {
        root.draw(&PathElement::new(
            vec![at(tick.position, height), at(tick.position, height + TICK_SIZE)],
            BLACK.stroke_width(1),
        ))
        .map_err(render_err)?;
        root.draw(&Text::new(
            tick.label.clone(),
            at(tick.position, height + TICK_SIZE + 3.0),
            tick_font.pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(render_err)?;
    }
    root.draw(&Text::new(
        "Income".to_string(),
        at(axes.income_title.0, axes.income_title.1),
        label_font.pos(Pos::new(HPos::Left, VPos::Bottom)),
    ))
    .map_err(render_err)?;

    // y axis, nudged left of the plot area
    let [(x0, y0), (x1, y1)] = axes.y_line;
    root.draw(&PathElement::new(vec![at(x0, y0), at(x1, y1)], BLACK.stroke_width(1)))
        .map_err(render_err)?;
    for tick in &chart.y_ticks {
        root.draw(&PathElement::new(
            vec![at(Y_AXIS_SHIFT, tick.position), at(Y_AXIS_SHIFT - TICK_SIZE, tick.position)],
            BLACK.stroke_width(1),
        ))
        .map_err(render_err)?;
        root.draw(&Text::new(
            tick.label.clone(),
            at(Y_AXIS_SHIFT - TICK_SIZE - 3.0, tick.position),
            tick_font.pos(Pos::new(HPos::Right, VPos::Center)),
        ))
        .map_err(render_err)?;
    }
    root.draw(&Text::new(
        "Life Expectancy".to_string(),
        at(axes.life_expectancy_title.0, axes.life_expectancy_title.1),
        label_font.transform(FontTransform::Rotate90).pos(Pos::new(HPos::Left, VPos::Top)),
    ))
    .map_err(render_err)?;

    for entry in &chart.legend {
        let (x, y) = entry.swatch;
        root.draw(&Rectangle::new(
            [at(x, y), at(x + entry.swatch_size, y + entry.swatch_size)],
            entry.color.filled(),
        ))
        .map_err(render_err)?;
        root.draw(&Text::new(
            entry.region.clone(),
            at(entry.label.0, entry.label.1),
            label_font.pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(render_err)?;
    }
    summary.legend_entries = chart.legend.len();

    root.present().map_err(render_err)?;
    Ok(summary)
}
