//! Hover handling as plain functions: a pointer event plus the record under
//! the pointer produces a tooltip request, with no rendering involved.

use crate::axis::format_grouped;
use crate::config::Margin;
use crate::encode::VisualAttributes;
use crate::models::Record;

pub const TOOLTIP_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered a marker at a device coordinate.
    Enter { x: f64, y: f64 },
    Leave,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub country: String,
    pub region: String,
    pub population: String,
    pub income: String,
    pub life_expectancy: String,
}

impl TooltipContent {
    pub fn from_record(record: &Record) -> Self {
        Self {
            country: record.country.clone(),
            region: record.region.clone(),
            population: format_grouped(record.population),
            income: format_grouped(record.income),
            life_expectancy: record.life_expectancy.to_string(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Country: {}", self.country),
            format!("Region: {}", self.region),
            format!("Population: {}", self.population),
            format!("Income: {}", self.income),
            format!("Life Expectancy: {}", self.life_expectancy),
        ]
    }

    pub fn to_html(&self) -> String {
        format!(
            concat!(
                "<div> Country:  {} <br> Region:  {} <br> Population:  {} <br> ",
                "Income:  {} <br> Life Expectancy:  {} <br> </div>"
            ),
            escape_html(&self.country),
            escape_html(&self.region),
            self.population,
            self.income,
            self.life_expectancy
        )
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipRequest {
    Show {
        left: f64,
        top: f64,
        opacity: f64,
        content: TooltipContent,
    },
    /// Hide the panel and clear its content.
    Hide,
}

impl TooltipRequest {
    /// Panel markup for the request; empty when hidden.
    pub fn html(&self) -> String {
        match self {
            TooltipRequest::Show { content, .. } => content.to_html(),
            TooltipRequest::Hide => String::new(),
        }
    }
}

/// An enter event without a bound record has nothing to show, so it hides.
pub fn tooltip_for(event: &PointerEvent, record: Option<&Record>) -> TooltipRequest {
    match (event, record) {
        (PointerEvent::Enter { x, y }, Some(record)) => TooltipRequest::Show {
            left: *x,
            top: *y,
            opacity: TOOLTIP_OPACITY,
            content: TooltipContent::from_record(record),
        },
        _ => TooltipRequest::Hide,
    }
}

/// Index of the top-most marker containing a device coordinate. Markers are
/// in draw order, so later ones win. Non-finite markers are never hit.
pub fn hit_test(markers: &[VisualAttributes], margin: &Margin, x: f64, y: f64) -> Option<usize> {
    let px = x - margin.left as f64;
    let py = y - margin.top as f64;
    markers
        .iter()
        .enumerate()
        .rev()
        .find(|(_, m)| m.is_finite() && (px - m.x).hypot(py - m.y) <= m.radius)
        .map(|(i, _)| i)
}
