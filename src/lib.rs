//! Wealth & health of nations bubble chart.
//!
//! Loads country statistics from CSV, encodes them as bubbles (income on a
//! log x axis, life expectancy on y, population as radius, region as color)
//! and renders the chart with `plotters`.

pub mod axis;
pub mod chart;
pub mod config;
pub mod eda;
pub mod encode;
pub mod errors;
pub mod legend;
pub mod load_clean;
pub mod models;
pub mod scales;
pub mod tooltip;

pub use chart::{render_svg_string, render_to_file, BubbleChart, RenderSummary};
pub use config::{ChartConfig, MalformedPolicy};
pub use errors::{ChartError, Result};
pub use load_clean::{load_dataset, load_from_reader, LoadReport};
pub use models::Record;
