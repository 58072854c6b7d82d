use itertools::Itertools;
use statrs::statistics::{Data, Distribution, Median};

use crate::models::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub mean: Option<f64>,
    pub median: f64,
    pub std_dev: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub records: usize,
    pub regions: Vec<String>,
    pub columns: Vec<ColumnSummary>,
}

fn summarize_column(name: &'static str, values: Vec<f64>) -> ColumnSummary {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let data = Data::new(values);
    ColumnSummary {
        name,
        min,
        max,
        mean: data.mean(),
        median: data.median(),
        std_dev: data.std_dev(),
    }
}

/// Descriptive statistics per numeric column. Returns `None` for an empty
/// dataset.
pub fn summarize(records: &[Record]) -> Option<DatasetSummary> {
    if records.is_empty() {
        return None;
    }
    let column = |f: fn(&Record) -> f64| records.iter().map(f).collect::<Vec<f64>>();

    Some(DatasetSummary {
        records: records.len(),
        regions: records.iter().map(|r| r.region.clone()).unique().collect(),
        columns: vec![
            summarize_column("LifeExpectancy", column(|r| r.life_expectancy)),
            summarize_column("Income", column(|r| r.income)),
            summarize_column("Population", column(|r| r.population)),
        ],
    })
}

pub fn log_summary(summary: &DatasetSummary) {
    log::info!("{} records across {} regions", summary.records, summary.regions.len());
    for region in &summary.regions {
        log::info!("  region: {}", region);
    }
    for column in &summary.columns {
        log::info!(
            "{}: min {:.2}, max {:.2}, mean {:.2}, median {:.2}, std dev {:.2}",
            column.name,
            column.min,
            column.max,
            column.mean.unwrap_or(f64::NAN),
            column.median,
            column.std_dev.unwrap_or(f64::NAN)
        );
    }
}
