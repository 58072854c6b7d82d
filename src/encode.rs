use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;
use plotters::style::RGBColor;
use std::cmp::Reverse;

use crate::config::ChartConfig;
use crate::errors::{ChartError, Result};
use crate::models::Record;
use crate::scales::{LinearScale, LogScale, OrdinalScale};

/// Visual attributes of one marker, in plot-area pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualAttributes {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: RGBColor,
}

impl VisualAttributes {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.radius.is_finite()
    }
}

/// Largest population first so smaller bubbles are drawn on top. Stable.
pub fn sort_by_population(records: &mut [Record]) {
    records.sort_by_key(|r| Reverse(OrderedFloat(r.population)));
}

fn extent<F>(records: &[Record], field: F) -> Result<(f64, f64)>
where
    F: Fn(&Record) -> f64,
{
    match records.iter().map(|r| OrderedFloat(field(r))).minmax() {
        MinMaxResult::NoElements => Err(ChartError::EmptyDataset),
        MinMaxResult::OneElement(v) => Ok((v.0, v.0)),
        MinMaxResult::MinMax(lo, hi) => Ok((lo.0, hi.0)),
    }
}

/// The four scales of the bubble chart, derived once from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    pub income: LogScale,
    pub life_expectancy: LinearScale,
    pub population: LinearScale,
    pub color: OrdinalScale,
}

impl ScaleSet {
    pub fn build(records: &[Record], config: &ChartConfig) -> Result<Self> {
        let income = extent(records, |r| r.income)?;
        let life = extent(records, |r| r.life_expectancy)?;
        let population = extent(records, |r| r.population)?;
        let (pad_low, pad_high) = config.life_expectancy_padding;

        if income.0 <= 0.0 {
            log::warn!(
                "Minimum income {} is not positive; log scale positions will be invalid",
                income.0
            );
        }

        let scales = Self {
            income: LogScale::new(income, (0.0, config.chart_width())),
            life_expectancy: LinearScale::new(
                (life.0 - pad_low, life.1 + pad_high),
                (config.chart_height(), 0.0),
            ),
            population: LinearScale::new(population, config.radius_range),
            color: OrdinalScale::new(
                records.iter().map(|r| r.region.as_str()),
                config.palette_colors()?,
            ),
        };
        log::debug!(
            "Scales: income {:?}, life expectancy {:?}, population {:?}, {} regions",
            scales.income.domain,
            scales.life_expectancy.domain,
            scales.population.domain,
            scales.color.categories().len()
        );
        Ok(scales)
    }

    pub fn encode(&self, record: &Record) -> Result<VisualAttributes> {
        let fill = self
            .color
            .color(&record.region)
            .ok_or_else(|| ChartError::UnknownCategory(record.region.clone()))?;
        Ok(VisualAttributes {
            x: self.income.apply(record.income),
            y: self.life_expectancy.apply(record.life_expectancy),
            radius: self.population.apply(record.population),
            fill,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(country: &str, life: f64, income: f64, population: f64, region: &str) -> Record {
        Record {
            country: country.to_string(),
            life_expectancy: life,
            income,
            population,
            region: region.to_string(),
        }
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut records = vec![
            record("a", 70.0, 1000.0, 10.0, "X"),
            record("b", 70.0, 1000.0, 30.0, "X"),
            record("c", 70.0, 1000.0, 10.0, "X"),
            record("d", 70.0, 1000.0, 20.0, "X"),
        ];
        sort_by_population(&mut records);
        let order: Vec<_> = records.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn empty_dataset_has_no_scales() {
        let err = ScaleSet::build(&[], &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::EmptyDataset));
    }

    #[test]
    fn life_expectancy_domain_is_padded() {
        let records = vec![
            record("a", 60.0, 1000.0, 10.0, "X"),
            record("b", 80.0, 2000.0, 20.0, "Y"),
        ];
        let scales = ScaleSet::build(&records, &ChartConfig::default()).unwrap();
        assert_eq!(scales.life_expectancy.domain, (58.0, 85.0));
        assert_eq!(scales.life_expectancy.range, (460.0, 0.0));
        assert_eq!(scales.income.range, (0.0, 600.0));
    }

    #[test]
    fn concrete_scenario() {
        // Bounding rows give income [2000, 8000], life [62, 80] -> padded [60, 85],
        // population [500000, 1500000].
        let records = vec![
            record("lo", 62.0, 2000.0, 500_000.0, "Europe"),
            record("Foo", 70.5, 4000.0, 1_000_000.0, "Asia"),
            record("hi", 80.0, 8000.0, 1_500_000.0, "Europe"),
        ];
        let scales = ScaleSet::build(&records, &ChartConfig::default()).unwrap();
        let attrs = scales.encode(&records[1]).unwrap();

        let fraction = (4000f64 / 2000.0).ln() / (8000f64 / 2000.0).ln();
        assert!((attrs.x - 600.0 * fraction).abs() < 1e-9);
        assert!((attrs.radius - 17.0).abs() < 1e-9);
        assert!((attrs.y - 460.0 * (1.0 - (70.5 - 60.0) / 25.0)).abs() < 1e-9);
        assert_eq!(Some(attrs.fill), scales.color.color("Asia"));
    }

    #[test]
    fn single_row_maps_to_range_midpoints() {
        let records = vec![record("only", 70.0, 5000.0, 1000.0, "X")];
        let scales = ScaleSet::build(&records, &ChartConfig::default()).unwrap();
        let attrs = scales.encode(&records[0]).unwrap();
        assert_eq!(attrs.x, 300.0);
        assert_eq!(attrs.radius, 17.0);
        assert!(attrs.is_finite());
    }

    #[test]
    fn unknown_region_is_an_error() {
        let records = vec![record("a", 70.0, 5000.0, 1000.0, "X")];
        let scales = ScaleSet::build(&records, &ChartConfig::default()).unwrap();
        let stranger = record("b", 70.0, 5000.0, 1000.0, "Atlantis");
        assert!(matches!(
            scales.encode(&stranger),
            Err(ChartError::UnknownCategory(r)) if r == "Atlantis"
        ));
    }
}
