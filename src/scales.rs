//! Scale functions mapping data values into pixel space.
//!
//! Continuous scales interpolate a domain interval onto a range interval and
//! never fail: a zero-width domain maps every input to the middle of the
//! range, and invalid inputs (e.g. a non-positive value on a log scale) come
//! back as non-finite positions for the caller to deal with.

use itertools::Itertools;
use plotters::style::RGBColor;
use std::collections::HashMap;

fn interpolate(range: (f64, f64), t: f64) -> f64 {
    range.0 + (range.1 - range.0) * t
}

fn midpoint(range: (f64, f64)) -> f64 {
    interpolate(range, 0.5)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d0 == d1 {
            return midpoint(self.range);
        }
        interpolate(self.range, (value - d0) / (d1 - d0))
    }

    /// Round tick values covering the domain, roughly `count` of them, at a
    /// step of 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if !(lo.is_finite() && hi.is_finite()) || count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let raw_step = (hi - lo) / count as f64;
        let power = raw_step.log10().floor();
        let error = raw_step / 10f64.powf(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        // Negative powers divide by an integral increment so 0.1-style steps
        // don't accumulate float error.
        let step = factor * 10f64.powf(power);
        let inc = 10f64.powf(-power) / factor;
        let to_value = |i: i64| {
            if power < 0.0 {
                i as f64 / inc
            } else {
                i as f64 * step
            }
        };
        let (start, stop) = if power < 0.0 {
            ((lo * inc).ceil() as i64, (hi * inc).floor() as i64)
        } else {
            ((lo / step).ceil() as i64, (hi / step).floor() as i64)
        };

        (start..=stop).map(to_value).collect()
    }
}

/// Natural-log interpolation. Defined for strictly positive domains only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d0 == d1 && d0 > 0.0 && value > 0.0 {
            return midpoint(self.range);
        }
        if d0 <= 0.0 || d1 <= 0.0 || value <= 0.0 {
            return f64::NAN;
        }
        interpolate(self.range, (value / d0).ln() / (d1 / d0).ln())
    }

    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        (lo..=hi).contains(&value)
    }
}

/// Categorical color scale over a frozen, ordered list of categories.
/// Categories beyond the palette length wrap around.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    categories: Vec<String>,
    index: HashMap<String, usize>,
    palette: Vec<RGBColor>,
}

impl OrdinalScale {
    /// Builds the scale from values in first-seen order; duplicates collapse.
    pub fn new<I, S>(values: I, palette: Vec<RGBColor>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: Vec<String> = values
            .into_iter()
            .map(Into::<String>::into)
            .unique()
            .collect();
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self {
            categories,
            index,
            palette,
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn color(&self, category: &str) -> Option<RGBColor> {
        if self.palette.is_empty() {
            return None;
        }
        self.index
            .get(category)
            .map(|&i| self.palette[i % self.palette.len()])
    }
}
