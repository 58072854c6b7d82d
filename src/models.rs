use serde::Deserialize;

/// Column names expected in the wealth/health CSV header.
pub const REQUIRED_COLUMNS: [&str; 5] =
    ["Country", "LifeExpectancy", "Income", "Population", "Region"];

/// A CSV row before numeric coercion. Every field stays text so that a bad
/// number can be reported with its raw value instead of failing the reader.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "LifeExpectancy")]
    pub life_expectancy: String,
    #[serde(rename = "Income")]
    pub income: String,
    #[serde(rename = "Population")]
    pub population: String,
    #[serde(rename = "Region")]
    pub region: String,
}

/// One country's statistics after numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub life_expectancy: f64,
    pub income: f64,
    pub population: f64,
    pub region: String,
}

/// A numeric field that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub column: &'static str,
    pub raw: String,
}

/// Every bad field of a single CSV row. `row` is 1-based and counts data
/// rows only (the header is not row 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub country: String,
    pub fields: Vec<FieldError>,
}

impl RowError {
    pub fn has_column(&self, column: &str) -> bool {
        self.fields.iter().any(|f| f.column == column)
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {} ({}):", self.row, self.country)?;
        for field in &self.fields {
            write!(f, " {}={:?}", field.column, field.raw)?;
        }
        Ok(())
    }
}

fn parse_number(column: &'static str, raw: &str) -> Result<f64, FieldError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError {
            column,
            raw: raw.to_string(),
        })
}

impl RawRow {
    /// Coerce the numeric columns, collecting every failure rather than
    /// stopping at the first one.
    pub fn into_record(self, row: usize) -> Result<Record, RowError> {
        let life_expectancy = parse_number("LifeExpectancy", &self.life_expectancy);
        let income = parse_number("Income", &self.income);
        let population = parse_number("Population", &self.population);

        match (life_expectancy, income, population) {
            (Ok(life_expectancy), Ok(income), Ok(population)) => Ok(Record {
                country: self.country,
                life_expectancy,
                income,
                population,
                region: self.region,
            }),
            (l, i, p) => Err(RowError {
                row,
                country: self.country,
                fields: [l.err(), i.err(), p.err()].into_iter().flatten().collect(),
            }),
        }
    }
}
