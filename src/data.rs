use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub const COUNTY_COLUMN: usize = 2;
pub const TIV2011_COLUMN: usize = 7;
pub const TIV2012_COLUMN: usize = 8;

pub const GROWTH_DECIMALS: u32 = 2;

/// One line of the insurance dataset, reduced to the three columns we aggregate on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InsuranceRecord {
    pub tiv2011: f64,
    pub tiv2012: f64,
    pub county: String,
}

/// Summed `tiv2012 - tiv2011` for one county. The growth is kept as a raw `f64`
/// and only rounded at serialization time, see `GrowthSerializer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "GrowthSerializer")]
pub(crate) struct CountyGrowth {
    pub county: String,
    pub growth: f64,
}

/// Proxy for serializing `CountyGrowth`. Column names match the historical
/// output format, hence `country`.
#[derive(Serialize)]
pub(crate) struct GrowthSerializer {
    pub country: String,
    pub value: String,
}

impl From<CountyGrowth> for GrowthSerializer {
    fn from(row: CountyGrowth) -> Self {
        Self {
            value: format_growth(row.growth),
            country: row.county,
        }
    }
}

/// Fixed-point rendering with two decimals, rounded half away from zero on the
/// shortest decimal form of `value` (so `1.005` gives `1.01`, not `1.00`).
pub(crate) fn format_growth(value: f64) -> String {
    let shortest = value.to_string();
    match shortest.parse::<Decimal>() {
        Ok(d) => {
            let mut d =
                d.round_dp_with_strategy(GROWTH_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
            d.rescale(GROWTH_DECIMALS);
            d.to_string()
        }
        // past Decimal's range every f64 is a whole number
        Err(_) if value.fract() == 0.0 => format!("{shortest}.00"),
        // below Decimal's precision, rounds to zero either way
        Err(_) => format!("{value:.2}"),
    }
}

/// Everything that can go wrong while loading the dataset. None of these is
/// recoverable: a single bad line discards the whole load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot open archive {path}: {source}")]
    ArchiveOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },
    #[error("Data file {entry} not found in the zip archive {archive}")]
    EntryNotFound { archive: PathBuf, entry: String },
    #[error("Line {line}: missing field #{column}")]
    MissingField { line: u64, column: usize },
    #[error("Line {line}: field #{column} is not a finite number ({value:?})")]
    InvalidNumber {
        line: u64,
        column: usize,
        value: String,
    },
    #[error("Cannot read data file: {0}")]
    Read(#[from] std::io::Error),
}
