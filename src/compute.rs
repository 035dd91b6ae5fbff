use crate::data::{CountyGrowth, InsuranceRecord};
use std::collections::{HashMap, HashSet};

pub const TOP_GROWTH_LIMIT: usize = 10;

/// Number of distinct county labels, compared byte for byte.
pub(crate) fn count_counties(records: &[InsuranceRecord]) -> usize {
    records
        .iter()
        .map(|record| record.county.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Plain left-to-right sum. Starts from `0.0` so an empty dataset doesn't
/// come out as `-0.0`.
pub(crate) fn total_tiv2012(records: &[InsuranceRecord]) -> f64 {
    records.iter().fold(0.0, |total, record| total + record.tiv2012)
}

/// Every county with its summed `tiv2012 - tiv2011`, biggest growth first.
/// Ties keep the order in which the counties first show up in `records`.
pub(crate) fn county_growth(records: &[InsuranceRecord]) -> Vec<CountyGrowth> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut growth: Vec<CountyGrowth> = Vec::new();
    for record in records {
        let slot = *index.entry(record.county.as_str()).or_insert_with(|| {
            growth.push(CountyGrowth {
                county: record.county.clone(),
                growth: 0.0,
            });
            growth.len() - 1
        });
        growth[slot].growth += record.tiv2012 - record.tiv2011;
    }
    growth.sort_by(|a, b| b.growth.total_cmp(&a.growth));
    growth
}

/// The `limit` counties with the largest growth (fewer if there aren't enough).
pub(crate) fn top_growth(records: &[InsuranceRecord], limit: usize) -> Vec<CountyGrowth> {
    let mut growth = county_growth(records);
    growth.truncate(limit);
    growth
}
