//! Builders for test datasets and archives.
use std::{fs::File, io::Write, path::Path};
use zip::{write::SimpleFileOptions, ZipWriter};

pub(crate) const HEADER: &str = "policyID,statecode,county,eq_site_limit,hu_site_limit,\
fl_site_limit,fr_site_limit,tiv_2011,tiv_2012,eq_site_deductible,hu_site_deductible,\
fl_site_deductible,fr_site_deductible,point_latitude,point_longitude,line,construction,\
point_granularity";

/// The three-record example dataset: two counties, `A` growing by 80, `B` shrinking by 20.
pub(crate) const SAMPLE: &[(&str, f64, f64)] =
    &[("A", 100.0, 150.0), ("B", 200.0, 180.0), ("A", 50.0, 80.0)];

/// A full-width dataset line with the given county and TIVs.
pub(crate) fn row(county: &str, tiv2011: f64, tiv2012: f64) -> String {
    format!(
        "119736,FL,{county},498960,498960,498960,498960,{tiv2011},{tiv2012},\
0,9979.2,0,0,30.102261,-81.711777,Residential,Masonry,1"
    )
}

/// Header plus one line per `(county, tiv2011, tiv2012)`.
pub(crate) fn csv_payload(rows: &[(&str, f64, f64)]) -> String {
    let mut out = String::from(HEADER);
    for (county, tiv2011, tiv2012) in rows {
        out.push('\n');
        out.push_str(&row(county, *tiv2011, *tiv2012));
    }
    out.push('\n');
    out
}

/// Writes a zip at `path`. Entry names ending in `/` become directories and
/// their content is ignored.
pub(crate) fn write_archive(path: &Path, entries: &[(&str, &str)]) -> anyhow::Result<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options)?;
        } else {
            zip.start_file(*name, options)?;
            zip.write_all(content.as_bytes())?;
        }
    }
    zip.finish()?;
    Ok(())
}
