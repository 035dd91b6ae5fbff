use crate::{
    config::Config,
    data::{InsuranceRecord, LoadError, COUNTY_COLUMN, TIV2011_COLUMN, TIV2012_COLUMN},
};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, info};
use zip::ZipArchive;

/// Opens `archive_path`, looks up the first regular file called exactly
/// `entry_name` and hands its decompressed content to `f`. The archive and the
/// entry are only alive for the duration of the call.
pub(crate) fn with_archive_entry<T, F>(
    archive_path: &Path,
    entry_name: &str,
    f: F,
) -> Result<T, LoadError>
where
    F: FnOnce(&mut dyn Read) -> Result<T, LoadError>,
{
    let archive_error = |source| LoadError::Archive {
        path: archive_path.to_path_buf(),
        source,
    };
    let file = File::open(archive_path).map_err(|source| LoadError::ArchiveOpen {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(archive_error)?;

    // raw access: we only need the names, not a decompressor
    let mut found = None;
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(archive_error)?;
        if !entry.is_dir() && entry.name() == entry_name {
            found = Some(i);
            break;
        }
    }
    let index = found.ok_or_else(|| LoadError::EntryNotFound {
        archive: archive_path.to_path_buf(),
        entry: entry_name.to_string(),
    })?;

    let mut entry = archive.by_index(index).map_err(archive_error)?;
    debug!(entry = entry.name(), size = entry.size(), "found data file");
    f(&mut entry)
}

/// CSV importer for `InsuranceRecord`s. The first physical line is a header;
/// every other line, blank ones included, must carry the county and both TIV
/// columns at their fixed positions. Fields are split on `,` only: no quoting,
/// no trimming.
pub(crate) fn read_records<R: Read>(mut reader: R) -> Result<Vec<InsuranceRecord>, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut records = Vec::new();
    for (idx, line) in physical_lines(&text).enumerate().skip(1) {
        let line_no = idx as u64 + 1;
        let row = csv::StringRecord::from(line.split(',').collect::<Vec<_>>());
        records.push(InsuranceRecord {
            tiv2011: number_at(&row, line_no, TIV2011_COLUMN)?,
            tiv2012: number_at(&row, line_no, TIV2012_COLUMN)?,
            county: field_at(&row, line_no, COUNTY_COLUMN)?.to_string(),
        });
    }
    Ok(records)
}

/// Lines terminated by `\n`, `\r\n` or a lone `\r`. A terminator at the very
/// end doesn't open an extra empty line.
fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                let line = &rest[..end];
                let len = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + len..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

fn field_at<'r>(
    row: &'r csv::StringRecord,
    line: u64,
    column: usize,
) -> Result<&'r str, LoadError> {
    row.get(column)
        .ok_or(LoadError::MissingField { line, column })
}

/// Surrounding whitespace is tolerated in numeric fields only.
fn number_at(row: &csv::StringRecord, line: u64, column: usize) -> Result<f64, LoadError> {
    let field = field_at(row, line, column)?;
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LoadError::InvalidNumber {
            line,
            column,
            value: field.to_string(),
        }),
    }
}

/// Loads the whole dataset described by `config` into memory.
#[tracing::instrument(level = "info", skip(config), fields(archive = %config.archive.display()))]
pub(crate) fn load_records(config: &Config) -> Result<Vec<InsuranceRecord>, LoadError> {
    let records = with_archive_entry(&config.archive, &config.entry, |reader| {
        read_records(reader)
    })?;
    info!(records = records.len(), "loaded insurance records");
    Ok(records)
}
