use crate::data::CountyGrowth;
use anyhow::Context;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Writes `count.txt` content: the bare number, no newline.
pub(crate) fn write_count<W: Write>(mut writer: W, count: usize) -> Result<(), anyhow::Error> {
    write!(writer, "{count}")?;
    writer.flush()?;
    Ok(())
}

/// Writes `tiv2012.txt` content: the shortest round-trip form of the sum
/// (always with a fractional part, e.g. `410.0`).
pub(crate) fn write_total<W: Write>(mut writer: W, total: f64) -> Result<(), anyhow::Error> {
    write!(writer, "{total:?}")?;
    writer.flush()?;
    Ok(())
}

/// CSV exporter for the growth ranking. County labels are written as they
/// were read, without quoting.
pub(crate) fn write_growth<W: Write>(
    writer: W,
    growth: &[CountyGrowth],
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    // an empty ranking still gets its header
    if growth.is_empty() {
        wtr.write_record(["country", "value"])?;
    }
    for row in growth {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Runs `fill` against a temporary file next to `path`, then moves it into
/// place. On any error the temporary file is dropped and whatever was at
/// `path` before stays as it was.
pub(crate) fn write_output<F>(path: &Path, fill: F) -> Result<(), anyhow::Error>
where
    F: FnOnce(&mut BufWriter<&File>) -> Result<(), anyhow::Error>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Cannot create temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        fill(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Cannot write {}", path.display()))?;
    }
    tmp.persist(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_count, write_growth, write_output, write_total};
    use crate::data::CountyGrowth;
    use std::io::Write;

    fn growth(county: &str, growth: f64) -> CountyGrowth {
        CountyGrowth {
            county: county.to_string(),
            growth,
        }
    }

    #[test]
    fn test_write_count() {
        let mut out = Vec::new();
        write_count(&mut out, 67).unwrap();
        assert_eq!(out, b"67");
    }

    #[test]
    fn test_write_total() {
        let mut out = Vec::new();
        write_total(&mut out, 410.0).unwrap();
        assert_eq!(out, b"410.0");

        let mut out = Vec::new();
        write_total(&mut out, 0.1 + 0.2).unwrap();
        assert_eq!(out, b"0.30000000000000004");
    }

    #[test]
    fn test_write_total_large_sum_is_positional() {
        let mut out = Vec::new();
        write_total(&mut out, 1.9011e9).unwrap();
        assert_eq!(out, b"1901100000.0");
    }

    #[test]
    fn test_write_growth() {
        let mut out = Vec::new();
        write_growth(
            &mut out,
            &[growth("A", 80.0), growth("B", -20.0), growth("\"C\"", 0.125)],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "country,value\nA,80.00\nB,-20.00\n\"C\",0.13\n"
        );
    }

    #[test]
    fn test_write_growth_empty() {
        let mut out = Vec::new();
        write_growth(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "country,value\n");
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("count.txt");
        write_output(&path, |w| write_count(w, 3)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3");
        // overwrite
        write_output(&path, |w| write_count(w, 42)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "42");
    }

    #[test]
    fn test_write_output_failure_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("count.txt");
        std::fs::write(&path, "7").unwrap();
        let err = write_output(&path, |w| {
            w.write_all(b"partial")?;
            anyhow::bail!("disk full")
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_output_blocked_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("count.txt");
        std::fs::create_dir(&path).unwrap();
        assert!(write_output(&path, |w| write_count(w, 3)).is_err());
        assert!(path.is_dir());
    }
}
