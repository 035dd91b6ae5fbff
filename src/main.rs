use anyhow::Context;
use compute::{count_counties, top_growth, total_tiv2012, TOP_GROWTH_LIMIT};
use config::{Config, COUNT_FILE, MOST_VALUABLE_FILE, TIV2012_FILE};
use read::load_records;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use write::{write_count, write_growth, write_output, write_total};

mod compute;
mod config;
mod data;
#[cfg(test)]
mod fixtures;
mod read;
mod write;

fn main() -> Result<(), anyhow::Error> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let failed = run(&Config::default())?;
    if failed > 0 {
        warn!(failed, "some outputs could not be written");
    }
    Ok(())
}

/// Loads the dataset then produces the three outputs. A load error aborts
/// before anything is written; a write error only skips that one output.
/// Returns how many outputs failed.
fn run(config: &Config) -> Result<usize, anyhow::Error> {
    let records = load_records(config).context("Error reading data file")?;
    let mut failed = 0;

    let path = config.output_path(COUNT_FILE);
    let count = count_counties(&records);
    if let Err(e) = write_output(&path, |w| write_count(w, count)) {
        error!(path = %path.display(), "Error writing to file: {e:#}");
        failed += 1;
    } else {
        info!(path = %path.display(), count, "wrote county count");
    }

    let path = config.output_path(TIV2012_FILE);
    let total = total_tiv2012(&records);
    if let Err(e) = write_output(&path, |w| write_total(w, total)) {
        error!(path = %path.display(), "Error writing to file: {e:#}");
        failed += 1;
    } else {
        info!(path = %path.display(), total, "wrote 2012 total insured value");
    }

    let path = config.output_path(MOST_VALUABLE_FILE);
    let growth = top_growth(&records, TOP_GROWTH_LIMIT);
    if let Err(e) = write_output(&path, |w| write_growth(w, &growth)) {
        error!(path = %path.display(), "Error writing to file: {e:#}");
        failed += 1;
    } else {
        info!(path = %path.display(), counties = growth.len(), "wrote growth ranking");
    }

    Ok(failed)
}
