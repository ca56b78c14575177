//! Offline helpers that prepare feedback data for the reporting pipeline.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::{QuoteStyle, Reader, StringRecord, Terminator, WriterBuilder};
use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::info;

use crate::feedback::record::FeedbackRecord;

/// Write one `prod_data_<version>.csv` per model version found in `store`.
///
/// Returns the number of rows written for each version. Fails before writing
/// anything when two versions sanitize to the same file name.
pub fn split_by_version(store: &Path, out_dir: &Path) -> Result<BTreeMap<String, usize>> {
    let mut reader = Reader::from_path(store)
        .with_context(|| format!("open feedback store {}", store.display()))?;

    let mut by_version: BTreeMap<String, Vec<FeedbackRecord>> = BTreeMap::new();
    for row in reader.deserialize() {
        let record: FeedbackRecord =
            row.with_context(|| format!("read feedback row from {}", store.display()))?;
        by_version
            .entry(record.version.clone())
            .or_default()
            .push(record);
    }

    let mut targets: BTreeMap<PathBuf, &str> = BTreeMap::new();
    for version in by_version.keys() {
        let path = split_path(out_dir, version);
        if let Some(other) = targets.insert(path.clone(), version) {
            bail!(
                "versions {other:?} and {version:?} both map to {}",
                path.display()
            );
        }
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    let mut counts = BTreeMap::new();
    for (version, records) in by_version {
        let path = split_path(out_dir, &version);
        let mut writer = csv_writer(&path)?;
        for record in &records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        info!(%version, rows = records.len(), path = %path.display(), "split written");
        counts.insert(version, records.len());
    }
    Ok(counts)
}

/// Copy a uniform random sample of `n` data rows (all rows if fewer) with the header.
pub fn sample_rows<R: Rng + ?Sized>(
    input: &Path,
    output: &Path,
    n: usize,
    rng: &mut R,
) -> Result<usize> {
    let mut reader =
        Reader::from_path(input).with_context(|| format!("open {}", input.display()))?;
    let headers = reader.headers()?.clone();
    let records: Vec<StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .with_context(|| format!("read rows from {}", input.display()))?;

    let sample = records.into_iter().choose_multiple(rng, n);

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv_writer(output)?;
    writer.write_record(&headers)?;
    for record in &sample {
        writer.write_record(record)?;
    }
    writer.flush()?;

    info!(rows = sample.len(), path = %output.display(), "sample written");
    Ok(sample.len())
}

fn csv_writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))
}

fn split_path(out_dir: &Path, version: &str) -> PathBuf {
    let safe: String = version
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    out_dir.join(format!("prod_data_{safe}.csv"))
}
