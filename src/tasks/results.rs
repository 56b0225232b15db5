//! Benchmark result files: one CSV per (algorithm index, alphabet size) pair.

use crate::config::PlotConfig;
use anyhow::Result;
use csv::{ReaderBuilder, Writer};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BenchmarkRecord {
    pub alphabet_size: usize,
    pub word_length: usize,
    /// Average search time per word, in milliseconds.
    pub average_time: f64,
}

pub fn result_file_name(algorithm_index: usize, alphabet_size: usize) -> String {
    format!("averageTimes-{algorithm_index}-{alphabet_size}.csv")
}

pub fn result_file_path(dir: &Path, algorithm_index: usize, alphabet_size: usize) -> PathBuf {
    dir.join(result_file_name(algorithm_index, alphabet_size))
}

pub fn load_results(
    dir: &Path,
    algorithm_index: usize,
    alphabet_size: usize,
) -> Result<Vec<BenchmarkRecord>> {
    let path = result_file_path(dir, algorithm_index, alphabet_size);
    debug!("file: {}", path.display());

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .map_err(|e| {
            let reason = format!("error opening results (path={}, error={e:?})", path.display());
            error!("{reason}");
            anyhow::anyhow!(reason)
        })?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: BenchmarkRecord = result.map_err(|e| {
            let reason = format!("malformed results (path={}, error={e})", path.display());
            error!("{reason}");
            anyhow::anyhow!(reason)
        })?;
        records.push(record);
    }

    if records.is_empty() {
        let reason = format!("no results in file (path={})", path.display());
        error!("{reason}");
        anyhow::bail!(reason);
    }

    Ok(records)
}

/// Every row set needed for one plot run, keyed by (algorithm index,
/// alphabet size).
#[derive(Debug, Default)]
pub struct ResultSet {
    inner: BTreeMap<(usize, usize), Vec<BenchmarkRecord>>,
}

impl ResultSet {
    pub fn insert(
        &mut self,
        algorithm_index: usize,
        alphabet_size: usize,
        records: Vec<BenchmarkRecord>,
    ) {
        self.inner.insert((algorithm_index, alphabet_size), records);
    }

    pub fn get(&self, algorithm_index: usize, alphabet_size: usize) -> Option<&[BenchmarkRecord]> {
        self.inner
            .get(&(algorithm_index, alphabet_size))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Loads one file per configured (algorithm, alphabet size) pair, stopping at
/// the first failure.
pub fn load_all(config: &PlotConfig) -> Result<ResultSet> {
    let mut results = ResultSet::default();
    for algorithm_index in 1..=config.algorithm_count() {
        for &alphabet_size in &config.alphabet_sizes {
            let records = load_results(&config.input_dir, algorithm_index, alphabet_size)?;
            results.insert(algorithm_index, alphabet_size, records);
        }
    }
    info!(
        "loaded {} result files from {}",
        results.len(),
        config.input_dir.display()
    );

    Ok(results)
}

pub struct ResultWriter {
    path: PathBuf,
    writer: Writer<File>,
}

impl ResultWriter {
    pub fn create(dir: &Path, algorithm_index: usize, alphabet_size: usize) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            let reason = format!("error creating directory (path={}, error={e:?})", dir.display());
            error!("{reason}");
            anyhow::anyhow!(reason)
        })?;

        let path = result_file_path(dir, algorithm_index, alphabet_size);
        let writer = Writer::from_path(&path).map_err(|e| {
            let reason = format!("error creating results (path={}, error={e:?})", path.display());
            error!("{reason}");
            anyhow::anyhow!(reason)
        })?;

        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, record: &BenchmarkRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
