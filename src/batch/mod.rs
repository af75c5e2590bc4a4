//! Batch runs over a data directory.
//!
//! `run_all` lists `inputs/*.<ext>`, shuffles them, and for each dataset
//! loads the graph, times the approximation alone, writes the densest
//! subgraph to `outputs/` and appends the elapsed nanoseconds to
//! `times/<name>.time`. Repeated batches accumulate samples that
//! [`summarize_times`] turns into per-dataset means and a linear fit.

pub mod config;
pub mod timing;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::io::{export_edge_file, load_edge_file};
use crate::peeling::approx_densest_subgraph;

pub use config::BatchConfig;
pub use timing::{summarize_times, DatasetTiming, LinearFit, TimingSummary};

/// Outcome of one dataset run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Dataset name, without extension.
    pub name: String,
    /// Input node count.
    pub nodes: usize,
    /// Input edge count.
    pub edges: usize,
    /// Node count of the densest subgraph found.
    pub subgraph_nodes: usize,
    /// Edge count of the densest subgraph found.
    pub subgraph_edges: usize,
    /// Edge density of the densest subgraph found.
    pub density: f64,
    /// Wall-clock time of the approximation, loading and export excluded.
    pub elapsed_nanos: u64,
}

/// Runs one dataset and appends its timing sample.
///
/// # Errors
/// Loading, export and timing-file errors, tagged with their paths.
pub fn run_file(config: &BatchConfig, name: &str) -> Result<RunRecord> {
    let graph = load_edge_file(config.input_path(name))?;

    let start = Instant::now();
    let densest = approx_densest_subgraph(&graph);
    let elapsed_nanos = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).map_err(|e| Error::io_at(&output_dir, e))?;
    export_edge_file(&densest, config.output_path(name))?;
    append_sample(&config.time_path(name), elapsed_nanos)?;

    let record = RunRecord {
        name: name.to_owned(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        subgraph_nodes: densest.node_count(),
        subgraph_edges: densest.edge_count(),
        density: if densest.is_empty() { 0.0 } else { densest.density() },
        elapsed_nanos,
    };
    info!(
        dataset = name,
        nodes = record.nodes,
        edges = record.edges,
        kept = record.subgraph_nodes,
        density = record.density,
        nanos = record.elapsed_nanos,
        "run finished"
    );
    Ok(record)
}

/// Runs every input dataset once, in shuffled order, skipping the deny-list.
///
/// A dataset that fails is logged and left out of the result; the batch goes
/// on with the next one.
///
/// # Errors
/// Only when the input directory cannot be listed.
pub fn run_all(config: &BatchConfig) -> Result<Vec<RunRecord>> {
    let mut names = list_inputs(config)?;
    match config.seed {
        Some(seed) => names.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => names.shuffle(&mut rand::thread_rng()),
    }

    let mut records = Vec::with_capacity(names.len());
    for name in names {
        if config.is_skipped(&name) {
            info!(dataset = %name, "skipped by configuration");
            continue;
        }
        info!(dataset = %name, "running");
        match run_file(config, &name) {
            Ok(record) => records.push(record),
            Err(e) => warn!(dataset = %name, error = %e, "run failed"),
        }
    }
    Ok(records)
}

/// Dataset names found in the input directory, sorted.
///
/// # Errors
/// I/O errors while listing the directory.
pub fn list_inputs(config: &BatchConfig) -> Result<Vec<String>> {
    list_stems(&config.input_dir(), &config.extension)
}

pub(crate) fn list_stems(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io_at(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io_at(dir, e))?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn append_sample(path: &Path, nanos: u64) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io_at(path, e))?;
    writeln!(file, "{nanos}").map_err(|e| Error::io_at(path, e))
}
