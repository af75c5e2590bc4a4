//! Running-time statistics over accumulated `.time` files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{list_stems, BatchConfig};
use crate::convert::{GraphSize, SizeRegistry};
use crate::error::{Error, Result};
use crate::io::load_edge_file;

/// Timing statistics of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetTiming {
    /// Dataset name.
    pub name: String,
    /// Input size.
    pub size: GraphSize,
    /// Number of samples.
    pub samples: usize,
    /// Mean running time in nanoseconds.
    pub mean_nanos: f64,
    /// Half the population standard deviation, in nanoseconds.
    pub half_std_nanos: f64,
}

/// Least-squares line `time = slope * (n + m) + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Nanoseconds per unit of `n + m`.
    pub slope: f64,
    /// Nanoseconds at size zero.
    pub intercept: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
}

impl LinearFit {
    /// Fits `(x, y)` points. `None` with fewer than two points or when every
    /// `x` is equal.
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let count = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / count;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / count;

        let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
        if sxx == 0.0 {
            return None;
        }
        let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();
        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let ss_tot: f64 = points.iter().map(|p| (p.1 - mean_y).powi(2)).sum();
        let ss_res: f64 = points
            .iter()
            .map(|p| (p.1 - (slope * p.0 + intercept)).powi(2))
            .sum();
        let r_squared = if ss_tot == 0.0 { 1.0 } else { 1.0 - ss_res / ss_tot };

        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }
}

/// Per-dataset statistics plus the overall linear fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Datasets with at least one sample, sorted by name.
    pub datasets: Vec<DatasetTiming>,
    /// Fit of mean time against `n + m`, when it exists.
    pub fit: Option<LinearFit>,
}

/// Reads one nanosecond sample per non-blank line.
///
/// # Errors
/// I/O errors, or [`Error::InvalidSample`] for a line that is not a `u64`.
pub fn read_samples(path: &Path) -> Result<Vec<u64>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.trim().parse().map_err(|_| Error::InvalidSample {
                path: path.to_path_buf(),
                line: index + 1,
            })
        })
        .collect()
}

/// Mean and half population standard deviation. `None` for no samples.
#[allow(clippy::cast_precision_loss)]
pub fn mean_and_half_std(samples: &[u64]) -> Option<(f64, f64)> {
    if samples.is_empty() {
        return None;
    }
    let count = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / count;
    let variance = samples
        .iter()
        .map(|&s| (s as f64 - mean).powi(2))
        .sum::<f64>()
        / count;
    Some((mean, variance.sqrt() / 2.0))
}

/// Summarises every `.time` file of the batch layout.
///
/// Sizes come from `registry`; a dataset missing there is measured by loading
/// its input, and the registry is updated with the result.
///
/// # Errors
/// I/O and parse errors from the timing files, and loading errors for
/// datasets whose size has to be measured.
#[allow(clippy::cast_precision_loss)]
pub fn summarize_times(config: &BatchConfig, registry: &mut SizeRegistry) -> Result<TimingSummary> {
    let mut datasets = Vec::new();
    for name in list_stems(&config.times_dir(), "time")? {
        let samples = read_samples(&config.time_path(&name))?;
        let Some((mean_nanos, half_std_nanos)) = mean_and_half_std(&samples) else {
            warn!(dataset = %name, "no timing samples");
            continue;
        };

        let size = match registry.get(&name) {
            Some(size) => size,
            None => {
                let graph = load_edge_file(config.input_path(&name))?;
                let size = GraphSize {
                    nodes: graph.node_count(),
                    edges: graph.edge_count(),
                };
                debug!(dataset = %name, nodes = size.nodes, edges = size.edges, "measured size");
                registry.insert(name.clone(), size);
                size
            }
        };

        datasets.push(DatasetTiming {
            name,
            size,
            samples: samples.len(),
            mean_nanos,
            half_std_nanos,
        });
    }

    let points: Vec<(f64, f64)> = datasets
        .iter()
        .map(|d| (d.size.total() as f64, d.mean_nanos))
        .collect();
    Ok(TimingSummary {
        fit: LinearFit::fit(&points),
        datasets,
    })
}
