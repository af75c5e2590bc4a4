//! Batch driver configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Directory layout and run options for [`run_all`](super::run_all).
///
/// Loadable from JSON; every field is optional there and falls back to
/// [`BatchConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Root of the data tree.
    pub data_dir: PathBuf,
    /// Input edge lists, relative to `data_dir`.
    pub inputs: PathBuf,
    /// Densest-subgraph outputs, relative to `data_dir`.
    pub outputs: PathBuf,
    /// Per-dataset `.time` files, relative to `data_dir`.
    pub times: PathBuf,
    /// Size registry file, relative to `data_dir`.
    pub sizes: PathBuf,
    /// Extension of input and output edge lists, without the dot.
    pub extension: String,
    /// Datasets never run, by name without extension.
    pub skip: Vec<String>,
    /// Shuffle seed. Unset means a fresh random order on every batch.
    pub seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            inputs: PathBuf::from("inputs"),
            outputs: PathBuf::from("outputs"),
            times: PathBuf::from("times"),
            sizes: PathBuf::from("graph_sizes.json"),
            extension: "edges".to_owned(),
            skip: vec!["com-friendster.ungraph".to_owned()],
            seed: None,
        }
    }
}

impl BatchConfig {
    /// Default layout rooted at `data_dir`.
    pub fn rooted_at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Reads a JSON config file and validates it.
    ///
    /// # Errors
    /// I/O, JSON, or [`Error::Config`] from [`BatchConfig::validate`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects layouts the driver cannot use.
    ///
    /// # Errors
    /// [`Error::Config`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(Error::Config(format!(
                "extension must be non-empty and dot-free, got {:?}",
                self.extension
            )));
        }
        if self.inputs == self.outputs {
            return Err(Error::Config(
                "inputs and outputs must be different directories".to_owned(),
            ));
        }
        Ok(())
    }

    /// Directory holding the inputs.
    pub fn input_dir(&self) -> PathBuf {
        self.data_dir.join(&self.inputs)
    }

    /// Directory receiving the outputs.
    pub fn output_dir(&self) -> PathBuf {
        self.data_dir.join(&self.outputs)
    }

    /// Directory receiving the timing files.
    pub fn times_dir(&self) -> PathBuf {
        self.data_dir.join(&self.times)
    }

    /// Path of the size registry.
    pub fn sizes_path(&self) -> PathBuf {
        self.data_dir.join(&self.sizes)
    }

    /// Input edge list of a dataset.
    pub fn input_path(&self, name: &str) -> PathBuf {
        self.input_dir().join(format!("{name}.{}", self.extension))
    }

    /// Output edge list of a dataset.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir().join(format!("{name}.{}", self.extension))
    }

    /// Timing file of a dataset.
    pub fn time_path(&self, name: &str) -> PathBuf {
        self.times_dir().join(format!("{name}.time"))
    }

    /// Returns `true` if the dataset is on the deny-list.
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.iter().any(|s| s == name)
    }
}
