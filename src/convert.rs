//! Conversion of raw dataset edge lists into symmetric `.edges` inputs.
//!
//! Raw downloads come with header lines, assorted separators, one direction
//! per edge, duplicates and self-loops. The converter keeps the first two
//! fields of each line, deduplicates unordered pairs, drops self-loops and
//! writes every remaining edge in both directions, which is the input contract
//! of the peeling code.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// How raw lines are split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Field separator. `None` splits on runs of whitespace.
    pub separator: Option<char>,
    /// Leading lines to discard (headers, comments).
    pub skip_lines: usize,
}

/// Node and edge counts of a converted dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSize {
    /// Distinct nodes appearing in the written edges.
    pub nodes: usize,
    /// Distinct undirected edges written.
    pub edges: usize,
}

impl GraphSize {
    /// `nodes + edges`, the input size a linear algorithm scales with.
    pub fn total(self) -> usize {
        self.nodes + self.edges
    }
}

/// Converts a raw edge list, writing both directions of every distinct edge.
///
/// Self-loops are not written, but their endpoint still counts towards
/// [`GraphSize::nodes`], even when it has no other edge.
///
/// # Errors
/// [`Error::MalformedLine`] for a kept line with fewer than two fields,
/// [`Error::Io`] on read or write failure.
pub fn convert_edge_list<R, W>(reader: R, mut writer: W, options: &ConvertOptions) -> Result<GraphSize>
where
    R: BufRead,
    W: Write,
{
    let mut ids: HashMap<String, usize> = HashMap::new();
    let mut names: Vec<String> = Vec::new();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut self_loops = 0usize;

    let mut intern = |name: &str| -> usize {
        if let Some(&id) = ids.get(name) {
            return id;
        }
        let id = names.len();
        ids.insert(name.to_owned(), id);
        names.push(name.to_owned());
        id
    };

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for (index, line) in reader.lines().enumerate().skip(options.skip_lines) {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = match options.separator {
            Some(sep) => line.split(sep).map(str::trim).filter(|f| !f.is_empty()).collect(),
            None => line.split_whitespace().collect(),
        };
        if fields.len() < 2 {
            return Err(Error::MalformedLine {
                line: index + 1,
                tokens: fields.len(),
            });
        }

        let u = intern(fields[0]);
        let v = intern(fields[1]);
        if u == v {
            self_loops += 1;
            continue;
        }
        if seen.insert((u.min(v), u.max(v))) {
            edges.push((u, v));
        }
    }

    for &(u, v) in &edges {
        writeln!(writer, "{} {}", names[u], names[v])?;
        writeln!(writer, "{} {}", names[v], names[u])?;
    }
    writer.flush()?;

    if self_loops > 0 {
        debug!(self_loops, "dropped self-loops");
    }
    Ok(GraphSize {
        nodes: names.len(),
        edges: edges.len(),
    })
}

/// Persistent dataset name → [`GraphSize`] map, stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeRegistry {
    sizes: BTreeMap<String, GraphSize>,
}

impl SizeRegistry {
    /// Loads a registry, or returns an empty one if `path` does not exist.
    ///
    /// # Errors
    /// I/O errors other than not-found, and JSON errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::io_at(path, e)),
        }
    }

    /// Writes the registry as pretty JSON, creating parent directories.
    ///
    /// # Errors
    /// I/O and JSON errors.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| Error::io_at(path, e))
    }

    /// Size recorded for a dataset.
    pub fn get(&self, name: &str) -> Option<GraphSize> {
        self.sizes.get(name).copied()
    }

    /// Records or replaces a dataset size.
    pub fn insert(&mut self, name: impl Into<String>, size: GraphSize) {
        self.sizes.insert(name.into(), size);
    }

    /// Number of recorded datasets.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns `true` if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Converts `raw` into `out` and, when given, records the size under `name`
/// in the registry at `sizes`.
///
/// # Errors
/// As [`convert_edge_list`] and [`SizeRegistry`] load/save.
pub fn convert_file(
    raw: impl AsRef<Path>,
    out: impl AsRef<Path>,
    options: &ConvertOptions,
    registry: Option<(&str, &Path)>,
) -> Result<GraphSize> {
    let (raw, out) = (raw.as_ref(), out.as_ref());
    let reader = std::io::BufReader::new(fs::File::open(raw).map_err(|e| Error::io_at(raw, e))?);
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
    }
    let writer = std::io::BufWriter::new(fs::File::create(out).map_err(|e| Error::io_at(out, e))?);
    let size = convert_edge_list(reader, writer, options)?;

    info!(
        raw = %raw.display(),
        out = %out.display(),
        nodes = size.nodes,
        edges = size.edges,
        "converted edge list"
    );

    if let Some((name, sizes_path)) = registry {
        let mut sizes = SizeRegistry::load(sizes_path)?;
        sizes.insert(name, size);
        sizes.save(sizes_path)?;
    }
    Ok(size)
}
