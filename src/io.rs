//! Line-oriented edge-list reading and writing.
//!
//! One directed adjacency entry per line, `"<from> <to>"`. Undirected inputs
//! list both directions.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{GraphBuilder, GraphModel};

/// Reads an edge list. Blank lines are skipped.
///
/// # Errors
/// [`Error::MalformedLine`] for a line without exactly two whitespace
/// separated tokens, [`Error::Io`] on read failure.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<GraphModel> {
    let mut builder = GraphBuilder::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (None, _, _) => {}
            (Some(from), Some(to), None) => builder.add_pair(from, to),
            _ => {
                return Err(Error::MalformedLine {
                    line: index + 1,
                    tokens: line.split_whitespace().count(),
                })
            }
        }
    }
    Ok(builder.build())
}

/// Reads an edge-list file.
///
/// # Errors
/// As [`read_edge_list`], with I/O errors tagged by `path`.
pub fn load_edge_file(path: impl AsRef<Path>) -> Result<GraphModel> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
    let graph = read_edge_list(BufReader::new(file)).map_err(|e| match e {
        Error::Io(source) => Error::io_at(path, source),
        other => other,
    })?;
    debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded edge list"
    );
    Ok(graph)
}

/// Writes one `"<from> <to>"` line per directed adjacency entry.
///
/// # Errors
/// [`Error::Io`] on write failure.
pub fn write_edge_list<W: Write>(graph: &GraphModel, mut writer: W) -> Result<()> {
    for (from, to) in graph.edge_pairs() {
        writeln!(writer, "{from} {to}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes an edge-list file, replacing any previous content.
///
/// # Errors
/// I/O errors tagged by `path`.
pub fn export_edge_file(graph: &GraphModel, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io_at(path, e))?;
    write_edge_list(graph, BufWriter::new(file)).map_err(|e| match e {
        Error::Io(source) => Error::io_at(path, source),
        other => other,
    })
}
