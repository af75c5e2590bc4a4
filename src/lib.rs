//! # `densest` - Densest-Subgraph Approximation by Peeling
//!
//! Computes, in \(O(n + m)\) time, a subgraph whose edge density
//! `edges / nodes` is at least half the maximum over all subgraphs of an
//! undirected graph (Charikar's greedy peeling).
//!
//! ## Architecture
//!
//! 1. **Graph model** ([`GraphModel`]):
//!    - nodes with dense ids, names, and adjacency lists
//!    - node and edge counts cached on first use
//!    - every undirected edge stored in both directions
//!
//! 2. **Degree buckets** ([`peeling::DegreeBuckets`]):
//!    - private working copy of the adjacency
//!    - swap-and-pop lists with reverse positions for \(O(1)\) unlinking
//!    - nodes grouped by current degree behind a monotone minimum cursor
//!
//! 3. **Peeling** ([`peeling::peel`], [`approx_densest_subgraph`]):
//!    - repeatedly removes a minimum-degree node
//!    - tracks the densest surviving set exactly
//!    - extracts it as an induced subgraph ([`GraphModel::induced_subgraph`])
//!
//! Around the core, [`io`] reads and writes edge lists, [`convert`] turns raw
//! datasets into symmetric inputs, and [`batch`] runs and times whole data
//! directories.
//!
//! ## Example
//!
//! ```rust
//! use densest::{approx_densest_subgraph, GraphModel};
//!
//! // A triangle with a pendant node hanging off `a`.
//! let g = GraphModel::from_pairs([
//!     ("a", "b"), ("b", "a"),
//!     ("b", "c"), ("c", "b"),
//!     ("a", "c"), ("c", "a"),
//!     ("d", "a"), ("a", "d"),
//! ]);
//!
//! let h = approx_densest_subgraph(&g);
//! assert_eq!(h.node_count(), 3);
//! assert_eq!(h.edge_count(), 3);
//! assert!(h.find("d").is_none());
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod batch;
pub mod convert;
pub mod error;
pub mod graph;
pub mod io;
pub mod peeling;

pub use error::{Error, Result};
pub use graph::{GraphBuilder, GraphModel, Node, NodeId};
pub use peeling::{approx_densest_subgraph, peel, Density, Peeling};

// Density comparisons multiply two counts in `u128`; that is exact only while
// a count fits in 64 bits.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<usize>() <= mem::size_of::<u64>());
    assert!(mem::size_of::<NodeId>() == mem::size_of::<usize>());
};
