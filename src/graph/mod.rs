//! Graph representation and induced-subgraph extraction.
//!
//! - `model`: named adjacency-list graph with cached counts
//! - `subgraph`: induced subgraph over a node subset, densely reindexed

pub mod model;
pub mod subgraph;

pub use model::{GraphBuilder, GraphModel, Node, NodeId};
