//! Densest-subgraph 2-approximation by greedy minimum-degree peeling.
//!
//! Nodes are removed one at a time, always one of minimum remaining degree,
//! while the edge density `edges / nodes` of the surviving set is tracked. The
//! densest surviving set seen is a 2-approximation of the densest subgraph
//! (Charikar, 2000).
//!
//! # Density
//!
//! Density is `edges / nodes` everywhere in this crate: the whole-graph
//! baseline, every intermediate comparison, and [`GraphModel::density`].
//! Comparisons are exact (integer cross-multiplication). A later surviving set
//! whose density equals the best so far replaces it, so ties resolve to the
//! smaller subgraph.

pub mod buckets;

use tracing::debug;

use crate::graph::{GraphModel, NodeId};

pub use buckets::DegreeBuckets;

/// An exact `edges / nodes` ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    /// Edge count.
    pub edges: usize,
    /// Node count.
    pub nodes: usize,
}

impl Density {
    /// Creates a ratio.
    pub const fn new(edges: usize, nodes: usize) -> Self {
        Self { edges, nodes }
    }

    /// Returns `true` if `self >= other` as rationals.
    ///
    /// Both operands must have `nodes > 0`.
    #[inline]
    pub fn at_least(self, other: Density) -> bool {
        (self.edges as u128) * (other.nodes as u128) >= (other.edges as u128) * (self.nodes as u128)
    }

    /// The ratio as a float; `0.0` when there are no nodes.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.edges as f64 / self.nodes as f64
        }
    }
}

/// State after one removal, passed to the observer of [`peel_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeelStep {
    /// The node just removed.
    pub removed: NodeId,
    /// Degree of that node at removal time.
    pub degree: usize,
    /// Surviving nodes after the removal.
    pub remaining_nodes: usize,
    /// Surviving edges after the removal.
    pub remaining_edges: usize,
    /// Best density recorded so far, including this step.
    pub best: Density,
}

/// Result of a full peel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peeling {
    removal_order: Vec<NodeId>,
    best_cut: usize,
    best: Density,
}

impl Peeling {
    /// Node ids in the order they were removed. A permutation of `0..n`.
    pub fn removal_order(&self) -> &[NodeId] {
        &self.removal_order
    }

    /// How many removed nodes precede the densest surviving set.
    pub fn best_cut(&self) -> usize {
        self.best_cut
    }

    /// Edge and node counts of the densest surviving set.
    pub fn best(&self) -> Density {
        self.best
    }

    /// Density of the densest surviving set.
    pub fn best_density(&self) -> f64 {
        self.best.as_f64()
    }

    /// The densest surviving set: every node removed after the cut.
    pub fn survivors(&self) -> &[NodeId] {
        &self.removal_order[self.best_cut..]
    }
}

/// Peels `graph` to exhaustion and returns the removal order and best cut.
pub fn peel(graph: &GraphModel) -> Peeling {
    peel_with(graph, |_| {})
}

/// Like [`peel`], calling `observe` after every removal.
pub fn peel_with<F>(graph: &GraphModel, mut observe: F) -> Peeling
where
    F: FnMut(&PeelStep),
{
    let n = graph.node_count();
    let mut buckets = DegreeBuckets::from_graph(graph);
    let mut removal_order = Vec::with_capacity(n);
    let mut best = Density::new(buckets.remaining_edges(), n);
    let mut best_cut = 0usize;

    while buckets.remaining_nodes() > 0 {
        let degree = buckets.min_degree();
        let Some(removed) = buckets.pop_min() else {
            break;
        };
        removal_order.push(removed);

        let remaining_nodes = buckets.remaining_nodes();
        let remaining_edges = buckets.remaining_edges();
        if remaining_edges > 0 {
            let current = Density::new(remaining_edges, remaining_nodes);
            if current.at_least(best) {
                best = current;
                best_cut = n - remaining_nodes;
            }
        }

        observe(&PeelStep {
            removed,
            degree,
            remaining_nodes,
            remaining_edges,
            best,
        });
    }

    debug!(
        nodes = n,
        edges = graph.edge_count(),
        cut = best_cut,
        survivors = n - best_cut,
        density = best.as_f64(),
        "peeling finished"
    );

    Peeling {
        removal_order,
        best_cut,
        best,
    }
}

/// Returns the induced subgraph on the densest surviving set found by peeling.
///
/// Its density is at least half the maximum density over all subgraphs of
/// `graph`, provided the adjacency of `graph` is symmetric.
pub fn approx_densest_subgraph(graph: &GraphModel) -> GraphModel {
    let peeling = peel(graph);
    graph.induced_subgraph(peeling.survivors())
}

impl GraphModel {
    /// Method form of [`approx_densest_subgraph`].
    pub fn approx_densest_subgraph(&self) -> GraphModel {
        approx_densest_subgraph(self)
    }
}

#[cfg(test)]
mod tests;
