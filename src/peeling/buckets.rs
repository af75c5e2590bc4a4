//! Degree buckets over a private working copy of the adjacency.
//!
//! Every list here is unordered and shrinks by swap-and-pop:
//! - `adjacency[u]` holds the surviving neighbours of `u`
//! - `back[u][p]` is the position of `u` inside `adjacency[adjacency[u][p]]`
//! - `buckets[d]` holds the surviving nodes of current degree `d`
//! - `slot[u]` is the position of `u` inside `buckets[degree[u]]`
//!
//! Removing a node touches each of its links once and each neighbour's bucket
//! entry once, so a full peel costs \(O(n + m)\).

use crate::graph::{GraphModel, NodeId};

/// Mutable peeling state, consumed by repeated [`DegreeBuckets::pop_min`].
#[derive(Debug, Clone)]
pub struct DegreeBuckets {
    adjacency: Vec<Vec<NodeId>>,
    back: Vec<Vec<usize>>,
    degree: Vec<usize>,
    buckets: Vec<Vec<NodeId>>,
    slot: Vec<usize>,
    min_degree: usize,
    remaining_nodes: usize,
    remaining_edges: usize,
}

impl DegreeBuckets {
    /// Builds the working copy from a snapshot of `graph`.
    ///
    /// Only entries `i -> j` with `i < j` are inserted, each as one undirected
    /// link, so symmetric input contributes every edge exactly once and
    /// self-loops are dropped. Starting degrees are the working-list lengths.
    pub fn from_graph(graph: &GraphModel) -> Self {
        let n = graph.node_count();
        let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut back: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut remaining_edges = 0usize;

        for i in 0..n {
            for &j in graph.neighbors(i) {
                if i < j {
                    let pi = adjacency[i].len();
                    let pj = adjacency[j].len();
                    adjacency[i].push(j);
                    back[i].push(pj);
                    adjacency[j].push(i);
                    back[j].push(pi);
                    remaining_edges += 1;
                }
            }
        }

        let degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();
        let max_degree = degree.iter().copied().max().unwrap_or(0);

        let mut buckets: Vec<Vec<NodeId>> = vec![Vec::new(); max_degree + 1];
        let mut slot = vec![0usize; n];
        for (u, &d) in degree.iter().enumerate() {
            slot[u] = buckets[d].len();
            buckets[d].push(u);
        }
        let min_degree = degree.iter().copied().min().unwrap_or(0);

        Self {
            adjacency,
            back,
            degree,
            buckets,
            slot,
            min_degree,
            remaining_nodes: n,
            remaining_edges,
        }
    }

    /// Number of nodes not yet removed.
    #[inline]
    pub fn remaining_nodes(&self) -> usize {
        self.remaining_nodes
    }

    /// Number of links between surviving nodes.
    #[inline]
    pub fn remaining_edges(&self) -> usize {
        self.remaining_edges
    }

    /// Smallest degree among surviving nodes. Meaningless once empty.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Current degree of a surviving node.
    #[inline]
    pub fn degree(&self, u: NodeId) -> usize {
        self.degree[u]
    }

    /// Removes and returns a node of minimum current degree, detaching all of
    /// its links. Ties go to the node most recently placed in the bucket.
    ///
    /// Returns `None` once every node has been removed.
    pub fn pop_min(&mut self) -> Option<NodeId> {
        if self.remaining_nodes == 0 {
            return None;
        }
        let u = self.buckets[self.min_degree].pop()?;
        self.remaining_nodes -= 1;

        // `unlink` may relocate entries of `u`'s own lists when `u` is linked
        // to the same neighbour more than once, so walk them by index.
        for p in 0..self.adjacency[u].len() {
            let v = self.adjacency[u][p];
            let q = self.back[u][p];
            self.unlink(v, q);
            self.remaining_edges -= 1;
            self.demote(v);
        }
        self.adjacency[u].clear();
        self.back[u].clear();
        self.degree[u] = 0;

        // `demote` already lowered the cursor to any neighbour it moved below
        // the old minimum, so the first non-empty bucket is at or above it.
        while self.remaining_nodes > 0 && self.buckets[self.min_degree].is_empty() {
            self.min_degree += 1;
        }
        Some(u)
    }

    /// Swap-removes entry `q` from `adjacency[v]`, fixing the back pointer of
    /// the entry moved into its place.
    #[inline]
    fn unlink(&mut self, v: NodeId, q: usize) {
        self.adjacency[v].swap_remove(q);
        self.back[v].swap_remove(q);
        if q < self.adjacency[v].len() {
            let moved = self.adjacency[v][q];
            let moved_pos = self.back[v][q];
            self.back[moved][moved_pos] = q;
        }
    }

    /// Moves `v` from `buckets[d]` to `buckets[d - 1]`.
    #[inline]
    fn demote(&mut self, v: NodeId) {
        let d = self.degree[v];
        debug_assert!(d > 0, "demoting node {v} of degree 0");
        let s = self.slot[v];
        let bucket = &mut self.buckets[d];
        bucket.swap_remove(s);
        if let Some(&moved) = bucket.get(s) {
            self.slot[moved] = s;
        }

        self.degree[v] = d - 1;
        self.slot[v] = self.buckets[d - 1].len();
        self.buckets[d - 1].push(v);
        // Parallel links can demote the same neighbour several times in one
        // removal.
        self.min_degree = self.min_degree.min(d - 1);
    }

    /// Checks the bucket and back-pointer invariants. Debug helper for tests.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut present = 0usize;
        for (d, bucket) in self.buckets.iter().enumerate() {
            for (s, &u) in bucket.iter().enumerate() {
                assert_eq!(self.degree[u], d, "node {u} in wrong bucket");
                assert_eq!(self.slot[u], s, "stale slot for node {u}");
                assert_eq!(self.adjacency[u].len(), d, "degree drift on node {u}");
                present += 1;
            }
        }
        assert_eq!(present, self.remaining_nodes);

        let mut links = 0usize;
        for (u, nbrs) in self.adjacency.iter().enumerate() {
            for (p, &v) in nbrs.iter().enumerate() {
                assert_eq!(self.adjacency[v][self.back[u][p]], u, "broken back pointer {u}->{v}");
                links += 1;
            }
        }
        assert_eq!(links, 2 * self.remaining_edges);
        if self.remaining_nodes > 0 {
            assert!(!self.buckets[self.min_degree].is_empty());
            assert!(self.buckets[..self.min_degree].iter().all(Vec::is_empty));
        }
    }
}
