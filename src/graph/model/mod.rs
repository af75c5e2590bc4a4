//! Named undirected graph stored as per-node adjacency lists.
//!
//! Nodes carry a dense id in `[0, n)` and a display name. Ids are the only key
//! used on hot paths; names are looked up once, when pairs are loaded.
//!
//! Every undirected edge `{u, v}` is expected to appear twice, as `v` in the
//! list of `u` and `u` in the list of `v`. [`GraphModel::edge_count`] halves
//! the adjacency total under that assumption and the peeling code relies on it
//! to see each edge exactly once. The model does not enforce it;
//! [`GraphModel::check_symmetric`] is available as an explicit check.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Dense node identifier.
pub type NodeId = usize;

/// A node: its id, its name, and the ids of its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    name: String,
    neighbors: Vec<NodeId>,
}

impl Node {
    /// Creates a node with no neighbours.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self::with_neighbors(id, name, Vec::new())
    }

    /// Creates a node with a pre-populated adjacency list.
    pub fn with_neighbors(id: NodeId, name: impl Into<String>, neighbors: Vec<NodeId>) -> Self {
        Self {
            id,
            name: name.into(),
            neighbors,
        }
    }

    /// Returns the node id.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the adjacency list in insertion order.
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Returns the number of adjacency entries.
    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub(crate) fn push_neighbor(&mut self, neighbor: NodeId) {
        self.neighbors.push(neighbor);
    }
}

/// An immutable-after-load graph with cached node and edge counts.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_pairs` | \(O(p)\) expected | One hash lookup per name |
/// | `node_count` | \(O(1)\) | Cached on first call |
/// | `edge_count` | \(O(n)\) first call, \(O(1)\) after | Half the adjacency total |
/// | `neighbors` / `degree` | \(O(1)\) | Slice of the adjacency list |
/// | `check_symmetric` | \(O(n + m)\) expected | Opt-in validation |
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    node_count: OnceLock<usize>,
    edge_count: OnceLock<usize>,
}

impl GraphModel {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from nodes whose adjacency is already populated.
    ///
    /// Symmetry of the adjacency is not checked.
    ///
    /// # Panics
    /// Panics if a node's id differs from its position or if a neighbour id is
    /// out of bounds.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let n = nodes.len();
        for (position, node) in nodes.iter().enumerate() {
            assert!(
                node.id == position,
                "node {} stored at position {position}",
                node.id
            );
            for &v in &node.neighbors {
                assert!(v < n, "edge {position}->{v} out of bounds for n={n}");
            }
        }
        Self {
            nodes,
            node_count: OnceLock::new(),
            edge_count: OnceLock::new(),
        }
    }

    /// Creates a graph from raw adjacency lists, naming each node by its id.
    ///
    /// # Panics
    /// Panics if any neighbour index is out of bounds.
    pub fn from_adjacency(adjacency: Vec<Vec<NodeId>>) -> Self {
        let nodes = adjacency
            .into_iter()
            .enumerate()
            .map(|(id, neighbors)| Node::with_neighbors(id, id.to_string(), neighbors))
            .collect();
        Self::from_nodes(nodes)
    }

    /// Builds a graph from `(from, to)` name pairs.
    ///
    /// Ids are assigned on first sight of a name and each pair is stored as the
    /// single directed entry `from -> to`. Callers supply both directions of an
    /// undirected edge.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (from, to) in pairs {
            builder.add_pair(from.as_ref(), to.as_ref());
        }
        builder.build()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        *self.node_count.get_or_init(|| self.nodes.len())
    }

    /// Number of undirected edges, i.e. half the total adjacency length.
    pub fn edge_count(&self) -> usize {
        *self
            .edge_count
            .get_or_init(|| self.adjacency_len() / 2)
    }

    /// Sum of all adjacency-list lengths. Even for symmetric input.
    pub fn adjacency_len(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum()
    }

    /// Returns `true` if the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edge density, `edges / nodes`.
    ///
    /// This is the quantity the peeling loop maximises. NaN for an empty graph.
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> f64 {
        self.edge_count() as f64 / self.node_count() as f64
    }

    /// The reciprocal ratio `nodes / edges`.
    ///
    /// Infinite for an edgeless graph with nodes and NaN for an empty one.
    #[allow(clippy::cast_precision_loss)]
    pub fn node_edge_ratio(&self) -> f64 {
        self.node_count() as f64 / self.edge_count() as f64
    }

    /// All nodes in id order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        assert!(id < self.nodes.len(), "node {id} out of bounds");
        &self.nodes[id]
    }

    /// Name of a node.
    #[inline]
    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).name()
    }

    /// Neighbours of a node.
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).neighbors()
    }

    /// Degree of a node, counted as adjacency entries.
    #[inline]
    pub fn degree(&self, id: NodeId) -> usize {
        self.node(id).degree()
    }

    /// Finds a node id by name with a linear scan.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|node| node.name == name)
    }

    /// Yields one `(from, to)` name pair per directed adjacency entry, in id
    /// order and then adjacency order.
    pub fn edge_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.nodes.iter().flat_map(move |u| {
            u.neighbors
                .iter()
                .map(move |&v| (u.name.as_str(), self.nodes[v].name.as_str()))
        })
    }

    /// Verifies that every adjacency entry has a matching reverse entry, with
    /// multiplicity. Self-loops are ignored.
    ///
    /// # Errors
    /// Returns [`Error::Asymmetric`] naming the first unmatched entry found in
    /// id order.
    pub fn check_symmetric(&self) -> Result<()> {
        let mut balance: HashMap<(NodeId, NodeId), isize> = HashMap::new();
        for u in &self.nodes {
            for &v in &u.neighbors {
                match u.id.cmp(&v) {
                    std::cmp::Ordering::Less => *balance.entry((u.id, v)).or_insert(0) += 1,
                    std::cmp::Ordering::Greater => *balance.entry((v, u.id)).or_insert(0) -= 1,
                    std::cmp::Ordering::Equal => {}
                }
            }
        }

        for u in &self.nodes {
            for &v in &u.neighbors {
                let (key, surplus) = match u.id.cmp(&v) {
                    std::cmp::Ordering::Less => ((u.id, v), 1),
                    std::cmp::Ordering::Greater => ((v, u.id), -1),
                    std::cmp::Ordering::Equal => continue,
                };
                let b = balance.get(&key).copied().unwrap_or(0);
                if b.signum() == surplus {
                    return Err(Error::Asymmetric {
                        from: u.name.clone(),
                        to: self.nodes[v].name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Incremental name-keyed construction of a [`GraphModel`].
///
/// Used by [`GraphModel::from_pairs`] and by the edge-list reader, which
/// feeds it one parsed line at a time.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    ids: HashMap<String, NodeId>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, creating the node on first sight.
    pub fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.nodes.len();
        self.ids.insert(name.to_owned(), id);
        self.nodes.push(Node::new(id, name));
        id
    }

    /// Records the directed adjacency entry `from -> to`.
    pub fn add_pair(&mut self, from: &str, to: &str) {
        let u = self.intern(from);
        let v = self.intern(to);
        self.nodes[u].push_neighbor(v);
    }

    /// Number of distinct names seen so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Finishes construction.
    pub fn build(self) -> GraphModel {
        GraphModel {
            nodes: self.nodes,
            node_count: OnceLock::new(),
            edge_count: OnceLock::new(),
        }
    }
}
