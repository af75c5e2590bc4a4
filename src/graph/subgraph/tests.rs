//! Tests for induced-subgraph extraction.

use crate::graph::model::GraphModel;

fn sorted_named_edges(g: &GraphModel) -> Vec<(String, String)> {
    let mut edges: Vec<_> = g
        .edge_pairs()
        .map(|(a, b)| (a.to_owned(), b.to_owned()))
        .collect();
    edges.sort();
    edges
}

// 0 - 1 - 2 - 3, plus 0 - 2
fn sample() -> GraphModel {
    GraphModel::from_adjacency(vec![vec![1, 2], vec![0, 2], vec![1, 3, 0], vec![2]])
}

#[test]
fn keeps_only_edges_between_requested_nodes() {
    let g = sample();
    let sub = g.induced_subgraph(&[0, 1, 2]);

    assert_eq!(sub.node_count(), 3);
    assert_eq!(sub.edge_count(), 3);
    assert!(sub.check_symmetric().is_ok());
    assert!(sub.find("3").is_none());
}

#[test]
fn assigns_ids_in_discovery_order() {
    let g = sample();
    // Requested 2 first: it gets id 0, then its kept neighbours 1 and 0 in scan order.
    let sub = g.induced_subgraph(&[2, 0, 1]);

    assert_eq!(sub.name(0), "2");
    assert_eq!(sub.name(1), "1");
    assert_eq!(sub.name(2), "0");
    assert_eq!(sub.neighbors(0), &[1, 2]);
}

#[test]
fn extracting_every_node_reproduces_the_edge_set() {
    let g = sample();
    let all: Vec<_> = (0..g.node_count()).rev().collect();
    let sub = g.induced_subgraph(&all);

    assert_eq!(sub.node_count(), g.node_count());
    assert_eq!(sub.edge_count(), g.edge_count());
    assert_eq!(sorted_named_edges(&sub), sorted_named_edges(&g));
}

#[test]
fn repeated_requests_do_not_duplicate_edges() {
    let g = sample();
    let sub = g.induced_subgraph(&[0, 1, 0, 1]);

    assert_eq!(sub.node_count(), 2);
    assert_eq!(sub.adjacency_len(), 2);
}

#[test]
fn neighbour_discovered_first_is_still_scanned_once() {
    // Parallel 0 - 1 links and a self-loop on 1.
    let g = GraphModel::from_adjacency(vec![vec![1, 1], vec![0, 1, 0]]);
    let sub = g.induced_subgraph(&[0, 1, 1, 0]);

    assert_eq!(sub.name(0), "0");
    assert_eq!(sub.name(1), "1");
    assert_eq!(sub.neighbors(0), &[1, 1]);
    assert_eq!(sub.neighbors(1), &[0, 1, 0]);
    assert_eq!(sub.adjacency_len(), g.adjacency_len());
}

#[test]
fn empty_request_gives_empty_graph() {
    let sub = sample().induced_subgraph(&[]);
    assert!(sub.is_empty());
    assert_eq!(sub.edge_count(), 0);
}

#[test]
fn isolated_requested_node_survives() {
    let g = sample();
    let sub = g.induced_subgraph(&[3, 0]);
    assert_eq!(sub.node_count(), 2);
    assert_eq!(sub.edge_count(), 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn rejects_unknown_ids() {
    let _ = sample().induced_subgraph(&[7]);
}
