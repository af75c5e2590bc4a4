//! Tests for the peeling structure and the approximation loop.

use super::*;

fn undirected(n: usize, edges: &[(usize, usize)]) -> GraphModel {
    let mut adjacency = vec![Vec::new(); n];
    for &(u, v) in edges {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }
    GraphModel::from_adjacency(adjacency)
}

fn clique(n: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in u + 1..n {
            edges.push((u, v));
        }
    }
    edges
}

#[test]
fn buckets_start_with_working_degrees() {
    // Path 0 - 1 - 2 plus a self-loop on 2 that must be ignored.
    let g = GraphModel::from_adjacency(vec![vec![1], vec![0, 2], vec![1, 2]]);
    let buckets = DegreeBuckets::from_graph(&g);

    assert_eq!(buckets.remaining_nodes(), 3);
    assert_eq!(buckets.remaining_edges(), 2);
    assert_eq!(buckets.degree(0), 1);
    assert_eq!(buckets.degree(1), 2);
    assert_eq!(buckets.degree(2), 1);
    assert_eq!(buckets.min_degree(), 1);
    buckets.assert_consistent();
}

#[test]
fn pop_min_always_takes_a_minimum_degree_node() {
    let mut edges = clique(5);
    edges.extend([(0, 5), (5, 6), (6, 7)]);
    let g = undirected(8, &edges);
    let mut buckets = DegreeBuckets::from_graph(&g);

    while buckets.remaining_nodes() > 0 {
        let min = buckets.min_degree();
        let u = buckets.pop_min().expect("nodes remain");
        assert_eq!(buckets.degree(u), 0);
        buckets.assert_consistent();
        assert!(min <= 4, "no node is popped above degree 4");
    }
    assert_eq!(buckets.remaining_edges(), 0);
    assert_eq!(buckets.pop_min(), None);
}

#[test]
fn pop_min_handles_parallel_links() {
    // Two parallel 0 - 1 links and a 1 - 2 link.
    let g = GraphModel::from_adjacency(vec![vec![1, 1], vec![0, 0, 2], vec![1]]);
    let mut buckets = DegreeBuckets::from_graph(&g);
    assert_eq!(buckets.remaining_edges(), 3);

    let mut seen = Vec::new();
    while let Some(u) = buckets.pop_min() {
        buckets.assert_consistent();
        seen.push(u);
    }
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(buckets.remaining_edges(), 0);
}

#[test]
fn doubled_pair_peels_completely() {
    let g = GraphModel::from_pairs([("a", "b"), ("a", "b"), ("b", "a"), ("b", "a")]);
    let peeling = peel(&g);

    let mut order = peeling.removal_order().to_vec();
    order.sort_unstable();
    assert_eq!(order, vec![0, 1]);
    assert_eq!(peeling.best(), Density::new(2, 2));
    assert_eq!(peeling.survivors().len(), 2);
}

#[test]
fn cursor_follows_a_neighbour_dropped_several_degrees() {
    // Three parallel 0 - 1 links; removing 1 takes node 0 from degree 3 to 0.
    let g = undirected(4, &[(0, 1), (0, 1), (0, 1), (1, 2), (1, 3), (2, 3)]);
    let mut buckets = DegreeBuckets::from_graph(&g);

    let mut minima = Vec::new();
    let mut order = Vec::new();
    while buckets.remaining_nodes() > 0 {
        minima.push(buckets.min_degree());
        order.push(buckets.pop_min().expect("nodes remain"));
        buckets.assert_consistent();
    }
    assert_eq!(minima, vec![2, 1, 3, 0]);
    assert_eq!(order, vec![3, 2, 1, 0]);
}

#[test]
fn removal_order_is_a_permutation() {
    let mut edges = clique(4);
    edges.extend([(3, 4), (4, 5), (5, 6), (2, 6)]);
    let g = undirected(7, &edges);
    let peeling = peel(&g);

    let mut order = peeling.removal_order().to_vec();
    order.sort_unstable();
    assert_eq!(order, (0..7).collect::<Vec<_>>());
    assert_eq!(peeling.survivors().len(), 7 - peeling.best_cut());
}

#[test]
fn best_density_never_decreases() {
    let mut edges = clique(6);
    edges.extend([(0, 6), (6, 7), (7, 8), (8, 9), (9, 6)]);
    let g = undirected(10, &edges);

    let mut previous = Density::new(g.edge_count(), g.node_count());
    let peeling = peel_with(&g, |step| {
        assert!(step.best.at_least(previous));
        previous = step.best;
    });
    assert_eq!(peeling.best(), Density::new(15, 6));
}

#[test]
fn observer_sees_every_removal() {
    let g = undirected(4, &[(0, 1), (1, 2), (2, 3)]);
    let mut steps = Vec::new();
    let peeling = peel_with(&g, |step| steps.push(*step));

    assert_eq!(steps.len(), 4);
    assert_eq!(
        steps.iter().map(|s| s.removed).collect::<Vec<_>>(),
        peeling.removal_order()
    );
    assert_eq!(steps.last().map(|s| s.remaining_nodes), Some(0));
    assert!(steps.iter().all(|s| s.degree <= 1));
}

#[test]
fn triangle_is_its_own_densest_subgraph() {
    let g = undirected(3, &clique(3));
    let peeling = peel(&g);

    assert_eq!(peeling.best_cut(), 0);
    assert_eq!(peeling.best(), Density::new(3, 3));
    assert!((peeling.best_density() - 1.0).abs() < 1e-12);
}

#[test]
fn ties_prefer_the_smaller_surviving_set() {
    // Triangle plus a pendant node: 4 / 4 overall, 3 / 3 after the pendant goes.
    let g = undirected(4, &[(0, 1), (1, 2), (0, 2), (3, 0)]);
    let peeling = peel(&g);

    assert_eq!(peeling.removal_order()[0], 3);
    assert_eq!(peeling.best_cut(), 1);
    let mut survivors = peeling.survivors().to_vec();
    survivors.sort_unstable();
    assert_eq!(survivors, vec![0, 1, 2]);
}

#[test]
fn edgeless_graph_keeps_everything() {
    let g = undirected(3, &[]);
    let peeling = peel(&g);
    assert_eq!(peeling.best_cut(), 0);
    assert_eq!(peeling.best(), Density::new(0, 3));

    let sub = approx_densest_subgraph(&g);
    assert_eq!(sub.node_count(), 3);
    assert_eq!(sub.edge_count(), 0);
}

#[test]
fn single_node_does_not_divide_by_zero() {
    let g = undirected(1, &[]);
    let sub = g.approx_densest_subgraph();
    assert_eq!(sub.node_count(), 1);
    assert_eq!(peel(&g).best_density(), 0.0);
}

#[test]
fn empty_graph_peels_to_empty_graph() {
    let g = GraphModel::new();
    let peeling = peel(&g);
    assert!(peeling.removal_order().is_empty());
    assert!(peeling.survivors().is_empty());
    assert!(approx_densest_subgraph(&g).is_empty());
}

#[test]
fn dense_core_is_recovered_from_a_sparse_tail() {
    let mut edges = clique(5);
    for u in 5..20 {
        edges.push((u - 1, u));
    }
    let g = undirected(20, &edges);
    let sub = approx_densest_subgraph(&g);

    assert_eq!(sub.node_count(), 5);
    assert_eq!(sub.edge_count(), 10);
    assert!(sub.check_symmetric().is_ok());
}

#[test]
fn density_comparison_is_exact() {
    assert!(Density::new(2, 3).at_least(Density::new(4, 6)));
    assert!(Density::new(4, 6).at_least(Density::new(2, 3)));
    assert!(!Density::new(3, 5).at_least(Density::new(2, 3)));
    assert!(Density::new(usize::MAX, 1).at_least(Density::new(usize::MAX - 1, 1)));
}

mod multigraph {
    use super::*;
    use proptest::prelude::*;

    fn arb_links() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (2usize..=9).prop_flat_map(|n| {
            let links = proptest::collection::vec((0..n, 0..n), 0..5 * n)
                .prop_map(|pairs| pairs.into_iter().filter(|&(a, b)| a != b).collect::<Vec<_>>());
            (Just(n), links)
        })
    }

    proptest! {
        #[test]
        fn buckets_stay_consistent_under_repeated_links((n, links) in arb_links()) {
            let g = undirected(n, &links);
            let mut buckets = DegreeBuckets::from_graph(&g);
            prop_assert_eq!(buckets.remaining_edges(), links.len());
            buckets.assert_consistent();

            let mut popped = 0;
            while let Some(u) = buckets.pop_min() {
                prop_assert_eq!(buckets.degree(u), 0);
                buckets.assert_consistent();
                popped += 1;
            }
            prop_assert_eq!(popped, n);
            prop_assert_eq!(buckets.remaining_edges(), 0);
        }
    }
}
