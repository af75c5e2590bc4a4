use densest::peeling::{peel_with, Density};
use densest::{approx_densest_subgraph, peel, GraphModel};
use proptest::prelude::*;

const MAX_NODES: usize = 10;

/// Symmetric graph on `n` nodes from an edge mask over all `u < v` pairs.
fn graph_from_mask(n: usize, mask: &[bool]) -> GraphModel {
    let mut adjacency = vec![Vec::new(); n];
    let mut k = 0;
    for u in 0..n {
        for v in u + 1..n {
            if mask[k] {
                adjacency[u].push(v);
                adjacency[v].push(u);
            }
            k += 1;
        }
    }
    GraphModel::from_adjacency(adjacency)
}

/// Maximum `edges / nodes` over all non-empty node subsets.
fn brute_force_optimum(g: &GraphModel) -> Density {
    let n = g.node_count();
    let mut best = Density::new(0, 1);
    for subset in 1u32..(1 << n) {
        let nodes = subset.count_ones() as usize;
        let mut entries = 0;
        for u in 0..n {
            if subset & (1 << u) == 0 {
                continue;
            }
            entries += g
                .neighbors(u)
                .iter()
                .filter(|&&v| subset & (1 << v) != 0)
                .count();
        }
        let candidate = Density::new(entries / 2, nodes);
        if candidate.at_least(best) {
            best = candidate;
        }
    }
    best
}

fn arb_graph() -> impl Strategy<Value = GraphModel> {
    (0..=MAX_NODES).prop_flat_map(|n| {
        let pairs = n * n.saturating_sub(1) / 2;
        proptest::collection::vec(any::<bool>(), pairs)
            .prop_map(move |mask| graph_from_mask(n, &mask))
    })
}

/// Symmetric multigraph on up to `MAX_NODES` nodes: links may repeat, each
/// stored in both directions.
fn arb_multigraph() -> impl Strategy<Value = GraphModel> {
    (2..=MAX_NODES).prop_flat_map(|n| {
        proptest::collection::vec((0..n, 0..n), 0..4 * n).prop_map(move |pairs| {
            let mut adjacency = vec![Vec::new(); n];
            for (a, b) in pairs {
                if a != b {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }
            }
            GraphModel::from_adjacency(adjacency)
        })
    })
}

proptest! {
    #[test]
    fn edge_count_is_half_an_even_adjacency_total(g in arb_graph()) {
        prop_assert_eq!(g.adjacency_len() % 2, 0);
        prop_assert_eq!(g.edge_count() * 2, g.adjacency_len());
    }

    #[test]
    fn result_is_within_factor_two_of_the_optimum(g in arb_graph()) {
        prop_assume!(g.node_count() > 0);
        let optimum = brute_force_optimum(&g);
        let h = approx_densest_subgraph(&g);

        prop_assert!(h.node_count() > 0);
        // 2 * edges(h) / nodes(h) >= optimum
        let doubled = Density::new(2 * h.edge_count(), h.node_count());
        prop_assert!(doubled.at_least(optimum));
        prop_assert!(optimum.at_least(Density::new(h.edge_count(), h.node_count())));
    }

    #[test]
    fn removal_order_is_a_permutation(g in arb_graph()) {
        let peeling = peel(&g);
        let mut order = peeling.removal_order().to_vec();
        order.sort_unstable();
        prop_assert_eq!(order, (0..g.node_count()).collect::<Vec<_>>());
    }

    #[test]
    fn best_density_is_monotone(g in arb_graph()) {
        let mut previous = Density::new(g.edge_count(), g.node_count());
        let mut monotone = true;
        peel_with(&g, |step| {
            monotone &= step.best.at_least(previous);
            previous = step.best;
        });
        prop_assert!(monotone);
    }

    #[test]
    fn subgraph_density_matches_the_reported_best(g in arb_graph()) {
        prop_assume!(g.edge_count() > 0);
        let peeling = peel(&g);
        let h = g.induced_subgraph(peeling.survivors());
        prop_assert_eq!(Density::new(h.edge_count(), h.node_count()), peeling.best());
        prop_assert!(h.check_symmetric().is_ok());
    }

    #[test]
    fn extracting_all_nodes_preserves_the_edge_set(g in arb_graph(), reverse in any::<bool>()) {
        let mut all: Vec<_> = (0..g.node_count()).collect();
        if reverse {
            all.reverse();
        }
        let h = g.induced_subgraph(&all);

        let named = |m: &GraphModel| {
            let mut pairs: Vec<(String, String)> = m
                .edge_pairs()
                .map(|(a, b)| (a.to_owned(), b.to_owned()))
                .collect();
            pairs.sort();
            pairs
        };
        prop_assert_eq!(named(&h), named(&g));
    }

    #[test]
    fn multigraph_removal_order_is_a_permutation(g in arb_multigraph()) {
        let peeling = peel(&g);
        let mut order = peeling.removal_order().to_vec();
        order.sort_unstable();
        prop_assert_eq!(order, (0..g.node_count()).collect::<Vec<_>>());
    }

    #[test]
    fn multigraph_best_density_is_monotone(g in arb_multigraph()) {
        let mut previous = Density::new(g.edge_count(), g.node_count());
        let mut monotone = true;
        let mut steps = 0;
        peel_with(&g, |step| {
            monotone &= step.best.at_least(previous);
            previous = step.best;
            steps += 1;
        });
        prop_assert!(monotone);
        prop_assert_eq!(steps, g.node_count());
    }

    #[test]
    fn multigraph_subgraph_density_matches_the_reported_best(g in arb_multigraph()) {
        prop_assume!(g.edge_count() > 0);
        let peeling = peel(&g);
        let h = g.induced_subgraph(peeling.survivors());
        prop_assert_eq!(Density::new(h.edge_count(), h.node_count()), peeling.best());
        prop_assert!(h.check_symmetric().is_ok());
    }
}
