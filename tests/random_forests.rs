use forest_cover::{compute_minimum_cover_size, CoverEngine, ForestGraph, Strategy, Vertex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const STRATEGIES: [Strategy; 3] = [Strategy::Rescan, Strategy::WorkQueue, Strategy::Components];

/// Random forest on `n` vertices with shuffled labels and neighbour order.
///
/// Every vertex after the first attaches to an earlier one with probability `attach`, otherwise
/// it starts a new tree.
fn random_forest(rng: &mut StdRng, n: usize, attach: f64) -> (ForestGraph, Vec<(Vertex, Vertex)>) {
    let mut labels: Vec<Vertex> = (0..n as Vertex).collect();
    labels.shuffle(rng);

    let mut edges = Vec::new();
    for i in 1..n {
        if rng.gen_bool(attach) {
            let parent = rng.gen_range(0..i);
            edges.push((labels[parent], labels[i]));
        }
    }
    edges.shuffle(rng);

    let mut adjacency = vec![Vec::new(); n];
    for &(a, b) in &edges {
        adjacency[a as usize].push(b);
        adjacency[b as usize].push(a);
    }
    for list in &mut adjacency {
        list.shuffle(rng);
    }
    (ForestGraph::from_adjacency(adjacency).unwrap(), edges)
}

fn brute_force_cover_size(n: usize, edges: &[(Vertex, Vertex)]) -> usize {
    (0u32..1 << n)
        .filter(|mask| {
            edges
                .iter()
                .all(|&(a, b)| mask & (1 << a) != 0 || mask & (1 << b) != 0)
        })
        .map(|mask| mask.count_ones() as usize)
        .min()
        .unwrap_or(0)
}

#[test]
fn test_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..300 {
        let n = rng.gen_range(0..=12);
        let attach = rng.gen_range(0.3..=1.0);
        let (graph, edges) = random_forest(&mut rng, n, attach);
        let expected = brute_force_cover_size(n, &edges);

        for strategy in STRATEGIES {
            let size = CoverEngine::new()
                .with_strategy(strategy)
                .compute_size(&graph)
                .unwrap();
            assert_eq!(size, expected, "round {round}, {strategy}, edges {edges:?}");
        }
    }
}

#[test]
fn test_random_covers_are_valid() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let n = rng.gen_range(1..400);
        let (graph, _) = random_forest(&mut rng, n, 0.9);
        let size = compute_minimum_cover_size(&graph).unwrap();

        for strategy in STRATEGIES {
            let cover = CoverEngine::new().with_strategy(strategy).compute(&graph).unwrap();
            assert!(graph.validate_cover(&cover), "{strategy}");
            assert_eq!(cover.len(), size, "{strategy}");
        }
    }
}

#[test]
fn test_disjoint_union_is_additive() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..30 {
        let (a, a_edges) = random_forest(&mut rng, 60, 1.0);
        let (b, b_edges) = random_forest(&mut rng, 45, 1.0);

        let offset = a.vertex_count() as Vertex;
        let mut edges = a_edges;
        edges.extend(b_edges.iter().map(|&(x, y)| (x + offset, y + offset)));
        let union = ForestGraph::from_edges(a.vertex_count() + b.vertex_count(), &edges).unwrap();

        assert_eq!(
            compute_minimum_cover_size(&union).unwrap(),
            compute_minimum_cover_size(&a).unwrap() + compute_minimum_cover_size(&b).unwrap()
        );
    }
}

#[test]
fn test_repeated_runs_agree() {
    let mut rng = StdRng::seed_from_u64(99);
    let (graph, _) = random_forest(&mut rng, 500, 0.95);
    for strategy in STRATEGIES {
        let engine = CoverEngine::new().with_strategy(strategy);
        assert_eq!(engine.compute(&graph).unwrap(), engine.compute(&graph).unwrap());
    }
}
