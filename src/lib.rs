//! Exact minimum vertex cover of a forest by leaf elimination.

pub mod engine;
pub mod error;
pub mod graph;
pub mod parse;
pub mod state;

pub use engine::{compute_minimum_cover_size, CoverEngine, Strategy, UnknownStrategy};
pub use error::{Error, Result};
pub use graph::{ForestGraph, Vertex};
pub use parse::{parse_input, parse_str};
pub use state::{Cover, CoverState, VertexState};

#[cfg(test)]
mod test {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn test_full_cover() {
        let graph = read_graph("forest0.in");
        assert!(!graph.validate_cover(&Cover::default()));
        assert!(graph.validate_cover(&Cover::full(graph.vertex_count() as u32)));
    }

    #[test]
    fn test_forest0() {
        assert_eq!(test_graph("forest0.in"), 3);
    }

    #[test]
    fn test_forest1() {
        assert_eq!(test_graph("forest1.in"), 5);
    }

    fn read_graph(path: &str) -> ForestGraph {
        parse_input(BufReader::new(std::fs::File::open(path).unwrap())).unwrap()
    }

    fn test_graph(path: &str) -> usize {
        let graph = read_graph(path);
        let size = compute_minimum_cover_size(&graph).unwrap();
        for strategy in [Strategy::Rescan, Strategy::WorkQueue, Strategy::Components] {
            let cover = CoverEngine::new().with_strategy(strategy).compute(&graph).unwrap();
            assert!(graph.validate_cover(&cover));
            assert_eq!(cover.len(), size);
        }
        size
    }
}
