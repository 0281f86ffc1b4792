use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::graph::{ForestGraph, Vertex};
use crate::state::{Cover, CoverState};

/// Order in which reducible vertices are visited.
///
/// All strategies find a cover of the same, minimum, size. Which vertices end up in it depends
/// on the visiting order, so only the size should be compared across strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Repeated full passes over all vertices in increasing index order.
    Rescan,
    /// A queue of vertices with at most one undecided neighbour. Linear time.
    #[default]
    WorkQueue,
    /// `WorkQueue` on every tree of the forest, trees processed in parallel.
    Components,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown strategy {0:?} (expected rescan, queue or components)")]
pub struct UnknownStrategy(String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rescan" => Ok(Strategy::Rescan),
            "queue" => Ok(Strategy::WorkQueue),
            "components" => Ok(Strategy::Components),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Rescan => "rescan",
            Strategy::WorkQueue => "queue",
            Strategy::Components => "components",
        })
    }
}

/// Exact minimum vertex cover of a forest by repeated leaf elimination.
///
/// A vertex whose undecided neighbours have shrunk to exactly one is a leaf of what remains of
/// its tree; its neighbour goes into the cover and both are decided. A vertex with no undecided
/// neighbours is removed without entering the cover. On a forest this always terminates with a
/// minimum cover.
///
/// ```
/// use forest_cover::{CoverEngine, ForestGraph, Strategy};
///
/// let graph = ForestGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
/// let engine = CoverEngine::new().with_strategy(Strategy::Rescan);
/// assert_eq!(engine.compute_size(&graph).unwrap(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CoverEngine {
    strategy: Strategy,
    verify_forest: bool,
}

impl Default for CoverEngine {
    fn default() -> Self {
        CoverEngine {
            strategy: Strategy::default(),
            verify_forest: true,
        }
    }
}

impl CoverEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Whether to run [`ForestGraph::verify`] before reducing. Enabled by default.
    ///
    /// Without verification a cyclic input either yields a wrong size or fails with
    /// [`Error::Stalled`].
    pub fn verify_forest(mut self, verify: bool) -> Self {
        self.verify_forest = verify;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn run(&self, graph: &ForestGraph) -> Result<CoverState> {
        if self.verify_forest {
            graph.verify()?;
        }
        debug!(
            "computing cover of {} vertices, {} edges with {} strategy",
            graph.vertex_count(),
            graph.edge_count(),
            self.strategy
        );

        let mut state = CoverState::new(graph.vertex_count());
        match self.strategy {
            Strategy::Rescan => rescan(graph, &mut state)?,
            Strategy::WorkQueue => work_queue(graph, &mut state)?,
            Strategy::Components => components(graph, &mut state)?,
        }

        debug!("minimum cover has {} vertices", state.cover_size());
        Ok(state)
    }

    pub fn compute_size(&self, graph: &ForestGraph) -> Result<usize> {
        self.run(graph).map(|state| state.cover_size())
    }

    pub fn compute(&self, graph: &ForestGraph) -> Result<Cover> {
        self.run(graph).map(CoverState::into_cover)
    }
}

pub fn compute_minimum_cover_size(graph: &ForestGraph) -> Result<usize> {
    CoverEngine::default().compute_size(graph)
}

/// Undecided neighbours of a vertex: how many, and the last one seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tail {
    end: Vertex,
    length: usize,
}

fn measure_uncovered_tail(graph: &ForestGraph, vertex: Vertex, state: &CoverState) -> Tail {
    let mut tail = Tail { end: 0, length: 0 };
    for &neighbour in graph.adjacent(vertex) {
        if !state.is_decided(neighbour) {
            tail.length += 1;
            tail.end = neighbour;
        }
    }
    tail
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Deferred,
    Removed,
    Covered(Vertex),
}

fn reduce(vertex: Vertex, tail: Tail, state: &mut CoverState) -> Decision {
    match tail.length {
        0 => {
            trace!("removing isolated vertex {vertex}");
            state.remove(vertex);
            Decision::Removed
        }
        1 => {
            trace!("leaf {vertex}: covering {}", tail.end);
            state.cover(vertex, tail.end);
            Decision::Covered(tail.end)
        }
        _ => Decision::Deferred,
    }
}

fn rescan(graph: &ForestGraph, state: &mut CoverState) -> Result<()> {
    let mut pass = 0;
    while !state.is_complete() {
        let before = state.undecided();
        for vertex in graph.vertices() {
            if state.is_decided(vertex) {
                continue;
            }
            let tail = measure_uncovered_tail(graph, vertex, state);
            reduce(vertex, tail, state);
        }
        pass += 1;
        trace!("pass {pass}: {} vertices undecided", state.undecided());

        if state.undecided() == before {
            return Err(Error::Stalled {
                undecided: state.undecided(),
            });
        }
    }
    Ok(())
}

fn work_queue(graph: &ForestGraph, state: &mut CoverState) -> Result<()> {
    // Undecided neighbour count for symmetric input; the tail is still measured on pop.
    let mut live_degree: Vec<usize> = graph
        .vertices()
        .map(|v| graph.adjacent(v).len())
        .collect();
    let mut queue: VecDeque<Vertex> = graph
        .vertices()
        .filter(|&v| live_degree[v as usize] <= 1)
        .collect();

    while let Some(vertex) = queue.pop_front() {
        if state.is_decided(vertex) {
            continue;
        }
        let tail = measure_uncovered_tail(graph, vertex, state);
        let covered = match reduce(vertex, tail, state) {
            Decision::Deferred => continue,
            Decision::Removed => None,
            Decision::Covered(neighbour) => Some(neighbour),
        };

        for decided in std::iter::once(vertex).chain(covered) {
            for &neighbour in graph.adjacent(decided) {
                if state.is_decided(neighbour) {
                    continue;
                }
                let degree = &mut live_degree[neighbour as usize];
                *degree = degree.saturating_sub(1);
                if *degree <= 1 {
                    queue.push_back(neighbour);
                }
            }
        }
    }

    if state.is_complete() {
        Ok(())
    } else {
        Err(Error::Stalled {
            undecided: state.undecided(),
        })
    }
}

fn components(graph: &ForestGraph, state: &mut CoverState) -> Result<()> {
    let trees = graph.component_subgraphs()?;
    debug!("reducing {} trees in parallel", trees.len());

    let reduced: Vec<(Vec<Vertex>, CoverState)> = trees
        .into_par_iter()
        .map(|(members, tree)| -> Result<(Vec<Vertex>, CoverState)> {
            let mut local = CoverState::new(tree.vertex_count());
            work_queue(&tree, &mut local)?;
            Ok((members, local))
        })
        .collect::<Result<_>>()?;

    for (members, local) in reduced {
        for (index, &vertex) in members.iter().enumerate() {
            state.mark(vertex, local.state(index as Vertex));
        }
    }
    Ok(())
}
