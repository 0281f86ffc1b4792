use std::fmt::Write;

use bitvec::prelude::*;

use crate::graph::Vertex;

/// Where a vertex stands in the reduction. `InCover` and `Removed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexState {
    Unmarked,
    InCover,
    Removed,
}

/// Per-invocation bookkeeping of the leaf-pruning reduction.
#[derive(Debug, Clone)]
pub struct CoverState {
    decided: BitVec,
    in_cover: BitVec,
    undecided: usize,
    cover_size: usize,
}

impl CoverState {
    pub fn new(vertex_count: usize) -> Self {
        CoverState {
            decided: bitvec![0; vertex_count],
            in_cover: bitvec![0; vertex_count],
            undecided: vertex_count,
            cover_size: 0,
        }
    }

    pub fn is_decided(&self, vertex: Vertex) -> bool {
        self.decided[vertex as usize]
    }

    pub fn state(&self, vertex: Vertex) -> VertexState {
        match (self.decided[vertex as usize], self.in_cover[vertex as usize]) {
            (false, _) => VertexState::Unmarked,
            (true, true) => VertexState::InCover,
            (true, false) => VertexState::Removed,
        }
    }

    pub fn cover_size(&self) -> usize {
        self.cover_size
    }

    pub fn undecided(&self) -> usize {
        self.undecided
    }

    pub fn is_complete(&self) -> bool {
        self.undecided == 0
    }

    /// `leaf` has `neighbour` as its only undecided neighbour: the neighbour joins the cover and
    /// the leaf is removed. A self-loop (`leaf == neighbour`) puts the vertex in the cover.
    pub(crate) fn cover(&mut self, leaf: Vertex, neighbour: Vertex) {
        self.mark(neighbour, VertexState::InCover);
        self.mark(leaf, VertexState::Removed);
    }

    pub(crate) fn remove(&mut self, vertex: Vertex) {
        self.mark(vertex, VertexState::Removed);
    }

    /// Moves an unmarked vertex into a terminal state. Decided vertices are left untouched.
    pub(crate) fn mark(&mut self, vertex: Vertex, state: VertexState) {
        let index = vertex as usize;
        if state == VertexState::Unmarked || self.decided[index] {
            return;
        }
        self.decided.set(index, true);
        self.undecided -= 1;
        if state == VertexState::InCover {
            self.in_cover.set(index, true);
            self.cover_size += 1;
        }
    }

    pub fn into_cover(self) -> Cover {
        Cover {
            vertices: self.in_cover.iter_ones().map(|v| v as Vertex).collect(),
        }
    }
}

/// A set of vertices, kept in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    vertices: Vec<Vertex>,
}

impl Cover {
    #[cfg(test)]
    pub(crate) fn full(n: u32) -> Cover {
        Cover {
            vertices: (0..n).collect(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, vertex: Vertex) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }

    /// The size on the first line, then one vertex per line.
    pub fn format(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(&mut output, "{}", self.vertices.len());
        for vertex in &self.vertices {
            let _ = writeln!(&mut output, "{}", vertex);
        }
        output
    }
}

impl FromIterator<Vertex> for Cover {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        let mut vertices: Vec<Vertex> = iter.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        Cover { vertices }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = CoverState::new(3);
        assert_eq!(state.undecided(), 3);
        assert_eq!(state.cover_size(), 0);
        assert!(!state.is_complete());
        assert!((0..3).all(|v| state.state(v) == VertexState::Unmarked));

        assert!(CoverState::new(0).is_complete());
    }

    #[test]
    fn test_cover_and_remove() {
        let mut state = CoverState::new(4);
        state.cover(0, 1);
        assert_eq!(state.state(0), VertexState::Removed);
        assert_eq!(state.state(1), VertexState::InCover);
        assert_eq!(state.cover_size(), 1);
        assert_eq!(state.undecided(), 2);

        state.remove(3);
        assert_eq!(state.state(3), VertexState::Removed);
        assert_eq!(state.cover_size(), 1);
        assert_eq!(state.undecided(), 1);
        assert!(!state.is_decided(2));
    }

    #[test]
    fn test_cover_self_loop() {
        let mut state = CoverState::new(2);
        state.cover(1, 1);
        assert_eq!(state.state(1), VertexState::InCover);
        assert_eq!(state.cover_size(), 1);
        assert_eq!(state.undecided(), 1);
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut state = CoverState::new(2);
        state.remove(0);
        state.mark(0, VertexState::InCover);
        assert_eq!(state.state(0), VertexState::Removed);
        assert_eq!(state.cover_size(), 0);

        state.mark(1, VertexState::InCover);
        state.remove(1);
        assert_eq!(state.state(1), VertexState::InCover);
        assert_eq!(state.undecided(), 0);
    }

    #[test]
    fn test_into_cover() {
        let mut state = CoverState::new(6);
        state.cover(5, 4);
        state.cover(0, 2);
        state.remove(1);
        let cover = state.into_cover();
        assert_eq!(cover.vertices(), &[2, 4]);
        assert!(cover.contains(4));
        assert!(!cover.contains(5));
    }

    #[test]
    fn test_format() {
        let cover = Cover::from_iter([7, 3, 7]);
        assert_eq!(cover.len(), 2);
        assert_eq!(cover.format(), "2\n3\n7\n");
        assert_eq!(Cover::default().format(), "0\n");
        assert!(Cover::default().is_empty());
    }
}
