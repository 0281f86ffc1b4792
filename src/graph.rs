use std::collections::VecDeque;

use bitvec::prelude::*;
use log::debug;

use crate::error::{Error, Result};
use crate::state::Cover;

pub type Vertex = u32;

/// Immutable adjacency of an undirected forest.
///
/// Neighbour lists are stored back to back in one buffer; `neighbour_indices[v]..neighbour_indices[v + 1]`
/// is the slice belonging to `v`. The lists are taken as given: symmetry and acyclicity are only
/// checked by [`ForestGraph::verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForestGraph {
    neighbours: Vec<Vertex>,
    neighbour_indices: Vec<usize>,
}

impl ForestGraph {
    /// Fails with [`Error::OutOfRange`] if any listed neighbour is not a vertex of the graph.
    pub fn from_adjacency<I>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[Vertex]>,
    {
        let mut neighbours = Vec::new();
        let mut neighbour_indices = vec![0];
        for list in adjacency {
            neighbours.extend_from_slice(list.as_ref());
            neighbour_indices.push(neighbours.len());
        }
        let graph = ForestGraph {
            neighbours,
            neighbour_indices,
        };

        let vertex_count = graph.vertex_count();
        if let Some(&vertex) = graph
            .neighbours
            .iter()
            .find(|&&n| n as usize >= vertex_count)
        {
            return Err(Error::OutOfRange {
                vertex,
                vertex_count,
            });
        }
        Ok(graph)
    }

    /// Builds a graph from an undirected edge list, listing every edge on both endpoints.
    pub fn from_edges(vertex_count: usize, edges: &[(Vertex, Vertex)]) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); vertex_count];
        for &(start, end) in edges {
            for vertex in [start, end] {
                if vertex as usize >= vertex_count {
                    return Err(Error::OutOfRange {
                        vertex,
                        vertex_count,
                    });
                }
            }
            adjacency[start as usize].push(end);
            if start != end {
                adjacency[end as usize].push(start);
            }
        }
        Self::from_adjacency(adjacency)
    }

    pub fn vertex_count(&self) -> usize {
        self.neighbour_indices.len().saturating_sub(1)
    }

    /// Number of undirected edges, assuming the adjacency is symmetric.
    pub fn edge_count(&self) -> usize {
        self.neighbours.len() / 2
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> {
        0..self.vertex_count() as Vertex
    }

    pub fn neighbours(&self, vertex: Vertex) -> Result<&[Vertex]> {
        self.check_vertex(vertex)?;
        Ok(self.adjacent(vertex))
    }

    pub fn degree(&self, vertex: Vertex) -> Result<usize> {
        self.neighbours(vertex).map(<[Vertex]>::len)
    }

    pub(crate) fn adjacent(&self, vertex: Vertex) -> &[Vertex] {
        let start = self.neighbour_indices[vertex as usize];
        let end = self.neighbour_indices[vertex as usize + 1];
        &self.neighbours[start..end]
    }

    fn check_vertex(&self, vertex: Vertex) -> Result<()> {
        if (vertex as usize) < self.vertex_count() {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    /// Every edge once, as `(smaller, larger)`, read from the smaller endpoint's list.
    ///
    /// Only complete for symmetric adjacency: an entry listed solely by the larger endpoint is
    /// skipped. A neighbour listed twice yields the edge twice.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.vertices().flat_map(move |start| {
            self.adjacent(start)
                .iter()
                .filter(move |&&end| start < end)
                .map(move |&end| (start, end))
        })
    }

    /// Checks that the adjacency is a symmetric relation without self-loops and that it is acyclic.
    pub fn verify(&self) -> Result<()> {
        self.check_symmetric()
            .and_then(|()| self.check_acyclic())
            .map_err(|err| {
                debug!("rejecting graph: {err}");
                err
            })
    }

    fn check_symmetric(&self) -> Result<()> {
        let mut forward = Vec::with_capacity(self.neighbours.len());
        for vertex in self.vertices() {
            for &neighbour in self.adjacent(vertex) {
                if neighbour == vertex {
                    return Err(Error::SelfLoop { vertex });
                }
                forward.push((vertex, neighbour));
            }
        }
        let mut backward: Vec<_> = forward.iter().map(|&(from, to)| (to, from)).collect();
        forward.sort_unstable();
        backward.sort_unstable();

        // The smaller pair at the first mismatch is the one listed without its reverse.
        match forward.iter().zip(&backward).find(|(f, b)| f != b) {
            None => Ok(()),
            Some((&(from, to), reversed)) if (from, to) < *reversed => {
                Err(Error::Asymmetric { from, to })
            }
            Some((_, &(to, from))) => Err(Error::Asymmetric { from, to }),
        }
    }

    fn check_acyclic(&self) -> Result<()> {
        fn find(parent: &mut [Vertex], mut vertex: Vertex) -> Vertex {
            while parent[vertex as usize] != vertex {
                let grandparent = parent[parent[vertex as usize] as usize];
                parent[vertex as usize] = grandparent;
                vertex = grandparent;
            }
            vertex
        }

        let mut parent: Vec<Vertex> = self.vertices().collect();
        for (from, to) in self.edges() {
            let (a, b) = (find(&mut parent, from), find(&mut parent, to));
            if a == b {
                return Err(Error::NotAForest { from, to });
            }
            parent[a as usize] = b;
        }
        Ok(())
    }

    /// Connected components, each as an ascending list of vertices, ordered by their smallest vertex.
    pub fn components(&self) -> Vec<Vec<Vertex>> {
        let mut visited = bitvec![0; self.vertex_count()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for root in self.vertices() {
            if visited[root as usize] {
                continue;
            }
            visited.set(root as usize, true);
            queue.push_back(root);
            let mut members = Vec::new();
            while let Some(vertex) = queue.pop_front() {
                members.push(vertex);
                for &neighbour in self.adjacent(vertex) {
                    if !visited[neighbour as usize] {
                        visited.set(neighbour as usize, true);
                        queue.push_back(neighbour);
                    }
                }
            }
            members.sort_unstable();
            components.push(members);
        }
        components
    }

    /// Splits the graph into one relabelled subgraph per component.
    ///
    /// Local vertex `i` of a subgraph is `members[i]` in this graph. A neighbour that lands in a
    /// different component is only reachable through a one-sided entry and fails with
    /// [`Error::Asymmetric`].
    pub(crate) fn component_subgraphs(&self) -> Result<Vec<(Vec<Vertex>, ForestGraph)>> {
        let components = self.components();
        let mut local = vec![0; self.vertex_count()];
        let mut component_of = vec![0; self.vertex_count()];
        for (id, members) in components.iter().enumerate() {
            for (index, &vertex) in members.iter().enumerate() {
                local[vertex as usize] = index as Vertex;
                component_of[vertex as usize] = id;
            }
        }

        components
            .into_iter()
            .enumerate()
            .map(|(id, members)| {
                let mut neighbours = Vec::new();
                let mut neighbour_indices = Vec::with_capacity(members.len() + 1);
                neighbour_indices.push(0);
                for &vertex in &members {
                    for &neighbour in self.adjacent(vertex) {
                        if component_of[neighbour as usize] != id {
                            return Err(Error::Asymmetric {
                                from: vertex,
                                to: neighbour,
                            });
                        }
                        neighbours.push(local[neighbour as usize]);
                    }
                    neighbour_indices.push(neighbours.len());
                }
                let subgraph = ForestGraph {
                    neighbours,
                    neighbour_indices,
                };
                Ok((members, subgraph))
            })
            .collect()
    }

    /// Whether every edge of [`ForestGraph::edges`] has an endpoint in `cover`, so symmetric input only.
    pub fn validate_cover(&self, cover: &Cover) -> bool {
        let mut selected = bitvec![0; self.vertex_count()];
        for &vertex in cover.vertices() {
            if self.check_vertex(vertex).is_err() {
                debug!("cover names vertex {vertex} outside the graph");
                return false;
            }
            selected.set(vertex as usize, true);
        }
        for (start, end) in self.edges() {
            if !(selected[start as usize] || selected[end as usize]) {
                debug!("edge ({start}, {end}) not covered");
                return false;
            }
        }
        true
    }
}
