use thiserror::Error;

use crate::graph::Vertex;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    OutOfRange { vertex: Vertex, vertex_count: usize },

    #[error("malformed input at token {token}: {reason}")]
    MalformedInput { token: usize, reason: String },

    #[error("I/O error while reading input")]
    Io(#[from] std::io::Error),

    #[error("vertex {vertex} lists itself as a neighbour")]
    SelfLoop { vertex: Vertex },

    #[error("vertex {from} lists {to} as a neighbour, but {to} does not list {from}")]
    Asymmetric { from: Vertex, to: Vertex },

    #[error("edge ({from}, {to}) closes a cycle; the graph is not a forest")]
    NotAForest { from: Vertex, to: Vertex },

    #[error("reduction stalled with {undecided} undecided vertices; the graph is not a symmetric forest")]
    Stalled { undecided: usize },
}

impl Error {
    pub(crate) fn malformed(token: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            token,
            reason: reason.into(),
        }
    }
}
