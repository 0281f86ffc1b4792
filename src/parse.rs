use std::io::{BufRead, Read};
use std::str::{FromStr, SplitAsciiWhitespace};

use log::debug;

use crate::error::{Error, Result};
use crate::graph::{ForestGraph, Vertex};

/// Reads a graph in the whitespace-separated format
///
/// ```text
/// N
/// d_0 n_0_1 .. n_0_d0
/// ..
/// d_{N-1} ..
/// ```
///
/// where each vertex in order gives its neighbour count followed by that many neighbour indices.
/// Line breaks carry no meaning. Anything after the last neighbour list is ignored.
pub fn parse_input(mut reader: impl BufRead) -> Result<ForestGraph> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_str(&text)
}

pub fn parse_str(text: &str) -> Result<ForestGraph> {
    let mut tokens = Tokens {
        inner: text.split_ascii_whitespace(),
        position: 0,
    };

    let vertex_count: Vertex = tokens.next_number(|| "vertex count".to_owned())?;
    // Capacities are capped by the input length, not the declared counts.
    let mut adjacency = Vec::with_capacity((vertex_count as usize).min(text.len()));
    for vertex in 0..vertex_count {
        let degree: usize = tokens.next_number(|| format!("neighbour count of vertex {vertex}"))?;
        let mut neighbours: Vec<Vertex> = Vec::with_capacity(degree.min(text.len()));
        for _ in 0..degree {
            neighbours.push(tokens.next_number(|| format!("neighbour of vertex {vertex}"))?);
        }
        adjacency.push(neighbours);
    }

    if tokens.inner.next().is_some() {
        debug!("ignoring trailing input after token {}", tokens.position);
    }
    ForestGraph::from_adjacency(adjacency)
}

struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
    position: usize,
}

impl Tokens<'_> {
    fn next_number<T: FromStr>(&mut self, expected: impl Fn() -> String) -> Result<T> {
        self.position += 1;
        let token = self.inner.next().ok_or_else(|| {
            Error::malformed(
                self.position,
                format!("expected {}, found end of input", expected()),
            )
        })?;
        token.parse().map_err(|_| {
            Error::malformed(
                self.position,
                format!("expected {}, found {token:?}", expected()),
            )
        })
    }
}
