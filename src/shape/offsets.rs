//! Deterministic offset assignment for parallel edges and self-loops.
//!
//! Edges sharing the same unordered endpoint pair form an offset group and
//! fan out with alternating curve magnitudes; self-loops on one node get
//! increasing loop radii. Assignment depends only on the input edge order,
//! never on map iteration order, so re-renders are visually stable.

use std::collections::BTreeMap;

use crate::graph::Edge;

use super::edge::{EdgeOffset, OffsetLine};

/// Offset group key: unordered endpoint pair for regular edges, the owning
/// node for self-loops. Loops never share a group with non-loop edges on
/// the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum GroupKey {
    Pair(u64, u64),
    Loop(u64),
}

impl GroupKey {
    fn for_edge(edge: &Edge) -> Self {
        if edge.is_loop() {
            GroupKey::Loop(edge.start)
        } else {
            GroupKey::Pair(edge.start.min(edge.end), edge.start.max(edge.end))
        }
    }
}

/// Assigns every edge an offset descriptor keyed by edge id.
///
/// Non-loop groups of size `n` receive the magnitude sequence
/// `0, 1, -1, 2, -2, …` (odd `n`) or `1, -1, 2, -2, …` (even `n`) in input
/// order; the magnitude is negated for edges whose `(start, end)` runs
/// against the canonical `min-max` key order, so opposite-direction edges
/// bend away from each other. Loop groups receive magnitudes `1..=n`.
pub fn assign_offsets(edges: &[Edge]) -> BTreeMap<u64, EdgeOffset> {
    let mut groups: BTreeMap<GroupKey, Vec<&Edge>> = BTreeMap::new();
    for edge in edges {
        groups.entry(GroupKey::for_edge(edge)).or_default().push(edge);
    }

    let mut offsets = BTreeMap::new();
    for (key, members) in groups {
        match key {
            GroupKey::Loop(_) => {
                for (index, edge) in members.iter().enumerate() {
                    offsets.insert(
                        edge.id,
                        EdgeOffset {
                            line: OffsetLine::Loop,
                            magnitude: (index + 1) as f32,
                        },
                    );
                }
            }
            GroupKey::Pair(low, _) => {
                let sequence = magnitude_sequence(members.len());
                for (edge, base) in members.iter().zip(sequence) {
                    let magnitude = if edge.start == low { base } else { -base };
                    // Normalize -0.0 so straight offsets compare cleanly.
                    let magnitude = if magnitude == 0.0 { 0.0 } else { magnitude };
                    let line = if magnitude == 0.0 {
                        OffsetLine::Straight
                    } else {
                        OffsetLine::Curved
                    };
                    offsets.insert(edge.id, EdgeOffset { line, magnitude });
                }
            }
        }
    }
    offsets
}

/// `0, 1, -1, 2, -2, …` for odd lengths; `1, -1, 2, -2, …` for even ones.
fn magnitude_sequence(len: usize) -> Vec<f32> {
    let mut sequence = Vec::with_capacity(len);
    if len % 2 == 1 {
        sequence.push(0.0);
    }
    let mut step = 1.0;
    while sequence.len() < len {
        sequence.push(step);
        if sequence.len() < len {
            sequence.push(-step);
        }
        step += 1.0;
    }
    sequence
}
