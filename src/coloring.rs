//! Proper-coloring heuristics over the conflict graph.
//!
//! Each color class is a set of nodes with no conflict edge inside it, i.e. a
//! candidate reboot group. Three independent heuristics share the contract
//! `fn(&Graph) -> ColorMap`:
//!
//! 1. **LF** (largest-first) - color vertices in descending degree order.
//! 2. **DSATUR** - repeatedly color the vertex with the most distinctly
//!    colored neighbors.
//! 3. **Dcolor** - recursive-largest-first style: peel off maximal
//!    independent sets, one color each.
//!
//! All three break ties by ascending vertex index, so a given adjacency
//! always produces the same coloring. [`best_coloring`] runs every algorithm
//! and keeps the one with the fewest colors, earlier algorithms winning ties.

use crate::container::Ndx;
use crate::graph::Graph;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// A proper coloring: color id to the vertices wearing it, each class sorted
/// ascending. The classes partition the graph's vertex set.
pub type ColorMap = BTreeMap<usize, Vec<Ndx>>;

/// Names of the coloring algorithms, in declaration (tie-break) order.
pub const ALGORITHMS: [&str; 3] = ["LF", "DSATUR", "Dcolor"];

/// Color count achieved by one algorithm, reported in verbose output.
#[derive(Debug, Clone, Serialize)]
pub struct ColoringStats {
    /// Algorithm name, as in [`ALGORITHMS`].
    pub algorithm: &'static str,
    /// Number of colors used.
    pub colors: usize,
}

/// Smallest color id not worn by any colored neighbor of `v`.
fn smallest_free_color(graph: &Graph, v: Ndx, colors: &BTreeMap<Ndx, usize>) -> usize {
    let used: BTreeSet<usize> = graph
        .neighbors(v)
        .iter()
        .filter_map(|n| colors.get(n).copied())
        .collect();
    let mut color = 0;
    while used.contains(&color) {
        color += 1;
    }
    color
}

fn to_color_map(colors: &BTreeMap<Ndx, usize>) -> ColorMap {
    let mut map = ColorMap::new();
    for (&v, &c) in colors {
        map.entry(c).or_default().push(v);
    }
    // BTreeMap iteration is ascending, so each class is already sorted.
    map
}

/// Largest-first greedy coloring.
///
/// Vertices are colored in descending degree order (ties ascending index),
/// each receiving the smallest color free among its neighbors.
#[must_use]
pub fn color_lf(graph: &Graph) -> ColorMap {
    let mut order = graph.vertices();
    order.sort_by_key(|&v| (Reverse(graph.degree(v)), v));
    let mut colors = BTreeMap::new();
    for v in order {
        let c = smallest_free_color(graph, v, &colors);
        colors.insert(v, c);
    }
    to_color_map(&colors)
}

/// DSATUR coloring.
///
/// Repeatedly colors the uncolored vertex with maximum *saturation* (number
/// of distinct colors among its colored neighbors); ties go to the vertex
/// with the higher degree in the uncolored subgraph, then to the lower
/// index.
#[must_use]
pub fn color_dsatur(graph: &Graph) -> ColorMap {
    let mut colors: BTreeMap<Ndx, usize> = BTreeMap::new();
    let mut uncolored: BTreeSet<Ndx> = graph.vertices().into_iter().collect();
    while !uncolored.is_empty() {
        let mut best: Option<(usize, usize, Ndx)> = None;
        for &v in &uncolored {
            let saturation = graph
                .neighbors(v)
                .iter()
                .filter_map(|n| colors.get(n).copied())
                .collect::<BTreeSet<_>>()
                .len();
            let residual_degree = graph
                .neighbors(v)
                .iter()
                .filter(|n| uncolored.contains(n))
                .count();
            // Strict comparison keeps the lowest-index vertex on ties, since
            // the scan runs in ascending index order.
            let better = match best {
                None => true,
                Some((s, d, _)) => (saturation, residual_degree) > (s, d),
            };
            if better {
                best = Some((saturation, residual_degree, v));
            }
        }
        if let Some((_, _, v)) = best {
            let c = smallest_free_color(graph, v, &colors);
            colors.insert(v, c);
            uncolored.remove(&v);
        }
    }
    to_color_map(&colors)
}

/// Recursive-largest-first style coloring.
///
/// Extracts a maximal independent set from the uncolored subgraph, assigns
/// it a fresh color and repeats on the remainder. The set is grown greedily
/// from the vertex of maximum degree in the uncolored subgraph (ties
/// ascending index), discarding its neighbors from candidacy.
#[must_use]
pub fn color_dcolor(graph: &Graph) -> ColorMap {
    let mut remaining: BTreeSet<Ndx> = graph.vertices().into_iter().collect();
    let mut map = ColorMap::new();
    let mut color = 0;
    while !remaining.is_empty() {
        let mut candidates = remaining.clone();
        let mut class = Vec::new();
        while !candidates.is_empty() {
            let mut best: Option<(usize, Ndx)> = None;
            for &v in &candidates {
                let degree = graph
                    .neighbors(v)
                    .iter()
                    .filter(|n| remaining.contains(n))
                    .count();
                let better = match best {
                    None => true,
                    Some((d, _)) => degree > d,
                };
                if better {
                    best = Some((degree, v));
                }
            }
            if let Some((_, v)) = best {
                class.push(v);
                candidates.remove(&v);
                for n in graph.neighbors(v) {
                    candidates.remove(n);
                }
            }
        }
        for v in &class {
            remaining.remove(v);
        }
        class.sort_unstable();
        map.insert(color, class);
        color += 1;
    }
    map
}

/// Run every algorithm in declaration order.
#[must_use]
pub fn all_colorings(graph: &Graph) -> Vec<(&'static str, ColorMap)> {
    vec![
        ("LF", color_lf(graph)),
        ("DSATUR", color_dsatur(graph)),
        ("Dcolor", color_dcolor(graph)),
    ]
}

/// Run every algorithm and keep the coloring with the fewest colors.
///
/// Ties are broken by declaration order (LF, then DSATUR, then Dcolor), so
/// the winner is deterministic. Also returns the per-algorithm statistics
/// for verbose output.
#[must_use]
pub fn best_coloring(graph: &Graph) -> (&'static str, ColorMap, Vec<ColoringStats>) {
    let mut colorings = all_colorings(graph);
    let stats = colorings
        .iter()
        .map(|&(algorithm, ref map)| ColoringStats {
            algorithm,
            colors: map.len(),
        })
        .collect();
    let mut winner = 0;
    for (i, (_, map)) in colorings.iter().enumerate().skip(1) {
        if map.len() < colorings[winner].1.len() {
            winner = i;
        }
    }
    let (name, map) = colorings.swap_remove(winner);
    (name, map, stats)
}
