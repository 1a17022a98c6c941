//! Node conflict graph construction.
//!
//! Vertices are node indices; an edge joins two nodes that may not reboot in
//! the same window. Each instance with both a primary and a secondary inside
//! the vertex set contributes the edge between them, since rebooting both
//! endpoints at once would take the instance down entirely.
//!
//! Two flavors share the builder:
//! - the **all-instance** graph counts every redundant instance, and
//! - the **reboot** graph counts only running ones; a stopped instance does
//!   not force its nodes apart.
//!
//! The adjacency is symmetric, self-loop-free, and backed by ordered maps so
//! every traversal is deterministic.

use crate::cluster::ClusterState;
use crate::container::Ndx;
use crate::errors::{PlanError, PlanResult};
use std::collections::{BTreeMap, BTreeSet};

/// Undirected conflict graph over node indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adj: BTreeMap<Ndx, BTreeSet<Ndx>>,
}

impl Graph {
    /// Build the all-instance conflict graph over `vertices`.
    ///
    /// # Errors
    ///
    /// [`PlanError::Unsupported`] for an empty vertex set, or
    /// [`PlanError::InputInvalid`] when an instance references a node that
    /// does not exist or lists the same node as primary and secondary.
    pub fn build(state: &ClusterState, vertices: &BTreeSet<Ndx>) -> PlanResult<Self> {
        Self::build_filtered(state, vertices, false)
    }

    /// Build the reboot conflict graph over `vertices`: only running
    /// instances force their nodes apart.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Graph::build`].
    pub fn build_reboot(state: &ClusterState, vertices: &BTreeSet<Ndx>) -> PlanResult<Self> {
        Self::build_filtered(state, vertices, true)
    }

    fn build_filtered(
        state: &ClusterState,
        vertices: &BTreeSet<Ndx>,
        only_running: bool,
    ) -> PlanResult<Self> {
        if vertices.is_empty() {
            return Err(PlanError::Unsupported(
                "conflict graph over an empty vertex set".to_string(),
            ));
        }
        let mut adj: BTreeMap<Ndx, BTreeSet<Ndx>> = vertices
            .iter()
            .map(|&v| (v, BTreeSet::new()))
            .collect();
        for (idx, inst) in state.instances.iter() {
            if state.nodes.find(inst.primary).is_err() {
                return Err(PlanError::InputInvalid(format!(
                    "instance {idx} references unknown primary node {}",
                    inst.primary
                )));
            }
            if !inst.is_redundant() {
                continue;
            }
            if state.nodes.find(inst.secondary).is_err() {
                return Err(PlanError::InputInvalid(format!(
                    "instance {idx} references unknown secondary node {}",
                    inst.secondary
                )));
            }
            if inst.primary == inst.secondary {
                return Err(PlanError::InputInvalid(format!(
                    "instance {idx} has node {} as both primary and secondary",
                    inst.primary
                )));
            }
            if only_running && !inst.running {
                continue;
            }
            if vertices.contains(&inst.primary) && vertices.contains(&inst.secondary) {
                adj.entry(inst.primary).or_default().insert(inst.secondary);
                adj.entry(inst.secondary).or_default().insert(inst.primary);
            }
        }
        Ok(Self { adj })
    }

    /// All vertices, ascending.
    #[must_use]
    pub fn vertices(&self) -> Vec<Ndx> {
        self.adj.keys().copied().collect()
    }

    /// Neighbors of `v`, ascending. Empty for unknown vertices.
    #[must_use]
    pub fn neighbors(&self, v: Ndx) -> &BTreeSet<Ndx> {
        static EMPTY: BTreeSet<Ndx> = BTreeSet::new();
        self.adj.get(&v).unwrap_or(&EMPTY)
    }

    /// Degree of `v`. Zero for unknown vertices.
    #[must_use]
    pub fn degree(&self, v: Ndx) -> usize {
        self.adj.get(&v).map_or(0, BTreeSet::len)
    }

    /// True if the edge `(u, v)` is present.
    #[must_use]
    pub fn has_edge(&self, u: Ndx, v: Ndx) -> bool {
        self.adj.get(&u).is_some_and(|ns| ns.contains(&v))
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    /// True if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Render the adjacency one vertex per line, for verbose diagnostics.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (v, ns) in &self.adj {
            let ns = ns
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&format!("{v} -> [{ns}]\n"));
        }
        out
    }
}
