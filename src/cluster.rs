//! Cluster aggregates: groups, node/instance containers and derived queries.
//!
//! Two aggregate values travel through the planner:
//! - [`ClusterState`] - the `(nodes, instances)` pair every planning
//!   operation transforms. Mutations produce a new state; the loader builds
//!   the first one and the pipeline discards intermediates.
//! - [`ClusterData`] - the full snapshot as consumed from the loader: the
//!   state plus the group list, cluster tags and instance policy (the last
//!   two are carried for completeness and unused by the planning core).

use crate::container::{Container, Element, Gdx, Idx, Ndx};
use crate::errors::PlanResult;
use crate::instance::Instance;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// A topological partition of the cluster's nodes.
///
/// Evacuated instances must land on a node in the same group as their
/// original primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Stable index into the group container.
    pub idx: Gdx,
    /// Human-readable name.
    pub name: String,
}

impl Group {
    /// Create a group.
    #[must_use]
    pub fn new(idx: Gdx, name: &str) -> Self {
        Self {
            idx,
            name: name.to_string(),
        }
    }
}

impl Element for Group {
    fn idx_of(&self) -> i32 {
        self.idx
    }

    fn name_of(&self) -> &str {
        &self.name
    }

    fn set_idx(mut self, idx: i32) -> Self {
        self.idx = idx;
        self
    }

    fn set_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

/// The `(nodes, instances)` value threaded through all planning operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusterState {
    /// Node container.
    pub nodes: Container<Node>,
    /// Instance container.
    pub instances: Container<Instance>,
}

impl ClusterState {
    /// Indices of the instances hosted as primaries on `ndx` that have no
    /// secondary, in hosting order.
    ///
    /// These are the instances that must be evacuated before the node can be
    /// rebooted without disruption.
    ///
    /// # Errors
    ///
    /// [`crate::PlanError::NotFound`] if `ndx` or one of its hosted instance
    /// indices is dangling.
    pub fn non_redundant_primaries(&self, ndx: Ndx) -> PlanResult<Vec<Idx>> {
        let node = self.nodes.find(ndx)?;
        let mut out = Vec::new();
        for &idx in &node.p_list {
            if !self.instances.find(idx)?.is_redundant() {
                out.push(idx);
            }
        }
        Ok(out)
    }

    /// Indices of all non-offline nodes, ascending.
    #[must_use]
    pub fn online_nodes(&self) -> Vec<Ndx> {
        self.nodes
            .iter()
            .filter(|(_, n)| !n.offline)
            .map(|(ndx, _)| ndx)
            .collect()
    }
}

/// A full cluster snapshot as materialized by a loader.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusterData {
    /// Node group container.
    pub groups: Container<Group>,
    /// Node container.
    pub nodes: Container<Node>,
    /// Instance container.
    pub instances: Container<Instance>,
    /// Cluster-level tags. Unused by the planning core.
    pub tags: Vec<String>,
    /// Cluster instance policy, kept verbatim. Unused by the planning core.
    pub ipolicy: Option<serde_json::Value>,
}

impl ClusterData {
    /// Clone out the `(nodes, instances)` planning state.
    #[must_use]
    pub fn state(&self) -> ClusterState {
        ClusterState {
            nodes: self.nodes.clone(),
            instances: self.instances.clone(),
        }
    }

    /// Indices of all nodes flagged as master, ascending.
    #[must_use]
    pub fn masters(&self) -> Vec<Ndx> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.master)
            .map(|(ndx, _)| ndx)
            .collect()
    }
}
