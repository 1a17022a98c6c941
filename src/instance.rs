//! Guest workload ("instance") model.
//!
//! An instance runs on its **primary** node and may keep a standby replica on
//! a **secondary** node. An instance with a valid secondary is *redundant*:
//! it survives its primary going down. Instances without a secondary must be
//! evacuated before their primary is rebooted (unless the operator opts out).
//!
//! Placement mutators consume and return the instance so intermediate cluster
//! states stay immutable-by-convention.

use crate::container::{Element, Idx, Ndx};
use serde::{Deserialize, Serialize};

/// Sentinel secondary index meaning "no secondary configured".
pub const NO_SECONDARY: Ndx = -1;

/// A guest workload hosted in the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Stable index into the instance container.
    pub idx: Idx,
    /// Human-readable name.
    pub name: String,
    /// Memory footprint, MiB.
    pub mem: i64,
    /// Disk footprint, MiB.
    pub disk: i64,
    /// Virtual CPUs.
    pub vcpus: i32,
    /// Whether the instance is currently running.
    pub running: bool,
    /// Index of the primary node.
    pub primary: Ndx,
    /// Index of the secondary node, or [`NO_SECONDARY`].
    pub secondary: Ndx,
}

impl Instance {
    /// Create an instance with no placement yet.
    #[must_use]
    pub fn new(idx: Idx, name: &str, mem: i64, disk: i64, vcpus: i32, running: bool) -> Self {
        Self {
            idx,
            name: name.to_string(),
            mem,
            disk,
            vcpus,
            running,
            primary: NO_SECONDARY,
            secondary: NO_SECONDARY,
        }
    }

    /// True if the instance has a valid secondary and survives losing its
    /// primary node.
    #[must_use]
    pub fn is_redundant(&self) -> bool {
        self.secondary != NO_SECONDARY
    }

    /// Return a copy with the primary node replaced.
    #[must_use]
    pub fn set_primary(mut self, ndx: Ndx) -> Self {
        self.primary = ndx;
        self
    }

    /// Return a copy with the secondary node replaced.
    #[must_use]
    pub fn set_secondary(mut self, ndx: Ndx) -> Self {
        self.secondary = ndx;
        self
    }

    /// Return a copy with both placements replaced.
    #[must_use]
    pub fn set_both(self, primary: Ndx, secondary: Ndx) -> Self {
        self.set_primary(primary).set_secondary(secondary)
    }
}

impl Element for Instance {
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
