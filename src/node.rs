//! Virtualization host ("node") model and capacity bookkeeping.
//!
//! A node tracks the instances it hosts (primary and secondary lists of
//! instance indices) together with its free memory, free disk and vCPU
//! allocation. Placement mutators keep those in sync:
//! - [`Node::add_primary`] is capacity-checked unless forced; a forced add
//!   always succeeds on a known node but may leave free resources negative,
//!   which simulation states are allowed to carry.
//! - [`Node::remove_primary`] is infallible and returns the resources.
//! - [`Node::add_secondary`] / [`Node::remove_secondary`] track the disk
//!   held by standby replicas.
//!
//! All mutators consume and return the node; installing the result into a
//! cluster state is the caller's job.

use crate::container::{Element, Gdx, Idx, Ndx};
use crate::errors::{PlanError, PlanResult, Resource};
use crate::instance::Instance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A physical host in the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable index into the node container.
    pub idx: Ndx,
    /// Human-readable name.
    pub name: String,
    /// Cluster group the node belongs to. Evacuations stay inside a group.
    pub group: Gdx,
    /// Indices of instances with this node as primary.
    pub p_list: Vec<Idx>,
    /// Indices of instances with this node as secondary.
    pub s_list: Vec<Idx>,
    /// Total memory, MiB.
    pub total_mem: i64,
    /// Free memory, MiB. May be negative in simulation states.
    pub free_mem: i64,
    /// Total disk, MiB.
    pub total_disk: i64,
    /// Free disk, MiB. May be negative in simulation states.
    pub free_disk: i64,
    /// Virtual CPU capacity.
    pub total_cpu: i32,
    /// Virtual CPUs allocated to primary instances.
    pub used_cpu: i32,
    /// Optional ceiling on the number of primary instances.
    pub max_instances: Option<usize>,
    /// Offline nodes host nothing and are never planned or used as targets.
    pub offline: bool,
    /// Whether this node runs the cluster coordination daemon.
    pub master: bool,
    /// Node tags, used by the planner's tag filter.
    pub tags: BTreeSet<String>,
}

impl Node {
    /// Create an online, non-master node with no instances.
    #[must_use]
    pub fn new(
        idx: Ndx,
        name: &str,
        group: Gdx,
        total_mem: i64,
        free_mem: i64,
        total_disk: i64,
        free_disk: i64,
        total_cpu: i32,
    ) -> Self {
        Self {
            idx,
            name: name.to_string(),
            group,
            p_list: Vec::new(),
            s_list: Vec::new(),
            total_mem,
            free_mem,
            total_disk,
            free_disk,
            total_cpu,
            used_cpu: 0,
            max_instances: None,
            offline: false,
            master: false,
            tags: BTreeSet::new(),
        }
    }

    /// Host `inst` as a primary instance.
    ///
    /// Without `force` the add is rejected if it would leave free memory or
    /// disk negative, overcommit vCPUs, or exceed the configured instance
    /// ceiling. With `force` the add always succeeds and the node may carry
    /// negative free resources afterwards.
    ///
    /// # Errors
    ///
    /// [`PlanError::CapacityExceeded`] naming the first exhausted resource.
    pub fn add_primary(mut self, inst: &Instance, force: bool) -> PlanResult<Self> {
        let new_mem = self.free_mem - inst.mem;
        let new_disk = self.free_disk - inst.disk;
        let new_cpu = self.used_cpu + inst.vcpus;
        if !force {
            if let Some(cap) = self.max_instances
                && self.p_list.len() + 1 > cap
            {
                return Err(PlanError::CapacityExceeded(Resource::InstanceCount));
            }
            if new_mem < 0 {
                return Err(PlanError::CapacityExceeded(Resource::Memory));
            }
            if new_disk < 0 {
                return Err(PlanError::CapacityExceeded(Resource::Disk));
            }
            if new_cpu > self.total_cpu {
                return Err(PlanError::CapacityExceeded(Resource::Cpu));
            }
        }
        self.p_list.push(inst.idx);
        self.free_mem = new_mem;
        self.free_disk = new_disk;
        self.used_cpu = new_cpu;
        Ok(self)
    }

    /// Stop hosting `inst` as a primary instance, returning its resources.
    #[must_use]
    pub fn remove_primary(mut self, inst: &Instance) -> Self {
        self.p_list.retain(|&i| i != inst.idx);
        self.free_mem += inst.mem;
        self.free_disk += inst.disk;
        self.used_cpu -= inst.vcpus;
        self
    }

    /// Hold a standby replica for `inst`. Replicas consume disk only.
    #[must_use]
    pub fn add_secondary(mut self, inst: &Instance) -> Self {
        self.s_list.push(inst.idx);
        self.free_disk -= inst.disk;
        self
    }

    /// Drop the standby replica for `inst`.
    #[must_use]
    pub fn remove_secondary(mut self, inst: &Instance) -> Self {
        self.s_list.retain(|&i| i != inst.idx);
        self.free_disk += inst.disk;
        self
    }
}

impl Element for Node {
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
