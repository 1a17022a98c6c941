//! Fluent builders for cluster snapshots in tests.

use crate::cluster::ClusterData;
use crate::errors::PlanResult;
use crate::loader::{GroupRecord, InstanceRecord, NodeRecord, Snapshot, assemble};

/// Default group used when a node does not name one.
const DEFAULT_GROUP: &str = "default";

/// A fluent builder for cluster snapshots.
///
/// Groups referenced by nodes are registered automatically, so small tests
/// only have to describe nodes and instances.
///
/// # Example
///
/// ```
/// use rollplan::testing::{ClusterBuilder, InstanceSpec, NodeSpec};
///
/// # fn main() -> anyhow::Result<()> {
/// let data = ClusterBuilder::new()
///     .node(NodeSpec::new("node1").master())
///     .node(NodeSpec::new("node2"))
///     .instance(InstanceSpec::new("web0").on("node1").secondary("node2"))
///     .build()?;
/// assert_eq!(data.nodes.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClusterBuilder {
    snapshot: Snapshot,
}

impl ClusterBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group explicitly. Only needed for groups no node uses yet
    /// or when group declaration order matters.
    #[must_use]
    pub fn group(mut self, name: &str) -> Self {
        self.register_group(name);
        self
    }

    /// Add a node.
    #[must_use]
    pub fn node(mut self, spec: NodeSpec) -> Self {
        self.register_group(&spec.record.group);
        self.snapshot.nodes.push(spec.record);
        self
    }

    /// Add an instance.
    #[must_use]
    pub fn instance(mut self, spec: InstanceSpec) -> Self {
        self.snapshot.instances.push(spec.record);
        self
    }

    /// Add a cluster tag.
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.snapshot.tags.push(tag.to_string());
        self
    }

    /// Return the raw snapshot without materializing it.
    #[must_use]
    pub fn snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Materialize the snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::PlanError::InputInvalid`] from assembly, e.g. for
    /// an instance placed on a node that was never added.
    pub fn build(self) -> PlanResult<ClusterData> {
        assemble(&self.snapshot)
    }

    fn register_group(&mut self, name: &str) {
        if !self.snapshot.groups.iter().any(|g| g.name == name) {
            self.snapshot.groups.push(GroupRecord {
                name: name.to_string(),
            });
        }
    }
}

/// A node under construction.
///
/// Defaults: group `"default"`, 4096 MiB memory (2048 free), 204800 MiB disk
/// (102400 free), 8 vCPUs, online, not master, no tags.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub(crate) record: NodeRecord,
}

impl NodeSpec {
    /// Start a node with the default capacities.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            record: NodeRecord {
                name: name.to_string(),
                group: DEFAULT_GROUP.to_string(),
                total_mem: 4096,
                free_mem: 2048,
                total_disk: 204_800,
                free_disk: 102_400,
                total_cpu: 8,
                offline: false,
                master: false,
                tags: Vec::new(),
                max_instances: None,
            },
        }
    }

    /// Put the node in the named group.
    #[must_use]
    pub fn group(mut self, name: &str) -> Self {
        self.record.group = name.to_string();
        self
    }

    /// Mark the node as the cluster master.
    #[must_use]
    pub fn master(mut self) -> Self {
        self.record.master = true;
        self
    }

    /// Mark the node offline.
    #[must_use]
    pub fn offline(mut self) -> Self {
        self.record.offline = true;
        self
    }

    /// Set total and free memory, MiB.
    #[must_use]
    pub fn mem(mut self, total: i64, free: i64) -> Self {
        self.record.total_mem = total;
        self.record.free_mem = free;
        self
    }

    /// Set total and free disk, MiB.
    #[must_use]
    pub fn disk(mut self, total: i64, free: i64) -> Self {
        self.record.total_disk = total;
        self.record.free_disk = free;
        self
    }

    /// Set the vCPU capacity.
    #[must_use]
    pub fn cpus(mut self, total: i32) -> Self {
        self.record.total_cpu = total;
        self
    }

    /// Attach a node tag.
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.record.tags.push(tag.to_string());
        self
    }

    /// Cap the number of primary instances.
    #[must_use]
    pub fn max_instances(mut self, cap: usize) -> Self {
        self.record.max_instances = Some(cap);
        self
    }
}

/// An instance under construction.
///
/// Defaults: 512 MiB memory, 10240 MiB disk, 1 vCPU, running, no secondary.
#[derive(Debug, Clone)]
pub struct InstanceSpec {
    pub(crate) record: InstanceRecord,
}

impl InstanceSpec {
    /// Start an instance with the default footprint. Place it with
    /// [`InstanceSpec::on`].
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            record: InstanceRecord {
                name: name.to_string(),
                mem: 512,
                disk: 10_240,
                vcpus: 1,
                running: true,
                primary: String::new(),
                secondary: None,
            },
        }
    }

    /// Set the primary node by name.
    #[must_use]
    pub fn on(mut self, node: &str) -> Self {
        self.record.primary = node.to_string();
        self
    }

    /// Set the secondary node by name, making the instance redundant.
    #[must_use]
    pub fn secondary(mut self, node: &str) -> Self {
        self.record.secondary = Some(node.to_string());
        self
    }

    /// Set the memory footprint, MiB.
    #[must_use]
    pub fn mem(mut self, mem: i64) -> Self {
        self.record.mem = mem;
        self
    }

    /// Set the disk footprint, MiB.
    #[must_use]
    pub fn disk(mut self, disk: i64) -> Self {
        self.record.disk = disk;
        self
    }

    /// Set the vCPU count.
    #[must_use]
    pub fn vcpus(mut self, vcpus: i32) -> Self {
        self.record.vcpus = vcpus;
        self
    }

    /// Mark the instance as not running.
    #[must_use]
    pub fn stopped(mut self) -> Self {
        self.record.running = false;
        self
    }
}
