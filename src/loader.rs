//! Cluster snapshot ingestion.
//!
//! This module owns the serde schema for cluster snapshots
//! ([`Snapshot`] and its records) and the materialization step
//! ([`assemble`]) that resolves names to dense indices, wires the node
//! hosting lists, and validates references. Two on-disk formats feed it:
//!
//! - **JSON** (feature `io-jsonl`): one [`Snapshot`] document.
//! - **Text** (feature `io-text`): the pipe-delimited dump format, one
//!   record per line tagged `group`, `node`, `instance` or `tag`.
//!
//! # Notes
//! - Indices are assigned densely in input order, so a snapshot loads into
//!   the same `ClusterData` every time.
//! - Hosting lists are wired with forced adds: the snapshot reflects
//!   reality, and reality may be overcommitted.

use crate::cluster::{ClusterData, Group};
use crate::container::{Container, Gdx, Ndx};
use crate::errors::{PlanError, PlanResult};
use crate::instance::{Instance, NO_SECONDARY};
use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cluster snapshot as read from disk, before name resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Node groups, in index order.
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    /// Nodes, in index order.
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    /// Instances, in index order.
    #[serde(default)]
    pub instances: Vec<InstanceRecord>,
    /// Cluster-level tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Instance policy, carried verbatim.
    #[serde(default)]
    pub ipolicy: Option<serde_json::Value>,
}

/// A node group by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Group name; must be unique.
    pub name: String,
}

/// A node with its capacities, by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node name; must be unique.
    pub name: String,
    /// Name of the group the node belongs to.
    pub group: String,
    /// Total memory, MiB.
    pub total_mem: i64,
    /// Free memory, MiB.
    pub free_mem: i64,
    /// Total disk, MiB.
    pub total_disk: i64,
    /// Free disk, MiB.
    pub free_disk: i64,
    /// Virtual CPU capacity.
    pub total_cpu: i32,
    /// Offline flag.
    #[serde(default)]
    pub offline: bool,
    /// Master flag.
    #[serde(default)]
    pub master: bool,
    /// Node tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional ceiling on hosted primary instances.
    #[serde(default)]
    pub max_instances: Option<usize>,
}

/// An instance with its placement, by node names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Instance name; must be unique.
    pub name: String,
    /// Memory footprint, MiB.
    pub mem: i64,
    /// Disk footprint, MiB.
    pub disk: i64,
    /// Virtual CPUs.
    pub vcpus: i32,
    /// Running flag.
    pub running: bool,
    /// Name of the primary node.
    pub primary: String,
    /// Name of the secondary node, if any.
    #[serde(default)]
    pub secondary: Option<String>,
}

/// Materialize a snapshot into a `ClusterData`, resolving names to indices
/// and wiring the per-node hosting lists.
///
/// # Errors
///
/// [`PlanError::InputInvalid`] for duplicate names, unknown group or node
/// references, or an instance naming the same node twice.
pub fn assemble(snapshot: &Snapshot) -> PlanResult<ClusterData> {
    let mut group_ndx: BTreeMap<&str, Gdx> = BTreeMap::new();
    let mut groups = Vec::new();
    for (i, record) in snapshot.groups.iter().enumerate() {
        let gdx = Gdx::try_from(i)
            .map_err(|_| PlanError::InputInvalid("group count overflows index".to_string()))?;
        if group_ndx.insert(record.name.as_str(), gdx).is_some() {
            return Err(PlanError::InputInvalid(format!(
                "duplicate group name {:?}",
                record.name
            )));
        }
        groups.push(Group::new(gdx, &record.name));
    }

    let mut node_ndx: BTreeMap<&str, Ndx> = BTreeMap::new();
    let mut nodes: BTreeMap<Ndx, Node> = BTreeMap::new();
    for (i, record) in snapshot.nodes.iter().enumerate() {
        let ndx = Ndx::try_from(i)
            .map_err(|_| PlanError::InputInvalid("node count overflows index".to_string()))?;
        let &gdx = group_ndx.get(record.group.as_str()).ok_or_else(|| {
            PlanError::InputInvalid(format!(
                "node {:?} references unknown group {:?}",
                record.name, record.group
            ))
        })?;
        if node_ndx.insert(record.name.as_str(), ndx).is_some() {
            return Err(PlanError::InputInvalid(format!(
                "duplicate node name {:?}",
                record.name
            )));
        }
        let mut node = Node::new(
            ndx,
            &record.name,
            gdx,
            record.total_mem,
            record.free_mem,
            record.total_disk,
            record.free_disk,
            record.total_cpu,
        );
        node.offline = record.offline;
        node.master = record.master;
        node.tags = record.tags.iter().cloned().collect();
        node.max_instances = record.max_instances;
        nodes.insert(ndx, node);
    }

    let mut instances = Vec::new();
    for (i, record) in snapshot.instances.iter().enumerate() {
        let idx = i32::try_from(i)
            .map_err(|_| PlanError::InputInvalid("instance count overflows index".to_string()))?;
        let &primary = node_ndx.get(record.primary.as_str()).ok_or_else(|| {
            PlanError::InputInvalid(format!(
                "instance {:?} references unknown primary node {:?}",
                record.name, record.primary
            ))
        })?;
        let secondary = match &record.secondary {
            Some(name) => *node_ndx.get(name.as_str()).ok_or_else(|| {
                PlanError::InputInvalid(format!(
                    "instance {:?} references unknown secondary node {name:?}",
                    record.name
                ))
            })?,
            None => NO_SECONDARY,
        };
        if primary == secondary {
            return Err(PlanError::InputInvalid(format!(
                "instance {:?} has node {:?} as both primary and secondary",
                record.name, record.primary
            )));
        }
        if instances.iter().any(|e: &Instance| e.name == record.name) {
            return Err(PlanError::InputInvalid(format!(
                "duplicate instance name {:?}",
                record.name
            )));
        }
        let inst = Instance::new(
            idx,
            &record.name,
            record.mem,
            record.disk,
            record.vcpus,
            record.running,
        )
        .set_both(primary, secondary);

        // Snapshot placements are facts, not requests: wire them forced.
        if let Some(host) = nodes.remove(&primary) {
            nodes.insert(primary, host.add_primary(&inst, true)?);
        }
        if secondary != NO_SECONDARY
            && let Some(host) = nodes.remove(&secondary)
        {
            nodes.insert(secondary, host.add_secondary(&inst));
        }
        instances.push(inst);
    }

    Ok(ClusterData {
        groups: Container::from_list(groups),
        nodes: Container::from_list(nodes.into_values().collect()),
        instances: Container::from_list(instances),
        tags: snapshot.tags.clone(),
        ipolicy: snapshot.ipolicy.clone(),
    })
}

/// Read a JSON snapshot document and materialize it.
///
/// # Errors
///
/// I/O and parse failures with file context; [`PlanError`] kinds from
/// [`assemble`] wrapped with the same context.
#[cfg(feature = "io-jsonl")]
pub fn read_json_snapshot(path: impl AsRef<std::path::Path>) -> anyhow::Result<ClusterData> {
    use anyhow::Context;
    let path = path.as_ref();
    let f = std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("parse snapshot {}", path.display()))?;
    assemble(&snapshot).with_context(|| format!("materialize snapshot {}", path.display()))
}

/// Read a pipe-delimited text snapshot and materialize it.
///
/// One record per line, tagged by its first field:
///
/// ```text
/// group|default
/// node|node1|default|4096|2048|204800|102400|8|N|Y|tag1,tag2
/// instance|web0|512|10240|1|Y|node1|node2
/// tag|maintenance
/// ```
///
/// Trailing optional fields (node tags, instance secondary) may be omitted;
/// lines starting with `#` are comments.
///
/// # Errors
///
/// I/O and parse failures with file and line context; [`PlanError`] kinds
/// from [`assemble`] wrapped with the same context.
#[cfg(feature = "io-text")]
pub fn read_text_snapshot(path: impl AsRef<std::path::Path>) -> anyhow::Result<ClusterData> {
    use anyhow::{Context, bail};
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;

    let parse_bool = |field: &str| -> anyhow::Result<bool> {
        match field {
            "Y" => Ok(true),
            "N" => Ok(false),
            other => bail!("expected Y or N, got {other:?}"),
        }
    };

    let mut snapshot = Snapshot::default();
    for (lineno, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("read {}", path.display()))?;
        let line = lineno + 1;
        let field = |i: usize| -> anyhow::Result<&str> {
            record
                .get(i)
                .ok_or_else(|| anyhow::anyhow!("line {line}: missing field {i}"))
        };
        match field(0)? {
            "group" => snapshot.groups.push(GroupRecord {
                name: field(1)?.to_string(),
            }),
            "node" => snapshot.nodes.push(NodeRecord {
                name: field(1)?.to_string(),
                group: field(2)?.to_string(),
                total_mem: field(3)?.parse().with_context(|| format!("line {line}: total_mem"))?,
                free_mem: field(4)?.parse().with_context(|| format!("line {line}: free_mem"))?,
                total_disk: field(5)?
                    .parse()
                    .with_context(|| format!("line {line}: total_disk"))?,
                free_disk: field(6)?
                    .parse()
                    .with_context(|| format!("line {line}: free_disk"))?,
                total_cpu: field(7)?.parse().with_context(|| format!("line {line}: total_cpu"))?,
                offline: parse_bool(field(8)?).with_context(|| format!("line {line}: offline"))?,
                master: parse_bool(field(9)?).with_context(|| format!("line {line}: master"))?,
                tags: match record.get(10) {
                    Some("") | None => Vec::new(),
                    Some(tags) => tags.split(',').map(str::to_string).collect(),
                },
                max_instances: None,
            }),
            "instance" => snapshot.instances.push(InstanceRecord {
                name: field(1)?.to_string(),
                mem: field(2)?.parse().with_context(|| format!("line {line}: mem"))?,
                disk: field(3)?.parse().with_context(|| format!("line {line}: disk"))?,
                vcpus: field(4)?.parse().with_context(|| format!("line {line}: vcpus"))?,
                running: parse_bool(field(5)?).with_context(|| format!("line {line}: running"))?,
                primary: field(6)?.to_string(),
                secondary: match record.get(7) {
                    Some("") | None => None,
                    Some(name) => Some(name.to_string()),
                },
            }),
            "tag" => snapshot.tags.push(field(1)?.to_string()),
            other => bail!("line {line}: unknown record type {other:?}"),
        }
    }
    assemble(&snapshot).with_context(|| format!("materialize snapshot {}", path.display()))
}
