//! Reboot plan assembly.
//!
//! [`build_plan`] runs the whole pipeline over a cluster snapshot:
//!
//! 1. check the master-count precondition,
//! 2. filter the node set (offline, group restriction, tag filter, optional
//!    non-redundant skip),
//! 3. build the conflict graph in the flavor the options select,
//! 4. run every coloring heuristic and keep the smallest,
//! 5. refine each color class through the capacity partitioner (unless
//!    non-redundant instances are ignored),
//! 6. order groups by descending size, rotate the master's group (and the
//!    master within it) to the end,
//! 7. derive the per-group instance moves from the simulated states.
//!
//! The result is a pure value; rendering it is `render`'s job.

use crate::cluster::{ClusterData, ClusterState};
use crate::coloring::{ColoringStats, best_coloring};
use crate::container::{Idx, Ndx};
use crate::errors::{PlanError, PlanResult};
use crate::graph::Graph;
use crate::partition::partition_non_redundant;
use log::{debug, trace, warn};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FormatResult};

/// Options recognized by the planner.
///
/// Rendering-only switches (`print_moves`, `no_headers`, verbosity) live in
/// [`crate::render::RenderOptions`].
#[derive(Debug, Clone, Default)]
pub struct PlannerOptions {
    /// Restrict planning to the named cluster group. Unknown names are
    /// fatal.
    pub group: Option<String>,
    /// Restrict planning to nodes carrying at least one of these tags.
    pub node_tags: Option<Vec<String>>,
    /// Plan for offline maintenance: every redundant instance separates its
    /// nodes, running or not (the all-instance graph flavor).
    pub offline_maintenance: bool,
    /// Drop nodes hosting any non-redundant primary from planning entirely.
    pub skip_non_redundant: bool,
    /// Do not evacuate non-redundant instances; every color class becomes a
    /// single reboot group with no moves.
    pub ignore_non_redundant: bool,
    /// Emit only the first reboot group.
    pub one_step_only: bool,
    /// Downgrade a missing master from fatal to a warning.
    pub force: bool,
}

/// A single evacuation move: an instance and its new primary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstanceMove {
    /// Instance being evacuated.
    pub instance: Idx,
    /// Node it lands on.
    pub target: Ndx,
}

/// One reboot window: the nodes going down together and the moves that must
/// happen first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebootGroup {
    /// Nodes rebooted in this window. The master, if present, is last.
    pub nodes: Vec<Ndx>,
    /// Evacuation moves for this window, relative to the original state.
    pub moves: Vec<InstanceMove>,
}

/// An ordered reboot plan for the cluster.
#[derive(Debug, Clone)]
pub struct RebootPlan {
    /// Reboot windows in execution order.
    pub groups: Vec<RebootGroup>,
    /// Name of the coloring algorithm that won the selection.
    pub algorithm: &'static str,
    /// Per-algorithm color counts.
    pub stats: Vec<ColoringStats>,
    /// The conflict graph the plan was colored on.
    pub graph: Graph,
}

impl RebootPlan {
    /// Summarize the planning decisions for verbose output.
    #[must_use]
    pub fn explain(&self) -> PlanExplanation {
        PlanExplanation {
            colorings: self.stats.clone(),
            selected: self.algorithm,
            reboot_groups: self.groups.len(),
            total_moves: self.groups.iter().map(|g| g.moves.len()).sum(),
        }
    }
}

/// Summary of the planning decisions, printable at high verbosity.
#[derive(Debug, Clone, Serialize)]
pub struct PlanExplanation {
    /// Color counts per algorithm, in declaration order.
    pub colorings: Vec<ColoringStats>,
    /// The selected algorithm.
    pub selected: &'static str,
    /// Number of reboot windows after capacity refinement.
    pub reboot_groups: usize,
    /// Total evacuation moves across all windows.
    pub total_moves: usize,
}

impl PlanExplanation {
    /// Export the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Display for PlanExplanation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        writeln!(f, "┌─ COLORING HEURISTICS ────────────────────────┐")?;
        for s in &self.colorings {
            let marker = if s.algorithm == self.selected {
                " (selected)"
            } else {
                ""
            };
            writeln!(f, "│ {:<10} {:>3} colors{marker}", s.algorithm, s.colors)?;
        }
        writeln!(f, "└──────────────────────────────────────────────┘")?;
        writeln!(f, "reboot groups: {}", self.reboot_groups)?;
        writeln!(f, "evacuation moves: {}", self.total_moves)?;
        Ok(())
    }
}

/// Assemble a reboot plan for the snapshot under the given options.
///
/// # Errors
///
/// - [`PlanError::InputInvalid`] for multiple masters, a missing master
///   without `force`, an unknown group name, or malformed node references.
/// - [`PlanError::NoCapacity`] when non-redundant evacuation is required but
///   impossible for some node.
pub fn build_plan(data: &ClusterData, opts: &PlannerOptions) -> PlanResult<RebootPlan> {
    let state = data.state();
    let master = check_master(data, opts.force)?;
    let vertices = planning_vertices(data, &state, opts)?;
    if vertices.is_empty() {
        return Ok(RebootPlan {
            groups: Vec::new(),
            algorithm: "",
            stats: Vec::new(),
            graph: Graph::default(),
        });
    }

    let graph = if opts.offline_maintenance {
        Graph::build(&state, &vertices)?
    } else {
        Graph::build_reboot(&state, &vertices)?
    };
    trace!("conflict graph:\n{}", graph.dump());

    let (algorithm, coloring, stats) = best_coloring(&graph);
    for s in &stats {
        debug!("coloring {} used {} colors", s.algorithm, s.colors);
    }
    debug!("selected coloring {algorithm}");

    let targets: BTreeSet<Ndx> = state.online_nodes().into_iter().collect();
    let mut groups: Vec<(Vec<Ndx>, ClusterState)> = Vec::new();
    for class in coloring.values() {
        if opts.ignore_non_redundant {
            groups.push((class.clone(), state.clone()));
        } else {
            groups.extend(partition_non_redundant(&state, class, &targets)?);
        }
    }

    groups.sort_by_key(|(nodes, _)| Reverse(nodes.len()));
    if let Some(master) = master
        && vertices.contains(&master)
        && let Some(pos) = groups.iter().position(|(nodes, _)| nodes.contains(&master))
    {
        let mut master_group = groups.remove(pos);
        master_group.0.retain(|&ndx| ndx != master);
        master_group.0.push(master);
        groups.push(master_group);
    }
    if opts.one_step_only {
        groups.truncate(1);
    }

    let groups = groups
        .into_iter()
        .map(|(nodes, after)| {
            Ok(RebootGroup {
                nodes,
                moves: derive_moves(&state, &after)?,
            })
        })
        .collect::<PlanResult<Vec<_>>>()?;

    Ok(RebootPlan {
        groups,
        algorithm,
        stats,
        graph,
    })
}

/// Enforce the master-count precondition and return the master's index.
///
/// Exactly one master is the expected shape. Zero masters is fatal unless
/// `force` downgrades it to a warning; more than one is always fatal.
fn check_master(data: &ClusterData, force: bool) -> PlanResult<Option<Ndx>> {
    let masters = data.masters();
    match masters.as_slice() {
        [master] => Ok(Some(*master)),
        [] if force => {
            warn!("snapshot has no master node; planning without a master-last constraint");
            Ok(None)
        }
        [] => Err(PlanError::InputInvalid(
            "cluster snapshot has no master node".to_string(),
        )),
        _ => Err(PlanError::InputInvalid(format!(
            "cluster snapshot has {} master nodes",
            masters.len()
        ))),
    }
}

/// Apply the offline, group, tag and non-redundant filters to the node set.
fn planning_vertices(
    data: &ClusterData,
    state: &ClusterState,
    opts: &PlannerOptions,
) -> PlanResult<BTreeSet<Ndx>> {
    let group_restriction = match &opts.group {
        Some(name) => match data.groups.find_by_name(name) {
            Ok(group) => Some(group.idx),
            Err(_) => {
                return Err(PlanError::InputInvalid(format!(
                    "unknown cluster group {name:?}"
                )));
            }
        },
        None => None,
    };
    let mut vertices = BTreeSet::new();
    for (ndx, node) in data.nodes.iter() {
        if node.offline {
            continue;
        }
        if let Some(gdx) = group_restriction
            && node.group != gdx
        {
            continue;
        }
        if let Some(tags) = &opts.node_tags
            && !tags.iter().any(|t| node.tags.contains(t))
        {
            continue;
        }
        if opts.skip_non_redundant && !state.non_redundant_primaries(ndx)?.is_empty() {
            continue;
        }
        vertices.insert(ndx);
    }
    Ok(vertices)
}

/// Instances whose primary differs between two states, with their new homes.
fn derive_moves(before: &ClusterState, after: &ClusterState) -> PlanResult<Vec<InstanceMove>> {
    let mut moves = Vec::new();
    for (idx, inst) in before.instances.iter() {
        let now = after.instances.find(idx)?;
        if now.primary != inst.primary {
            moves.push(InstanceMove {
                instance: idx,
                target: now.primary,
            });
        }
    }
    Ok(moves)
}
