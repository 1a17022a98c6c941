//! Greedy capacity-aware partitioning of color classes.
//!
//! A color class is conflict-free, but rebooting all of it at once also
//! requires every non-redundant instance hosted there to be evacuated
//! simultaneously. [`greedy_clear_nodes`] finds the largest subset of a
//! class that can be cleared *together* under one consistent simulated
//! state; [`partition_non_redundant`] repeats that until the class is
//! exhausted, yielding one sub-group per reboot window.
//!
//! Every window is simulated from the initial cluster state, not from the
//! previous window's state: after a window completes, evacuated instances
//! fail back to their original homes, so the windows are independent.

use crate::cluster::ClusterState;
use crate::container::Ndx;
use crate::errors::{PlanError, PlanResult};
use crate::relocate::locate_instances;
use std::collections::BTreeSet;

/// Evacuation targets for one node: the candidates minus the node itself,
/// restricted to the node's own cluster group, ascending.
fn same_group_peers(
    state: &ClusterState,
    ndx: Ndx,
    candidates: &BTreeSet<Ndx>,
) -> PlanResult<Vec<Ndx>> {
    let group = state.nodes.find(ndx)?.group;
    let mut peers = Vec::new();
    for &peer in candidates {
        if peer != ndx && state.nodes.find(peer)?.group == group {
            peers.push(peer);
        }
    }
    Ok(peers)
}

/// Return the largest subset of `group` whose non-redundant instances can
/// all be evacuated together, plus the simulated state after doing so.
///
/// Nodes are taken in order. A node whose instances fit onto same-group
/// peers is kept and excluded from later landing targets (it is going down
/// with this window); a node whose instances fit nowhere is skipped and left
/// for a later pass. The returned subset can be empty.
///
/// # Errors
///
/// [`PlanError::NotFound`] only for dangling indices; capacity failures are
/// absorbed into the skip branch.
pub fn greedy_clear_nodes(
    state: &ClusterState,
    group: &[Ndx],
    targets: &BTreeSet<Ndx>,
) -> PlanResult<(Vec<Ndx>, ClusterState)> {
    let Some((&ndx, rest)) = group.split_first() else {
        return Ok((Vec::new(), state.clone()));
    };
    let mut othernodes = targets.clone();
    othernodes.remove(&ndx);
    let peers = same_group_peers(state, ndx, &othernodes)?;
    let instances = state.non_redundant_primaries(ndx)?;
    match locate_instances(state, &instances, &peers) {
        Ok(next) => {
            let (mut cleared, end) = greedy_clear_nodes(&next, rest, &othernodes)?;
            cleared.insert(0, ndx);
            Ok((cleared, end))
        }
        Err(PlanError::NoCapacity(_)) => greedy_clear_nodes(state, rest, targets),
        Err(e) => Err(e),
    }
}

/// Split `group` into an ordered list of sub-groups, each of which can be
/// rebooted as one window with its non-redundant instances evacuated to
/// same-group peers in `targets`.
///
/// Each returned state is simulated from `state`, never cumulatively.
///
/// # Errors
///
/// [`PlanError::NoCapacity`] if nodes remain but none of them can be
/// cleared, naming the first stuck node.
pub fn partition_non_redundant(
    state: &ClusterState,
    group: &[Ndx],
    targets: &BTreeSet<Ndx>,
) -> PlanResult<Vec<(Vec<Ndx>, ClusterState)>> {
    let mut remaining: Vec<Ndx> = group.to_vec();
    let mut out = Vec::new();
    while !remaining.is_empty() {
        let (cleared, end) = greedy_clear_nodes(state, &remaining, targets)?;
        if cleared.is_empty() {
            return Err(PlanError::NoCapacity(format!(
                "cannot evacuate the non-redundant instances of node {}",
                remaining[0]
            )));
        }
        remaining.retain(|ndx| !cleared.contains(ndx));
        out.push((cleared, end));
    }
    Ok(out)
}
