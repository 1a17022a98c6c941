//! Instance relocation primitives used by evacuation simulation.
//!
//! [`move_instance`] rewrites a single instance's primary placement and the
//! bookkeeping of both affected nodes, producing a new cluster state. On top
//! of it, [`locate_instance`] tries a list of candidate targets and keeps the
//! first that fits, and [`locate_instances`] threads a state through a whole
//! list of instances, failing on the first one that fits nowhere.
//!
//! Moves are capacity-checked: a target that would end up with negative free
//! memory or disk rejects the instance, which is what drives the greedy
//! partitioner's "skip this node in this pass" branch.

use crate::cluster::ClusterState;
use crate::container::{Idx, Ndx};
use crate::errors::{PlanError, PlanResult};

/// Move instance `idx` to primary node `target`, returning the new state.
///
/// The instance's resources are returned to its current primary and claimed
/// on the target; the instance's primary pointer is rewritten; all three
/// entities are reinstalled into the state. Moving an instance onto the node
/// it already occupies is a no-op that succeeds with an equal state.
///
/// # Errors
///
/// [`PlanError::NotFound`] for a dangling instance or node index, or
/// [`PlanError::CapacityExceeded`] when the target cannot fit the instance.
pub fn move_instance(state: &ClusterState, idx: Idx, target: Ndx) -> PlanResult<ClusterState> {
    let inst = state.instances.find(idx)?;
    let source = inst.primary;
    if source == target {
        return Ok(state.clone());
    }
    let old_node = state.nodes.find(source)?.clone();
    let new_node = state.nodes.find(target)?.clone();
    let old_node = old_node.remove_primary(inst);
    let new_node = new_node.add_primary(inst, false)?;
    let inst = inst.clone().set_primary(target);
    Ok(ClusterState {
        nodes: state.nodes.add_two(source, old_node, target, new_node),
        instances: state.instances.add(idx, inst),
    })
}

/// Place instance `idx` on the first candidate in `targets` that fits.
///
/// Candidates are tried in the order given; the scan stops at the first
/// successful move.
///
/// # Errors
///
/// [`PlanError::NoCapacity`] if every candidate rejects the instance (or the
/// candidate list is empty).
pub fn locate_instance(
    state: &ClusterState,
    idx: Idx,
    targets: &[Ndx],
) -> PlanResult<ClusterState> {
    for &ndx in targets {
        if let Ok(next) = move_instance(state, idx, ndx) {
            return Ok(next);
        }
    }
    Err(PlanError::NoCapacity(format!(
        "instance {idx} fits on none of {} candidate nodes",
        targets.len()
    )))
}

/// Place every instance in `idxs` somewhere in `targets`, threading the
/// state through each placement.
///
/// # Errors
///
/// [`PlanError::NoCapacity`] from the first instance that fits nowhere.
pub fn locate_instances(
    state: &ClusterState,
    idxs: &[Idx],
    targets: &[Ndx],
) -> PlanResult<ClusterState> {
    let mut current = state.clone();
    for &idx in idxs {
        current = locate_instance(&current, idx, targets)?;
    }
    Ok(current)
}
