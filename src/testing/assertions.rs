//! Assertion functions for coloring and plan invariants.
//!
//! These panic with messages that include both the expected and the actual
//! shape, so a failing planner test reads like a diff.

use crate::cluster::ClusterData;
use crate::coloring::ColorMap;
use crate::graph::Graph;
use crate::planner::RebootPlan;
use std::collections::BTreeSet;

/// Assert that `coloring` is a proper coloring of `graph` and that its
/// classes partition the graph's vertex set.
///
/// # Panics
///
/// Panics naming the violating edge, the duplicated vertex, or the vertex
/// set difference.
pub fn assert_proper_coloring(graph: &Graph, coloring: &ColorMap) {
    for (color, class) in coloring {
        for &u in class {
            for &v in class {
                assert!(
                    u == v || !graph.has_edge(u, v),
                    "color {color} holds both endpoints of edge ({u}, {v}):\n  class: {class:?}"
                );
            }
        }
    }

    let mut seen = BTreeSet::new();
    for (color, class) in coloring {
        for &v in class {
            assert!(
                seen.insert(v),
                "vertex {v} appears in color {color} and an earlier class"
            );
        }
    }
    let vertices: BTreeSet<_> = graph.vertices().into_iter().collect();
    assert_eq!(
        seen, vertices,
        "color classes do not cover the vertex set:\n  colored: {seen:?}\n  vertices: {vertices:?}"
    );
}

/// Resolve a plan's groups to node names, in plan order.
///
/// # Panics
///
/// Panics if the plan references a node missing from the snapshot.
#[must_use]
pub fn group_names(data: &ClusterData, plan: &RebootPlan) -> Vec<Vec<String>> {
    plan.groups
        .iter()
        .map(|g| {
            g.nodes
                .iter()
                .map(|&ndx| match data.nodes.find(ndx) {
                    Ok(node) => node.name.clone(),
                    Err(e) => panic!("plan references node {ndx} not in snapshot: {e}"),
                })
                .collect()
        })
        .collect()
}

/// Resolve a plan's moves to `(instance, target)` name pairs, per group.
///
/// # Panics
///
/// Panics if the plan references an entity missing from the snapshot.
#[must_use]
pub fn move_names(data: &ClusterData, plan: &RebootPlan) -> Vec<Vec<(String, String)>> {
    plan.groups
        .iter()
        .map(|g| {
            g.moves
                .iter()
                .map(|mv| {
                    let inst = match data.instances.find(mv.instance) {
                        Ok(inst) => inst.name.clone(),
                        Err(e) => panic!("plan references instance {} not in snapshot: {e}", mv.instance),
                    };
                    let node = match data.nodes.find(mv.target) {
                        Ok(node) => node.name.clone(),
                        Err(e) => panic!("plan references node {} not in snapshot: {e}", mv.target),
                    };
                    (inst, node)
                })
                .collect()
        })
        .collect()
}

/// Assert the plan's groups match `expected` node names, in order.
///
/// # Panics
///
/// Panics with the full actual and expected group listings.
pub fn assert_group_names(data: &ClusterData, plan: &RebootPlan, expected: &[&[&str]]) {
    let actual = group_names(data, plan);
    let expected: Vec<Vec<String>> = expected
        .iter()
        .map(|g| g.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(
        actual, expected,
        "reboot groups mismatch:\n  expected: {expected:?}\n  actual: {actual:?}"
    );
}

/// Assert the plan schedules no evacuation moves at all.
///
/// # Panics
///
/// Panics naming the first group that carries moves.
pub fn assert_no_moves(plan: &RebootPlan) {
    for (i, group) in plan.groups.iter().enumerate() {
        assert!(
            group.moves.is_empty(),
            "group {i} carries {} unexpected moves: {:?}",
            group.moves.len(),
            group.moves
        );
    }
}
