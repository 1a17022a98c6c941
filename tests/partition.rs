use rollplan::partition::{greedy_clear_nodes, partition_non_redundant};
use rollplan::testing::{ClusterBuilder, InstanceSpec, NodeSpec, evac_triple, tight_triple};
use rollplan::PlanError;
use std::collections::BTreeSet;

fn all_targets(n: i32) -> BTreeSet<i32> {
    (0..n).collect()
}

#[test]
fn greedy_clears_what_fits_and_skips_the_rest() -> anyhow::Result<()> {
    // node1 hosts "solo"; only node2 can absorb it, so clearing node1 parks
    // the instance there and node2 drops out of the window.
    let state = evac_triple()?.state();
    let (cleared, end) = greedy_clear_nodes(&state, &[0, 1, 2], &all_targets(3))?;
    assert_eq!(cleared, vec![0, 2]);
    assert_eq!(end.instances.find(0)?.primary, 1);
    Ok(())
}

#[test]
fn greedy_on_an_empty_group_is_trivial() -> anyhow::Result<()> {
    let state = evac_triple()?.state();
    let (cleared, end) = greedy_clear_nodes(&state, &[], &all_targets(3))?;
    assert!(cleared.is_empty());
    assert_eq!(end, state);
    Ok(())
}

#[test]
fn greedy_skips_unclearable_nodes_entirely() -> anyhow::Result<()> {
    // no peer has room for "solo": node1 is skipped, the idle nodes clear.
    let state = tight_triple()?.state();
    let (cleared, end) = greedy_clear_nodes(&state, &[0, 1, 2], &all_targets(3))?;
    assert_eq!(cleared, vec![1, 2]);
    assert_eq!(end, state);
    Ok(())
}

#[test]
fn partition_emits_windows_simulated_from_the_initial_state() -> anyhow::Result<()> {
    let state = evac_triple()?.state();
    let windows = partition_non_redundant(&state, &[0, 1, 2], &all_targets(3))?;
    assert_eq!(windows.len(), 2);

    let (first, first_state) = &windows[0];
    assert_eq!(first, &vec![0, 2]);
    assert_eq!(first_state.instances.find(0)?.primary, 1);

    // the second window starts over from the initial state: the instance is
    // back home and node2 reboots with nothing to move.
    let (second, second_state) = &windows[1];
    assert_eq!(second, &vec![1]);
    assert_eq!(second_state.instances.find(0)?.primary, 0);
    assert_eq!(second_state, &state);
    Ok(())
}

#[test]
fn partition_fails_when_a_node_cannot_be_cleared() -> anyhow::Result<()> {
    let state = tight_triple()?.state();
    assert!(matches!(
        partition_non_redundant(&state, &[0, 1, 2], &all_targets(3)),
        Err(PlanError::NoCapacity(_))
    ));
    Ok(())
}

#[test]
fn evacuation_stays_within_the_cluster_group() -> anyhow::Result<()> {
    // the only roomy peer is in another group, so clearing node1 fails even
    // though capacity exists elsewhere.
    let data = ClusterBuilder::new()
        .node(NodeSpec::new("node1").group("rack1").master())
        .node(NodeSpec::new("node2").group("rack1").mem(4096, 100))
        .node(NodeSpec::new("node3").group("rack2"))
        .instance(InstanceSpec::new("solo").on("node1"))
        .build()?;
    let state = data.state();
    let (cleared, _) = greedy_clear_nodes(&state, &[0], &all_targets(3))?;
    assert!(cleared.is_empty());
    assert!(matches!(
        partition_non_redundant(&state, &[0], &all_targets(3)),
        Err(PlanError::NoCapacity(_))
    ));
    Ok(())
}

#[test]
fn cleared_nodes_stop_being_landing_targets() -> anyhow::Result<()> {
    // both nodes host a solo instance and both fit on node3; clearing them
    // together must not land node2's instance on the already-cleared node1.
    let data = ClusterBuilder::new()
        .node(NodeSpec::new("node1").master())
        .node(NodeSpec::new("node2"))
        .node(NodeSpec::new("node3"))
        .instance(InstanceSpec::new("a").on("node1"))
        .instance(InstanceSpec::new("b").on("node2"))
        .build()?;
    let state = data.state();
    let (cleared, end) = greedy_clear_nodes(&state, &[0, 1], &all_targets(3))?;
    assert_eq!(cleared, vec![0, 1]);
    assert_eq!(end.instances.find(0)?.primary, 2);
    assert_eq!(end.instances.find(1)?.primary, 2);
    Ok(())
}
