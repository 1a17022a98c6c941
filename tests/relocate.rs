use rollplan::relocate::{locate_instance, locate_instances, move_instance};
use rollplan::testing::{ClusterBuilder, InstanceSpec, NodeSpec};
use rollplan::{ClusterState, PlanError};

fn triple() -> anyhow::Result<ClusterState> {
    let data = ClusterBuilder::new()
        .node(NodeSpec::new("node1").master())
        .node(NodeSpec::new("node2"))
        .node(NodeSpec::new("node3").mem(4096, 100))
        .instance(InstanceSpec::new("solo").on("node1"))
        .build()?;
    Ok(data.state())
}

#[test]
fn move_to_current_primary_is_a_noop() -> anyhow::Result<()> {
    let state = triple()?;
    let moved = move_instance(&state, 0, 0)?;
    assert_eq!(moved, state);
    Ok(())
}

#[test]
fn move_rewrites_all_three_entities() -> anyhow::Result<()> {
    let state = triple()?;
    let moved = move_instance(&state, 0, 1)?;

    assert_eq!(moved.instances.find(0)?.primary, 1);
    let source = moved.nodes.find(0)?;
    assert!(source.p_list.is_empty());
    assert_eq!(source.free_mem, state.nodes.find(0)?.free_mem + 512);
    let target = moved.nodes.find(1)?;
    assert_eq!(target.p_list, vec![0]);
    assert_eq!(target.free_mem, state.nodes.find(1)?.free_mem - 512);

    // the input state is unchanged
    assert_eq!(state.instances.find(0)?.primary, 0);
    Ok(())
}

#[test]
fn move_rejects_a_full_target() -> anyhow::Result<()> {
    let state = triple()?;
    assert!(matches!(
        move_instance(&state, 0, 2),
        Err(PlanError::CapacityExceeded(_))
    ));
    Ok(())
}

#[test]
fn move_of_unknown_instance_fails() -> anyhow::Result<()> {
    let state = triple()?;
    assert!(matches!(
        move_instance(&state, 9, 1),
        Err(PlanError::NotFound(_))
    ));
    Ok(())
}

#[test]
fn locate_takes_the_first_fitting_candidate() -> anyhow::Result<()> {
    let state = triple()?;
    // node3 is full, node2 fits; candidates are tried in order
    let placed = locate_instance(&state, 0, &[2, 1])?;
    assert_eq!(placed.instances.find(0)?.primary, 1);
    Ok(())
}

#[test]
fn locate_fails_when_no_candidate_fits() -> anyhow::Result<()> {
    let state = triple()?;
    assert!(matches!(
        locate_instance(&state, 0, &[2]),
        Err(PlanError::NoCapacity(_))
    ));
    assert!(matches!(
        locate_instance(&state, 0, &[]),
        Err(PlanError::NoCapacity(_))
    ));
    Ok(())
}

#[test]
fn locate_instances_threads_the_state() -> anyhow::Result<()> {
    let data = ClusterBuilder::new()
        .node(NodeSpec::new("node1").master())
        .node(NodeSpec::new("node2").mem(4096, 700))
        .instance(InstanceSpec::new("a").on("node1"))
        .instance(InstanceSpec::new("b").on("node1"))
        .build()?;
    let state = data.state();

    // node2 fits one 512 MiB instance, not two: the fold must observe the
    // first placement when trying the second.
    assert!(matches!(
        locate_instances(&state, &[0, 1], &[1]),
        Err(PlanError::NoCapacity(_))
    ));

    let placed = locate_instances(&state, &[0], &[1])?;
    assert_eq!(placed.instances.find(0)?.primary, 1);
    Ok(())
}
