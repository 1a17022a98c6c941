use rollplan::loader::{GroupRecord, InstanceRecord, NodeRecord, Snapshot, assemble};
use rollplan::testing::snapshot_file;
use rollplan::{NO_SECONDARY, PlanError};

fn node_record(name: &str) -> NodeRecord {
    NodeRecord {
        name: name.to_string(),
        group: "default".to_string(),
        total_mem: 4096,
        free_mem: 2048,
        total_disk: 204_800,
        free_disk: 102_400,
        total_cpu: 8,
        offline: false,
        master: name == "node1",
        tags: Vec::new(),
        max_instances: None,
    }
}

fn snapshot() -> Snapshot {
    Snapshot {
        groups: vec![GroupRecord {
            name: "default".to_string(),
        }],
        nodes: vec![node_record("node1"), node_record("node2")],
        instances: vec![InstanceRecord {
            name: "web0".to_string(),
            mem: 512,
            disk: 10_240,
            vcpus: 1,
            running: true,
            primary: "node1".to_string(),
            secondary: Some("node2".to_string()),
        }],
        tags: vec!["env:prod".to_string()],
        ipolicy: None,
    }
}

#[test]
fn assemble_resolves_names_and_wires_hosting() -> anyhow::Result<()> {
    let data = assemble(&snapshot())?;
    assert_eq!(data.groups.len(), 1);
    assert_eq!(data.tags, vec!["env:prod".to_string()]);

    let inst = data.instances.find_by_name("web0")?;
    assert_eq!(inst.primary, 0);
    assert_eq!(inst.secondary, 1);

    let node1 = data.nodes.find(0)?;
    assert_eq!(node1.p_list, vec![0]);
    assert_eq!(node1.free_mem, 2048 - 512);

    let node2 = data.nodes.find(1)?;
    assert_eq!(node2.s_list, vec![0]);
    assert_eq!(node2.free_disk, 102_400 - 10_240);
    Ok(())
}

#[test]
fn assemble_rejects_unknown_references() {
    let mut bad = snapshot();
    bad.instances[0].primary = "node9".to_string();
    assert!(matches!(assemble(&bad), Err(PlanError::InputInvalid(_))));

    let mut bad = snapshot();
    bad.nodes[0].group = "rack9".to_string();
    assert!(matches!(assemble(&bad), Err(PlanError::InputInvalid(_))));
}

#[test]
fn assemble_rejects_duplicate_names() {
    let mut bad = snapshot();
    bad.nodes.push(node_record("node1"));
    assert!(matches!(assemble(&bad), Err(PlanError::InputInvalid(_))));
}

#[test]
fn assemble_rejects_a_self_mirrored_instance() {
    let mut bad = snapshot();
    bad.instances[0].secondary = Some("node1".to_string());
    assert!(matches!(assemble(&bad), Err(PlanError::InputInvalid(_))));
}

#[cfg(feature = "io-jsonl")]
#[test]
fn json_snapshot_round_trips_through_disk() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&snapshot())?;
    let file = snapshot_file(&json)?;
    let data = rollplan::read_json_snapshot(file.path())?;
    assert_eq!(data, assemble(&snapshot())?);
    Ok(())
}

#[cfg(feature = "io-jsonl")]
#[test]
fn json_parse_failures_carry_file_context() -> anyhow::Result<()> {
    let file = snapshot_file("{ not json")?;
    let err = rollplan::read_json_snapshot(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("parse snapshot"));
    Ok(())
}

#[cfg(feature = "io-text")]
#[test]
fn text_snapshot_parses_tagged_records() -> anyhow::Result<()> {
    let file = snapshot_file(
        "# demo cluster\n\
         group|default\n\
         node|node1|default|4096|2048|204800|102400|8|N|Y|web,ssd\n\
         node|node2|default|4096|2048|204800|102400|8|N|N\n\
         instance|web0|512|10240|1|Y|node1|node2\n\
         instance|db0|512|10240|1|N|node2|\n\
         tag|env:prod\n",
    )?;
    let data = rollplan::read_text_snapshot(file.path())?;

    let node1 = data.nodes.find_by_name("node1")?;
    assert!(node1.master);
    assert!(node1.tags.contains("web"));
    assert!(node1.tags.contains("ssd"));

    let web0 = data.instances.find_by_name("web0")?;
    assert!(web0.running);
    assert_eq!(web0.secondary, 1);

    let db0 = data.instances.find_by_name("db0")?;
    assert!(!db0.running);
    assert_eq!(db0.secondary, NO_SECONDARY);

    assert_eq!(data.tags, vec!["env:prod".to_string()]);
    Ok(())
}

#[cfg(feature = "io-text")]
#[test]
fn text_snapshot_rejects_bad_flags_and_record_types() -> anyhow::Result<()> {
    let file = snapshot_file("group|default\nnode|n1|default|1|1|1|1|1|X|N\n")?;
    let err = rollplan::read_text_snapshot(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("offline"));

    let file = snapshot_file("widget|weird\n")?;
    let err = rollplan::read_text_snapshot(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("unknown record type"));
    Ok(())
}
