//! End-to-end demo: load a cluster snapshot, plan a rolling reboot, print it.
//!
//! Run with a JSON snapshot path to plan a real cluster:
//!
//! ```text
//! cargo run --example plan_rolling_reboot -- cluster.json
//! ```
//!
//! Without arguments a small built-in demo cluster is planned. The process
//! exits non-zero on any fatal planning failure (no master, unknown
//! references, impossible evacuation).

use anyhow::Result;
use rollplan::testing::{ClusterBuilder, InstanceSpec, NodeSpec};
use rollplan::{ClusterData, PlannerOptions, RenderOptions, build_plan, render_plan};

fn demo_cluster() -> Result<ClusterData> {
    Ok(ClusterBuilder::new()
        .node(NodeSpec::new("node1").master())
        .node(NodeSpec::new("node2"))
        .node(NodeSpec::new("node3"))
        .instance(InstanceSpec::new("web0").on("node1").secondary("node2"))
        .instance(InstanceSpec::new("web1").on("node2").secondary("node3"))
        .instance(InstanceSpec::new("db0").on("node3"))
        .build()?)
}

fn run() -> Result<()> {
    let data = match std::env::args().nth(1) {
        Some(path) => rollplan::read_json_snapshot(&path)?,
        None => demo_cluster()?,
    };

    let plan = build_plan(&data, &PlannerOptions::default())?;
    let text = render_plan(
        &data,
        &plan,
        &RenderOptions {
            print_moves: true,
            ..RenderOptions::default()
        },
    )?;
    print!("{text}");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("plan_rolling_reboot: {e:#}");
        std::process::exit(1);
    }
}
