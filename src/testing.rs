//! Testing utilities for reboot planning.
//!
//! This module provides the pieces needed to write idiomatic Rust tests
//! against the planner:
//!
//! - **Builders**: construct cluster snapshots fluently without hand-writing
//!   records
//! - **Assertions**: check coloring and plan invariants with readable
//!   failure messages
//! - **Fixtures**: pre-built clusters for common planning scenarios
//!
//! # Quick Start
//!
//! ```
//! use rollplan::testing::*;
//! use rollplan::{PlannerOptions, build_plan};
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = ClusterBuilder::new()
//!     .node(NodeSpec::new("node1").master())
//!     .node(NodeSpec::new("node2"))
//!     .instance(InstanceSpec::new("web0").on("node1").secondary("node2"))
//!     .build()?;
//!
//! let plan = build_plan(&data, &PlannerOptions::default())?;
//! assert_group_names(&data, &plan, &[&["node2"], &["node1"]]);
//! # Ok(())
//! # }
//! ```

mod assertions;
mod builders;
mod fixtures;

pub use assertions::{
    assert_group_names, assert_no_moves, assert_proper_coloring, group_names, move_names,
};
pub use builders::{ClusterBuilder, InstanceSpec, NodeSpec};
pub use fixtures::{
    evac_triple, mirrored_pair, single_master_node, snapshot_file, tagged_pair_with_remote_mirror,
    tight_triple,
};
