//! # Rollplan
//!
//! A **rolling-maintenance reboot planner** for clusters of virtualization
//! hosts. Given a snapshot of nodes and the instances they host, rollplan
//! partitions the nodes into an ordered sequence of reboot groups such that
//! every group can go down simultaneously without taking any redundant
//! instance offline and, optionally, with every non-redundant instance
//! evacuated to a peer first.
//!
//! ## Key Features
//!
//! - **Conflict graph semantics** - nodes sharing a primary/secondary pair
//!   may never reboot together; a reboot-only flavor ignores stopped
//!   instances
//! - **Three coloring heuristics** - largest-first, DSATUR, and a
//!   recursive-largest-first variant; the smallest coloring wins
//! - **Capacity-aware refinement** - color classes are split into windows
//!   whose non-redundant instances can all be evacuated at once
//! - **Deterministic** - identical snapshots and options produce
//!   byte-identical plans
//! - **Pure values** - planning threads an immutable cluster state through
//!   every transformation; nothing is persisted
//!
//! ## Quick Start
//!
//! ```
//! use rollplan::testing::{ClusterBuilder, InstanceSpec, NodeSpec};
//! use rollplan::{PlannerOptions, RenderOptions, build_plan, render_plan};
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let data = ClusterBuilder::new()
//!     .node(NodeSpec::new("node1").master())
//!     .node(NodeSpec::new("node2"))
//!     .instance(InstanceSpec::new("web0").on("node1").secondary("node2"))
//!     .instance(InstanceSpec::new("web1").on("node2").secondary("node1"))
//!     .build()?;
//!
//! let plan = build_plan(&data, &PlannerOptions::default())?;
//! let text = render_plan(&data, &plan, &RenderOptions::default())?;
//! print!("{text}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Cluster state
//!
//! Nodes and instances live in integer-indexed [`Container`]s; all
//! cross-references are indices, never owning handles. The
//! [`ClusterState`] pair travels through every planning operation as an
//! immutable-by-convention value: mutators return new values, and
//! intermediate states exist only to validate evacuation capacity.
//!
//! ### Conflict graph
//!
//! [`Graph`] holds a symmetric adjacency over node indices. Each instance
//! with both a primary and a secondary in the vertex set contributes an
//! edge, because rebooting both of its nodes at once would take it down.
//!
//! ### Coloring and refinement
//!
//! The [`coloring`] heuristics partition the vertex set into conflict-free
//! classes. The [`partition`] step further splits each class into reboot
//! windows sized by what the cluster can actually absorb: every
//! non-redundant instance of a window must fit on a same-group peer that
//! stays up.
//!
//! ### The plan
//!
//! [`build_plan`] assembles everything and orders the result: biggest
//! windows first, the master's window last, the master node last within it.
//! [`render_plan`] turns the plan into the line-oriented listing consumed by
//! operators.
//!
//! ## Snapshot Loading
//!
//! Snapshots load from JSON (feature `io-jsonl`) or from the pipe-delimited
//! text dump format (feature `io-text`):
//!
//! ```no_run
//! # #[cfg(feature = "io-jsonl")]
//! # {
//! use rollplan::loader::read_json_snapshot;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let data = read_json_snapshot("cluster.json")?;
//! # Ok(())
//! # }
//! # }
//! ```
//!
//! ## Testing Your Scenarios
//!
//! The [`testing`] module ships fluent snapshot builders, invariant
//! assertions and canned fixtures:
//!
//! ```
//! use rollplan::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = ClusterBuilder::new()
//!     .node(NodeSpec::new("a").group("rack1"))
//!     .node(NodeSpec::new("b").group("rack1").master())
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `io-jsonl` - JSON snapshot loading (enabled by default)
//! - `io-text` - pipe-delimited text snapshot loading (enabled by default)
//!
//! ## Module Overview
//!
//! - [`container`] - integer-indexed entity containers and the [`Element`]
//!   capability trait
//! - [`node`] / [`instance`] - the host and workload models with their
//!   bookkeeping mutators
//! - [`cluster`] - the `(nodes, instances)` state and full snapshot
//!   aggregates
//! - [`relocate`] - single-instance moves and first-fit placement
//! - [`graph`] - conflict graph construction
//! - [`coloring`] - the three proper-coloring heuristics
//! - [`partition`] - capacity-aware splitting of color classes
//! - [`planner`] - plan assembly, ordering rules and explanations
//! - [`render`] - human-readable plan output
//! - [`loader`] - snapshot schema and file ingestion
//! - [`testing`] - builders, assertions and fixtures for planner tests

pub mod cluster;
pub mod coloring;
pub mod container;
pub mod errors;
pub mod graph;
pub mod instance;
pub mod loader;
pub mod node;
pub mod partition;
pub mod planner;
pub mod relocate;
pub mod render;
pub mod testing;

// General re-exports
pub use cluster::{ClusterData, ClusterState, Group};
pub use coloring::{ALGORITHMS, ColorMap, ColoringStats, best_coloring};
pub use container::{Container, Element, Gdx, Idx, Ndx};
pub use errors::{PlanError, PlanResult, Resource};
pub use graph::Graph;
pub use instance::{Instance, NO_SECONDARY};
pub use node::Node;
pub use planner::{
    InstanceMove, PlanExplanation, PlannerOptions, RebootGroup, RebootPlan, build_plan,
};
pub use render::{RenderOptions, render_plan};

// Gated re-exports
#[cfg(feature = "io-jsonl")]
pub use loader::read_json_snapshot;

#[cfg(feature = "io-text")]
pub use loader::read_text_snapshot;
