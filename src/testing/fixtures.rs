//! Pre-built cluster snapshots for common planning scenarios.

use crate::cluster::ClusterData;
use crate::errors::PlanResult;
use crate::testing::builders::{ClusterBuilder, InstanceSpec, NodeSpec};
use std::io::Write as _;

/// One master node, no instances. The smallest plannable cluster.
///
/// # Errors
///
/// Never fails in practice; kept fallible for uniformity with the builder.
pub fn single_master_node() -> PlanResult<ClusterData> {
    ClusterBuilder::new()
        .node(NodeSpec::new("node1").master())
        .build()
}

/// Two nodes mirroring one instance each for the other.
///
/// The conflict graph is a single edge, so any proper coloring needs two
/// groups.
///
/// # Errors
///
/// Never fails in practice.
pub fn mirrored_pair() -> PlanResult<ClusterData> {
    ClusterBuilder::new()
        .node(NodeSpec::new("node1").master())
        .node(NodeSpec::new("node2"))
        .instance(InstanceSpec::new("web0").on("node1").secondary("node2"))
        .instance(InstanceSpec::new("web1").on("node2").secondary("node1"))
        .build()
}

/// Two tagged nodes plus an untagged third holding the only mirror.
///
/// Planning with the `web` tag filter leaves `node1` and `node2`, whose
/// conflict edge would need `node3` in the vertex set; they end up sharing a
/// color.
///
/// # Errors
///
/// Never fails in practice.
pub fn tagged_pair_with_remote_mirror() -> PlanResult<ClusterData> {
    ClusterBuilder::new()
        .node(NodeSpec::new("node1").master().tag("web"))
        .node(NodeSpec::new("node2").tag("web"))
        .node(NodeSpec::new("node3"))
        .instance(InstanceSpec::new("web0").on("node1").secondary("node3"))
        .build()
}

/// Three nodes in one group; `node1` hosts a non-redundant instance that
/// only `node2` has room for.
///
/// Clearing `node1` parks the instance on `node2`, which therefore cannot
/// join the same reboot window.
///
/// # Errors
///
/// Never fails in practice.
pub fn evac_triple() -> PlanResult<ClusterData> {
    ClusterBuilder::new()
        .node(NodeSpec::new("node1"))
        .node(NodeSpec::new("node2").master())
        .node(NodeSpec::new("node3").mem(4096, 100))
        .instance(InstanceSpec::new("solo").on("node1"))
        .build()
}

/// Like [`evac_triple`], but no peer has room for the instance at all.
///
/// # Errors
///
/// Never fails in practice.
pub fn tight_triple() -> PlanResult<ClusterData> {
    ClusterBuilder::new()
        .node(NodeSpec::new("node1"))
        .node(NodeSpec::new("node2").master().mem(4096, 100))
        .node(NodeSpec::new("node3").mem(4096, 100))
        .instance(InstanceSpec::new("solo").on("node1"))
        .build()
}

/// Write snapshot contents to a named temporary file for loader tests.
///
/// # Errors
///
/// Propagates file creation and write failures.
pub fn snapshot_file(contents: &str) -> std::io::Result<tempfile::NamedTempFile> {
    let mut f = tempfile::NamedTempFile::new()?;
    f.write_all(contents.as_bytes())?;
    f.flush()?;
    Ok(f)
}
