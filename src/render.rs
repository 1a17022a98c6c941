//! Human-readable rendering of reboot plans.
//!
//! The output format is line-oriented: an optional header, then one line of
//! comma-separated node names per reboot window, each optionally followed by
//! indented `instance target` evacuation lines. Higher verbosity appends the
//! planning summary and, at the top level, the raw conflict graph.
//!
//! Rendering resolves indices back to names through the snapshot; given
//! identical inputs and options the output is byte-identical.

use crate::cluster::ClusterData;
use crate::errors::PlanResult;
use crate::planner::RebootPlan;
use std::fmt::Write as _;

/// Output switches for [`render_plan`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Suppress the header line.
    pub no_headers: bool,
    /// Include per-group evacuation moves.
    pub print_moves: bool,
    /// Verbosity: `>= 2` appends the planning summary, `>= 3` also the raw
    /// conflict graph.
    pub verbose: u8,
}

/// Render `plan` as the line-oriented group listing.
///
/// # Errors
///
/// [`crate::PlanError::NotFound`] if the plan references an index missing
/// from the snapshot; that only happens when plan and snapshot are mismatched.
pub fn render_plan(
    data: &ClusterData,
    plan: &RebootPlan,
    opts: &RenderOptions,
) -> PlanResult<String> {
    let mut out = String::new();
    if !opts.no_headers {
        out.push_str("Node Reboot Groups\n");
    }
    for group in &plan.groups {
        let names = group
            .nodes
            .iter()
            .map(|&ndx| data.nodes.find(ndx).map(|n| n.name.clone()))
            .collect::<PlanResult<Vec<_>>>()?
            .join(",");
        out.push_str(&names);
        out.push('\n');
        if opts.print_moves {
            for mv in &group.moves {
                let inst = data.instances.find(mv.instance)?;
                let node = data.nodes.find(mv.target)?;
                let _ = writeln!(out, "  {} {}", inst.name, node.name);
            }
        }
    }
    if opts.verbose >= 2 {
        let _ = write!(out, "{}", plan.explain());
    }
    if opts.verbose >= 3 {
        out.push_str(&plan.graph.dump());
    }
    Ok(out)
}
