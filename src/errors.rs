//! Typed failure kinds for planning operations.
//!
//! Every fallible planning operation returns a [`PlanResult`], tagging the
//! failure with a [`PlanError`] kind:
//! - [`PlanError::NotFound`] - an index or name lookup missed.
//! - [`PlanError::InputInvalid`] - the snapshot itself is malformed (unknown
//!   group name, multiple masters, dangling node references).
//! - [`PlanError::Unsupported`] - the request cannot be served (e.g. a graph
//!   over an empty vertex set).
//! - [`PlanError::NoCapacity`] - evacuation simulation found no landing spot
//!   for some node's non-redundant instances.
//! - [`PlanError::CapacityExceeded`] - a single placement would overcommit a
//!   node resource; absorbed by the relocation combinators, which turn an
//!   exhausted candidate list into [`PlanError::NoCapacity`].
//!
//! Kinds compose with `anyhow` at the I/O boundary: loaders and demos wrap a
//! `PlanError` with file/line context, while the planning core stays typed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result alias used throughout the planning core.
pub type PlanResult<T> = Result<T, PlanError>;

/// A node resource that a placement can exhaust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    /// Free memory would go negative.
    Memory,
    /// Free disk would go negative.
    Disk,
    /// Virtual CPU allocation would exceed the node's capacity.
    Cpu,
    /// The node's configured instance-count ceiling would be exceeded.
    InstanceCount,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Cpu => "vcpus",
            Self::InstanceCount => "instance count",
        };
        write!(f, "{s}")
    }
}

/// Failure kind for planning operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanError {
    /// An entity lookup by index or name found nothing.
    NotFound(String),
    /// The cluster snapshot violates a structural precondition.
    InputInvalid(String),
    /// The operation is not serviceable for this input shape.
    Unsupported(String),
    /// No peer can absorb the non-redundant instances of some node.
    NoCapacity(String),
    /// A single placement would overcommit the named resource.
    CapacityExceeded(Resource),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(m) => write!(f, "not found: {m}"),
            Self::InputInvalid(m) => write!(f, "invalid input: {m}"),
            Self::Unsupported(m) => write!(f, "unsupported: {m}"),
            Self::NoCapacity(m) => write!(f, "no capacity: {m}"),
            Self::CapacityExceeded(r) => write!(f, "capacity exceeded: {r}"),
        }
    }
}

impl std::error::Error for PlanError {}
