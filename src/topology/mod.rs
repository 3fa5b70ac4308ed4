//! Network topology module.
//!
//! This module contains the topology data model and the builder used to
//! declare switches, hosts, and links before a session starts.

pub mod build;
pub mod types;

// Re-export key types for easier access
pub use build::TopologyBuilder;
pub use types::{Endpoint, HostNode, Link, LinkKind, NodeKind, SwitchNode, Topology};
