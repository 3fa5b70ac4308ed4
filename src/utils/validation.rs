//! Topology consistency checks.
//!
//! The builder registers whatever it is given; these checks surface the
//! implicit contracts (unique host addresses, unique control-plane ports,
//! links that reference declared nodes) before a session starts.

use crate::topology::Topology;
use std::collections::HashSet;

/// Validate the implicit uniqueness contracts of a topology.
///
/// # Returns
/// * `Ok(())` if validation succeeds
/// * `Err(String)` describing the first violation found
pub fn validate_topology(topology: &Topology) -> Result<(), String> {
    let mut grpc_ports = HashSet::new();
    for switch in &topology.switches {
        if !grpc_ports.insert(switch.grpc_port) {
            return Err(format!(
                "Duplicate gRPC control-plane port {} (switch '{}')",
                switch.grpc_port, switch.name
            ));
        }
    }

    let mut macs = HashSet::new();
    let mut addrs = HashSet::new();
    for host in &topology.hosts {
        if !macs.insert(host.mac) {
            return Err(format!(
                "Duplicate MAC address {} (host '{}')",
                host.mac, host.name
            ));
        }
        if !addrs.insert(host.ip()) {
            return Err(format!(
                "Duplicate IPv6 address {} (host '{}')",
                host.ip(),
                host.name
            ));
        }
    }

    for link in &topology.links {
        for endpoint in [&link.a, &link.b] {
            if topology.node_kind(&endpoint.node).is_none() {
                return Err(format!("Link references unknown node '{}'", endpoint.node));
            }
        }
    }

    Ok(())
}
