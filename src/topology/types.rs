//! Topology type definitions.
//!
//! This module contains the node, link, and topology types produced by the
//! builder and consumed by the emulation session.

use crate::net::{Ipv6Cidr, MacAddr};
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;

/// A software switch in the fabric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchNode {
    /// Unique switch name
    pub name: String,
    /// Port the switch's gRPC control-plane channel listens on
    pub grpc_port: u16,
    /// Reserved internal port used to redirect packets to the switch's
    /// control-plane processing path
    pub cpu_port: u16,
}

/// An end host with a statically configured IPv6 address.
///
/// MAC and IPv6 addresses must be unique across the hosts of a topology.
/// The builder does not enforce this; see
/// [`validate_topology`](crate::utils::validate_topology).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostNode {
    /// Unique host name
    pub name: String,
    /// Hardware address of the primary interface
    pub mac: MacAddr,
    /// IPv6 address bound to the primary interface
    pub ipv6: Ipv6Cidr,
    /// Default IPv6 gateway, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_gw: Option<Ipv6Addr>,
}

impl HostNode {
    /// The host's IPv6 address without its prefix length.
    pub fn ip(&self) -> Ipv6Addr {
        self.ipv6.addr()
    }

    /// Name of the host's primary interface.
    pub fn primary_ifname(&self) -> String {
        format!("{}-eth0", self.name)
    }
}

/// How a link participates in the emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// Fully wired by the emulation framework
    Normal,
    /// Declared but inert: reserves a switch port without real wiring
    Stub,
}

/// One end of a link: a node name plus the port assigned on that node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub node: String,
    /// Port number on the node, assigned in declaration order
    pub port: u32,
    /// Interface name on this endpoint. Always empty on stub links; callers
    /// must not depend on querying it there.
    pub ifname: String,
}

/// An unordered pair of (node, port) endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub kind: LinkKind,
    pub a: Endpoint,
    pub b: Endpoint,
}

/// Kind of node a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Switch,
    Host,
}

/// A complete, static topology description.
///
/// Built once by [`TopologyBuilder`](crate::topology::TopologyBuilder),
/// immutable afterwards, and consumed once by the emulation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub switches: Vec<SwitchNode>,
    pub hosts: Vec<HostNode>,
    pub links: Vec<Link>,
}

impl Topology {
    /// Look up a switch by name.
    pub fn switch(&self, name: &str) -> Option<&SwitchNode> {
        self.switches.iter().find(|s| s.name == name)
    }

    /// Look up a host by name.
    pub fn host(&self, name: &str) -> Option<&HostNode> {
        self.hosts.iter().find(|h| h.name == name)
    }

    /// The kind of node `name` refers to, if it is declared at all.
    pub fn node_kind(&self, name: &str) -> Option<NodeKind> {
        if self.switch(name).is_some() {
            Some(NodeKind::Switch)
        } else if self.host(name).is_some() {
            Some(NodeKind::Host)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str) -> HostNode {
        HostNode {
            name: name.to_string(),
            mac: MacAddr::from_bytes([0, 0, 0, 0, 0, 1]),
            ipv6: "2001:db8::1/64".parse().unwrap(),
            ipv6_gw: None,
        }
    }

    #[test]
    fn test_host_accessors() {
        let h = host("h1");
        assert_eq!(h.ip(), "2001:db8::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(h.primary_ifname(), "h1-eth0");
    }

    #[test]
    fn test_node_kind_lookup() {
        let topo = Topology {
            switches: vec![SwitchNode {
                name: "leaf1".to_string(),
                grpc_port: 50001,
                cpu_port: 255,
            }],
            hosts: vec![host("h1")],
            links: Vec::new(),
        };
        assert_eq!(topo.node_kind("leaf1"), Some(NodeKind::Switch));
        assert_eq!(topo.node_kind("h1"), Some(NodeKind::Host));
        assert_eq!(topo.node_kind("h9"), None);
    }
}
