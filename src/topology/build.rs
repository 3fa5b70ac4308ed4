//! Topology construction.
//!
//! The builder registers nodes and links in declaration order and assigns
//! switch ports sequentially, so the first attachment on a switch gets
//! port 1, the second port 2, and so on. Host ports start at 0; a host's
//! first attachment backs its primary interface.

use crate::net::{Ipv6Cidr, MacAddr};
use crate::topology::types::{Endpoint, HostNode, Link, LinkKind, SwitchNode, Topology};
use std::collections::HashMap;
use std::net::Ipv6Addr;

/// Accumulates nodes and links and produces an immutable [`Topology`].
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    switches: Vec<SwitchNode>,
    hosts: Vec<HostNode>,
    links: Vec<Link>,
    next_port: HashMap<String, u32>,
}

impl TopologyBuilder {
    pub fn new() -> TopologyBuilder {
        TopologyBuilder::default()
    }

    /// Register a switch with its control-plane listening port and reserved
    /// CPU port. Ports are not checked for conflicts; the caller must keep
    /// gRPC ports unique across the topology.
    pub fn add_switch(&mut self, name: &str, grpc_port: u16, cpu_port: u16) -> &mut Self {
        self.switches.push(SwitchNode {
            name: name.to_string(),
            grpc_port,
            cpu_port,
        });
        self
    }

    /// Register a host with a fixed hardware address and IPv6 address, and
    /// optionally a default IPv6 gateway.
    pub fn add_host(
        &mut self,
        name: &str,
        mac: MacAddr,
        ipv6: Ipv6Cidr,
        ipv6_gw: Option<Ipv6Addr>,
    ) -> &mut Self {
        self.hosts.push(HostNode {
            name: name.to_string(),
            mac,
            ipv6,
            ipv6_gw,
        });
        self
    }

    /// Reserve the next port on `switch` for an externally managed physical
    /// connection. Both construction and teardown of the resulting link are
    /// no-ops. The supplied interface name is discarded; the stored name is
    /// always empty.
    pub fn add_stub_interface(&mut self, switch: &str, _ifname: &str) -> &mut Self {
        let port = self.alloc_port(switch);
        let endpoint = Endpoint {
            node: switch.to_string(),
            port,
            ifname: String::new(),
        };
        self.links.push(Link {
            kind: LinkKind::Stub,
            a: endpoint.clone(),
            b: endpoint,
        });
        self
    }

    /// Register a normal bidirectional link, consuming one port on each
    /// endpoint.
    pub fn add_link(&mut self, a: &str, b: &str) -> &mut Self {
        let port_a = self.alloc_port(a);
        let port_b = self.alloc_port(b);
        self.links.push(Link {
            kind: LinkKind::Normal,
            a: Endpoint {
                node: a.to_string(),
                port: port_a,
                ifname: format!("{}-eth{}", a, port_a),
            },
            b: Endpoint {
                node: b.to_string(),
                port: port_b,
                ifname: format!("{}-eth{}", b, port_b),
            },
        });
        self
    }

    /// Finish construction. The returned topology is not mutated afterwards.
    pub fn build(self) -> Topology {
        Topology {
            switches: self.switches,
            hosts: self.hosts,
            links: self.links,
        }
    }

    // Switch ports count from 1, host ports from 0.
    fn alloc_port(&mut self, node: &str) -> u32 {
        let start = if self.hosts.iter().any(|h| h.name == node) {
            0
        } else {
            1
        };
        let next = self.next_port.entry(node.to_string()).or_insert(start);
        let port = *next;
        *next += 1;
        port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(last: u8) -> MacAddr {
        MacAddr::from_bytes([0, 0, 0, 0, 0, last])
    }

    #[test]
    fn test_switch_ports_assigned_in_declaration_order() {
        let mut builder = TopologyBuilder::new();
        builder.add_switch("leaf1", 50001, 255);
        builder.add_host("h1", mac(0x10), "2001:db8::1/64".parse().unwrap(), None);
        builder.add_stub_interface("leaf1", "veth1");
        builder.add_link("h1", "leaf1");
        let topo = builder.build();

        let stub = &topo.links[0];
        assert_eq!(stub.kind, LinkKind::Stub);
        assert_eq!(stub.a.port, 1);

        let link = &topo.links[1];
        assert_eq!(link.kind, LinkKind::Normal);
        assert_eq!(link.a.node, "h1");
        assert_eq!(link.a.port, 0);
        assert_eq!(link.a.ifname, "h1-eth0");
        assert_eq!(link.b.node, "leaf1");
        assert_eq!(link.b.port, 2);
        assert_eq!(link.b.ifname, "leaf1-eth2");
    }

    #[test]
    fn test_stub_interface_name_is_discarded() {
        let mut builder = TopologyBuilder::new();
        builder.add_switch("leaf1", 50001, 255);
        builder.add_stub_interface("leaf1", "veth1");
        let topo = builder.build();

        assert_eq!(topo.links[0].a.ifname, "");
        assert_eq!(topo.links[0].b.ifname, "");
    }

    #[test]
    fn test_builder_does_not_reject_conflicting_ports() {
        // Port uniqueness is the caller's contract, surfaced later by
        // validation, never by the builder itself.
        let mut builder = TopologyBuilder::new();
        builder.add_switch("leaf1", 50001, 255);
        builder.add_switch("leaf2", 50001, 255);
        let topo = builder.build();
        assert_eq!(topo.switches.len(), 2);
    }
}
