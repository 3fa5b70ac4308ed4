//! The fixed two-leaf demo fabric.
//!
//! A 2x2 fabric with IPv6 hosts: two leaf switches, one stub interface per
//! leaf reserved for an external physical connection, and one host per leaf
//! sharing a default gateway. The port numbers and addresses below are a
//! compatibility surface for the demo environment and must not drift.

use crate::net::{Ipv6Cidr, MacAddr};
use crate::topology::{Topology, TopologyBuilder};
use std::net::Ipv6Addr;

/// Reserved internal port for control-plane traffic on every switch.
pub const CPU_PORT: u16 = 255;

/// gRPC control-plane port of leaf1.
pub const LEAF1_GRPC_PORT: u16 = 50001;

/// gRPC control-plane port of leaf2.
pub const LEAF2_GRPC_PORT: u16 = 50002;

/// Default gateway shared by both hosts.
pub const GATEWAY: Ipv6Addr = Ipv6Addr::new(0x2001, 1, 1, 0, 0, 0, 0, 0xff);

/// Build the two-leaf fabric topology.
pub fn two_leaf() -> Topology {
    let mut topo = TopologyBuilder::new();

    // Leaves
    topo.add_switch("leaf1", LEAF1_GRPC_PORT, CPU_PORT);
    topo.add_switch("leaf2", LEAF2_GRPC_PORT, CPU_PORT);

    // Placeholders for external physical connections
    topo.add_stub_interface("leaf1", "veth1"); // port leaf1-1
    topo.add_stub_interface("leaf2", "veth3"); // port leaf2-1

    // IPv6 hosts, one per leaf
    topo.add_host(
        "h1",
        MacAddr::from_bytes([0, 0, 0, 0, 0, 0x10]),
        Ipv6Cidr::new(Ipv6Addr::new(0x2001, 1, 1, 0, 0, 0, 0, 1), 64),
        Some(GATEWAY),
    );
    topo.add_host(
        "h2",
        MacAddr::from_bytes([0, 0, 0, 0, 0, 0x20]),
        Ipv6Cidr::new(Ipv6Addr::new(0x2001, 1, 1, 0, 0, 0, 0, 2), 64),
        Some(GATEWAY),
    );

    // Host links
    topo.add_link("h1", "leaf1"); // port leaf1-2
    topo.add_link("h2", "leaf2"); // port leaf2-2

    topo.build()
}
