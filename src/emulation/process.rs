//! Process-backed emulation backend.
//!
//! Reaches hosts by prefixing each command with a per-host exec wrapper,
//! `ip netns exec <host>` by default, so commands run inside the network
//! namespace the external framework created for that node.

use crate::emulation::Emulator;
use crate::hostcfg::CommandRunner;
use crate::topology::{LinkKind, Topology};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::{debug, info};
use std::process::Command;

/// Runs host commands as local processes inside the node's network
/// namespace. Assumes the external framework has already created one
/// namespace per node, named after the node.
pub struct ProcessEmulator {
    /// Exec prefix; the host name is appended, then `sh -c <command>`. An
    /// empty prefix runs commands in the calling namespace.
    exec_prefix: Vec<String>,
}

impl ProcessEmulator {
    pub fn new() -> ProcessEmulator {
        ProcessEmulator {
            exec_prefix: vec!["ip".to_string(), "netns".to_string(), "exec".to_string()],
        }
    }

    /// Use a custom exec prefix, e.g. a framework-specific attach helper.
    pub fn with_exec_prefix(exec_prefix: Vec<String>) -> ProcessEmulator {
        ProcessEmulator { exec_prefix }
    }
}

impl Default for ProcessEmulator {
    fn default() -> ProcessEmulator {
        ProcessEmulator::new()
    }
}

impl CommandRunner for ProcessEmulator {
    fn run(&mut self, host: &str, command: &str) -> Result<()> {
        debug!("{host}: {command}");
        let status = match self.exec_prefix.split_first() {
            Some((program, rest)) => Command::new(program)
                .args(rest)
                .arg(host)
                .args(["sh", "-c", command])
                .status(),
            None => Command::new("sh").args(["-c", command]).status(),
        }
        .wrap_err_with(|| format!("Failed to spawn command on host '{host}'"))?;
        if !status.success() {
            return Err(eyre!(
                "Command failed on host '{host}' ({status}): {command}"
            ));
        }
        Ok(())
    }
}

impl Emulator for ProcessEmulator {
    fn start(&mut self, topology: &Topology) -> Result<()> {
        for switch in &topology.switches {
            info!(
                "Switch {}: gRPC port {}, CPU port {}",
                switch.name, switch.grpc_port, switch.cpu_port
            );
        }
        for link in &topology.links {
            match link.kind {
                LinkKind::Normal => debug!(
                    "Link {}:{} <-> {}:{}",
                    link.a.node, link.a.port, link.b.node, link.b.port
                ),
                // Reserved port, nothing to wire
                LinkKind::Stub => debug!("Stub port {} on {}", link.a.port, link.a.node),
            }
        }
        // Fail fast if the framework has not created the host namespaces yet
        for host in &topology.hosts {
            self.run(&host.name, "true")
                .wrap_err_with(|| format!("Host '{}' is not reachable", host.name))?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // Node teardown belongs to the external framework
        Ok(())
    }
}
