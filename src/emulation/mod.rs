//! Emulation session management.
//!
//! The emulation framework itself (node processes, namespaces, wiring) is an
//! external collaborator reached through the [`Emulator`] trait. A
//! [`Session`] drives the declared topology through its lifecycle: start the
//! emulation, configure every host's primary interface, block on the control
//! shell, then stop and release node resources.

pub mod process;

pub use process::ProcessEmulator;

use crate::hostcfg::{self, CommandRunner};
use crate::shell::ControlShell;
use crate::topology::{LinkKind, Topology};
use color_eyre::Result;
use log::info;

/// Seam to the external emulation framework.
///
/// The framework owns node process and namespace lifecycles; this crate only
/// declares the topology and issues per-host configuration commands through
/// the [`CommandRunner`] channel.
pub trait Emulator: CommandRunner {
    /// Bring up all nodes and normal links of `topology`. Stub links are
    /// declared in the topology but require no wiring.
    fn start(&mut self, topology: &Topology) -> Result<()>;

    /// Stop all nodes and release their resources.
    fn stop(&mut self) -> Result<()>;
}

/// A running emulation session.
///
/// Owns the topology and the backend for the session lifetime. All phases
/// are synchronous; the shell blocks the calling thread until end-of-input.
pub struct Session<E: Emulator> {
    topology: Topology,
    emulator: E,
    started: bool,
}

impl<E: Emulator> Session<E> {
    pub fn new(topology: Topology, emulator: E) -> Session<E> {
        Session {
            topology,
            emulator,
            started: false,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn emulator(&self) -> &E {
        &self.emulator
    }

    /// Start the emulation, then configure every host's primary interface.
    ///
    /// Host configuration failures propagate raw; a failed host is left
    /// partially configured and the session does not continue to the next
    /// host.
    pub fn start(&mut self) -> Result<()> {
        let wired = self
            .topology
            .links
            .iter()
            .filter(|l| l.kind == LinkKind::Normal)
            .count();
        info!(
            "Starting emulation: {} switches, {} hosts, {} links ({} stub)",
            self.topology.switches.len(),
            self.topology.hosts.len(),
            wired,
            self.topology.links.len() - wired,
        );
        self.emulator.start(&self.topology)?;
        self.started = true;
        for host in &self.topology.hosts {
            hostcfg::configure_host(host, &mut self.emulator)?;
        }
        Ok(())
    }

    /// Block on the interactive control shell until the operator exits it.
    pub fn interact(&mut self, shell: &mut dyn ControlShell) -> Result<()> {
        shell.run(&self.topology, &mut self.emulator)
    }

    /// Stop the emulation and release node resources. Calling this on a
    /// session that never started is a no-op.
    pub fn stop(&mut self) -> Result<()> {
        if self.started {
            info!("Stopping emulation");
            self.emulator.stop()?;
            self.started = false;
        }
        Ok(())
    }
}
