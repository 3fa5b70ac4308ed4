//! # Fabricsim - Topology utility for two-leaf software-switch fabric demos
//!
//! This library declares a fixed two-leaf fabric topology for a test/demo
//! environment built atop an external network-emulation framework and a
//! software switch implementation, configures the IPv6 hosts attached to
//! it, and drives the emulation session around an interactive control
//! shell.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `net`: typed MAC and IPv6-with-prefix addresses
//! - `topology`: topology data model and builder
//! - `fabric`: the fixed two-leaf fabric declaration
//! - `hostcfg`: per-host IPv6 interface configuration commands
//! - `emulation`: session lifecycle and the backend seam to the external
//!   emulation framework
//! - `shell`: thin interactive control shell
//! - `utils`: topology consistency checks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fabricsim::emulation::{ProcessEmulator, Session};
//! use fabricsim::shell::StdinShell;
//! use fabricsim::fabric;
//!
//! let mut session = Session::new(fabric::two_leaf(), ProcessEmulator::new());
//! session.start()?;
//! session.interact(&mut StdinShell::new())?;
//! session.stop()?;
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! The library uses `color_eyre` for error reporting with context. Host
//! configuration failures propagate raw from the underlying command
//! execution; there is no retry or recovery path at this layer.

pub mod emulation;
pub mod fabric;
pub mod hostcfg;
pub mod net;
pub mod shell;
pub mod topology;
pub mod utils;
