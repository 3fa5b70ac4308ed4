use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

use fabricsim::emulation::{ProcessEmulator, Session};
use fabricsim::fabric;
use fabricsim::shell::StdinShell;
use fabricsim::utils::validate_topology;

/// Two-leaf fabric topology with software switches and IPv6 hosts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write the built topology as YAML to this path and exit without
    /// starting the emulation
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Building two-leaf fabric topology");
    let topology = fabric::two_leaf();

    // Uniqueness of addresses and control-plane ports is an implicit
    // contract of the declaration; surface violations but keep going.
    if let Err(e) = validate_topology(&topology) {
        warn!("Topology validation failed: {}", e);
    }

    if let Some(path) = &args.dump {
        let yaml = serde_yaml::to_string(&topology)?;
        fs::write(path, yaml)
            .wrap_err_with(|| format!("Failed to write topology dump '{}'", path.display()))?;
        info!("Topology written to {:?}", path);
        return Ok(());
    }

    let mut session = Session::new(topology, ProcessEmulator::new());
    session.start()?;
    session.interact(&mut StdinShell::new())?;
    session.stop()?;

    print_restart_notice();
    Ok(())
}

fn print_restart_notice() {
    let rule = "#".repeat(80);
    println!("{rule}");
    println!("ATTENTION: the emulation was stopped! Perhaps accidentally?");
    println!("No worries, it will restart automatically in a few seconds...");
    println!("To access the control shell again, relaunch this program.");
    println!("To detach from the shell (without stopping), press Ctrl-D.");
    println!("{rule}");
}
