//! Interactive control shell.
//!
//! Deliberately thin; the emulation framework ships its own full control
//! shell. This one covers topology introspection and raw command
//! passthrough to hosts, and returns when the operator sends end-of-input.

use crate::hostcfg::CommandRunner;
use crate::topology::{LinkKind, NodeKind, Topology};
use color_eyre::Result;
use std::io::{self, BufRead, Write};

/// Blocks the calling thread until the operator exits the shell.
pub trait ControlShell {
    fn run(&mut self, topology: &Topology, runner: &mut dyn CommandRunner) -> Result<()>;
}

/// Line-oriented shell over stdin/stdout.
pub struct StdinShell {
    prompt: String,
}

impl StdinShell {
    pub fn new() -> StdinShell {
        StdinShell {
            prompt: "fabricsim> ".to_string(),
        }
    }
}

impl Default for StdinShell {
    fn default() -> StdinShell {
        StdinShell::new()
    }
}

impl ControlShell for StdinShell {
    fn run(&mut self, topology: &Topology, runner: &mut dyn CommandRunner) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        loop {
            write!(stdout, "{}", self.prompt)?;
            stdout.flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF detaches from the shell
                writeln!(stdout)?;
                return Ok(());
            }
            if let Flow::Exit = dispatch(line.trim(), topology, runner, &mut stdout)? {
                return Ok(());
            }
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

fn dispatch(
    line: &str,
    topology: &Topology,
    runner: &mut dyn CommandRunner,
    out: &mut dyn Write,
) -> Result<Flow> {
    match line {
        "" => {}
        "exit" | "quit" => return Ok(Flow::Exit),
        "help" => {
            writeln!(out, "commands:")?;
            writeln!(out, "  nodes            list switches and hosts")?;
            writeln!(out, "  links            list links")?;
            writeln!(out, "  <host> <cmd>     run a shell command on a host")?;
            writeln!(out, "  exit             leave the shell (also Ctrl-D)")?;
        }
        "nodes" => {
            for switch in &topology.switches {
                writeln!(
                    out,
                    "{} (switch, grpc {}, cpu {})",
                    switch.name, switch.grpc_port, switch.cpu_port
                )?;
            }
            for host in &topology.hosts {
                writeln!(out, "{} (host, {})", host.name, host.ipv6)?;
            }
        }
        "links" => {
            for link in &topology.links {
                match link.kind {
                    LinkKind::Normal => writeln!(
                        out,
                        "{}:{} <-> {}:{}",
                        link.a.node, link.a.port, link.b.node, link.b.port
                    )?,
                    LinkKind::Stub => {
                        writeln!(out, "{}:{} (stub)", link.a.node, link.a.port)?
                    }
                }
            }
        }
        other => match other.split_once(' ') {
            Some((node, command)) if topology.node_kind(node) == Some(NodeKind::Host) => {
                // A failed command is reported but does not end the session
                if let Err(err) = runner.run(node, command.trim()) {
                    writeln!(out, "{node}: {err:#}")?;
                }
            }
            Some((node, _)) if topology.node_kind(node).is_some() => {
                writeln!(out, "{node}: commands can only run on hosts")?;
            }
            _ => {
                writeln!(out, "unknown command, try 'help'")?;
            }
        },
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric;

    #[derive(Default)]
    struct Recorder {
        commands: Vec<(String, String)>,
    }

    impl CommandRunner for Recorder {
        fn run(&mut self, host: &str, command: &str) -> Result<()> {
            self.commands.push((host.to_string(), command.to_string()));
            Ok(())
        }
    }

    fn run_line(line: &str) -> (Recorder, String, bool) {
        let topology = fabric::two_leaf();
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        let flow = dispatch(line, &topology, &mut recorder, &mut out).unwrap();
        let exited = matches!(flow, Flow::Exit);
        (recorder, String::from_utf8(out).unwrap(), exited)
    }

    #[test]
    fn test_nodes_lists_topology() {
        let (_, out, _) = run_line("nodes");
        assert!(out.contains("leaf1 (switch, grpc 50001, cpu 255)"));
        assert!(out.contains("h2 (host, 2001:1:1::2/64)"));
    }

    #[test]
    fn test_links_marks_stubs() {
        let (_, out, _) = run_line("links");
        assert!(out.contains("leaf1:1 (stub)"));
        assert!(out.contains("h1:0 <-> leaf1:2"));
    }

    #[test]
    fn test_host_command_passthrough() {
        let (recorder, _, _) = run_line("h1 ip -6 addr show");
        assert_eq!(
            recorder.commands,
            vec![("h1".to_string(), "ip -6 addr show".to_string())]
        );
    }

    #[test]
    fn test_commands_refused_on_switches() {
        let (recorder, out, _) = run_line("leaf1 reboot");
        assert!(recorder.commands.is_empty());
        assert!(out.contains("commands can only run on hosts"));
    }

    #[test]
    fn test_exit_and_unknown_input() {
        let (_, _, exited) = run_line("exit");
        assert!(exited);
        let (_, out, exited) = run_line("frobnicate");
        assert!(!exited);
        assert!(out.contains("unknown command"));
    }
}
