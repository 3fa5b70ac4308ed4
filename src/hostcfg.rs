//! IPv6 host interface configuration.
//!
//! Builds the exact command sequence that brings a host's primary interface
//! into its configured state: flush any inherited addresses, bind the IPv6
//! address, install the default route, and disable the hardware offload
//! features an emulated interface cannot perform.

use crate::topology::HostNode;
use color_eyre::Result;
use log::debug;

/// Offload features disabled on every emulated host interface. The emulated
/// interface cannot correctly perform checksum or segmentation offload.
pub const OFFLOAD_FEATURES: [&str; 3] = ["rx", "tx", "sg"];

/// Runs shell-level commands on a named host. Implemented by emulation
/// backends and by test doubles.
pub trait CommandRunner {
    fn run(&mut self, host: &str, command: &str) -> Result<()>;
}

/// The ordered configuration command sequence for one host.
///
/// The flushes are idempotent: running them against an interface with no
/// addresses is safe. The sequence is not transactional; a failing command
/// leaves the host partially configured.
pub fn config_commands(host: &HostNode) -> Vec<String> {
    let ifname = host.primary_ifname();
    let mut commands = vec![
        format!("ip -4 addr flush dev {ifname}"),
        format!("ip -6 addr flush dev {ifname}"),
        format!("ip -6 addr add {} dev {ifname}", host.ipv6),
    ];
    if let Some(gateway) = host.ipv6_gw {
        commands.push(format!("ip -6 route add default via {gateway}"));
    }
    for feature in OFFLOAD_FEATURES {
        commands.push(format!("ethtool --offload {ifname} {feature} off"));
    }
    commands
}

/// Apply the configuration sequence to `host` through `runner`.
///
/// Errors propagate unchanged. There is no retry and no rollback.
pub fn configure_host(host: &HostNode, runner: &mut dyn CommandRunner) -> Result<()> {
    debug!(
        "Configuring {} on {} ({})",
        host.ipv6,
        host.name,
        host.primary_ifname()
    );
    for command in config_commands(host) {
        runner.run(&host.name, &command)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::MacAddr;
    use color_eyre::eyre::eyre;

    fn host(gateway: bool) -> HostNode {
        HostNode {
            name: "h1".to_string(),
            mac: MacAddr::from_bytes([0, 0, 0, 0, 0, 0x10]),
            ipv6: "2001:1:1::1/64".parse().unwrap(),
            ipv6_gw: gateway.then(|| "2001:1:1::ff".parse().unwrap()),
        }
    }

    #[derive(Default)]
    struct Recorder {
        commands: Vec<(String, String)>,
        fail_at: Option<usize>,
    }

    impl CommandRunner for Recorder {
        fn run(&mut self, host: &str, command: &str) -> Result<()> {
            if self.fail_at == Some(self.commands.len()) {
                return Err(eyre!("command failed"));
            }
            self.commands.push((host.to_string(), command.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_command_sequence_with_gateway() {
        let commands = config_commands(&host(true));
        assert_eq!(
            commands,
            vec![
                "ip -4 addr flush dev h1-eth0",
                "ip -6 addr flush dev h1-eth0",
                "ip -6 addr add 2001:1:1::1/64 dev h1-eth0",
                "ip -6 route add default via 2001:1:1::ff",
                "ethtool --offload h1-eth0 rx off",
                "ethtool --offload h1-eth0 tx off",
                "ethtool --offload h1-eth0 sg off",
            ]
        );
    }

    #[test]
    fn test_no_route_command_without_gateway() {
        let commands = config_commands(&host(false));
        assert_eq!(commands.len(), 6);
        assert!(!commands.iter().any(|c| c.contains("route")));
    }

    #[test]
    fn test_configure_host_runs_on_the_right_host() {
        let mut recorder = Recorder::default();
        configure_host(&host(true), &mut recorder).unwrap();
        assert_eq!(recorder.commands.len(), 7);
        assert!(recorder.commands.iter().all(|(h, _)| h == "h1"));
    }

    #[test]
    fn test_failure_stops_mid_sequence() {
        // No retry, no rollback: commands before the failure stay applied.
        let mut recorder = Recorder {
            fail_at: Some(2),
            ..Recorder::default()
        };
        assert!(configure_host(&host(true), &mut recorder).is_err());
        assert_eq!(recorder.commands.len(), 2);
    }
}
