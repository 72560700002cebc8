use std::collections::{BTreeMap, BTreeSet};

use crate::models::{AddressFamily, BbrStatus};

/// Commands to hand to the daemon, plus the peer-groups whose sessions must
/// be reset once the batch is applied. Transient; regenerated per event.
#[derive(Debug, PartialEq)]
pub struct CommandBatch {
    pub lines: Vec<String>,
    pub restart: BTreeSet<String>,
}

/// Render the allowas-in toggle for the desired status against the current
/// daemon topology. A configured group name covers every daemon template
/// sharing its prefix (per-address-family variants of one logical group).
pub(super) fn render(
    asn: &str,
    status: BbrStatus,
    enabled_groups: &BTreeMap<String, BTreeSet<AddressFamily>>,
    available_groups: &BTreeSet<String>,
) -> CommandBatch {
    let prefix = if status.is_enabled() { "" } else { "no " };
    let mut lines = vec![format!("router bgp {}", asn)];
    let mut restart = BTreeSet::new();
    for &af in AddressFamily::ALL.iter() {
        lines.push(format!(" address-family {}", af));
        for (name, families) in enabled_groups {
            for available in available_groups {
                if available.starts_with(name.as_str()) && families.contains(&af) {
                    lines.push(format!("  {}neighbor {} allowas-in 1", prefix, available));
                    restart.insert(available.clone());
                }
            }
        }
        lines.push(String::from(" exit-address-family"));
    }
    lines.push(String::from("exit"));
    CommandBatch { lines, restart }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_groups(entries: &[(&str, &[AddressFamily])]) -> BTreeMap<String, BTreeSet<AddressFamily>> {
        entries
            .iter()
            .map(|(name, families)| (name.to_string(), families.iter().copied().collect()))
            .collect()
    }

    fn available(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prefix_matching_across_templates() {
        let groups = enabled_groups(&[("PG1", &[AddressFamily::Ipv4])]);
        let avail = available(&["PG1_A", "PG1_B", "PG2"]);
        let batch = render("65000", BbrStatus::Enabled, &groups, &avail);

        assert_eq!(
            batch.lines,
            vec![
                "router bgp 65000",
                " address-family ipv4",
                "  neighbor PG1_A allowas-in 1",
                "  neighbor PG1_B allowas-in 1",
                " exit-address-family",
                " address-family ipv6",
                " exit-address-family",
                "exit",
            ]
        );
        assert_eq!(batch.restart, available(&["PG1_A", "PG1_B"]));
    }

    #[test]
    fn test_disable_is_exact_negation() {
        let groups = enabled_groups(&[
            ("PEER_V4", &[AddressFamily::Ipv4]),
            ("PEER_V6", &[AddressFamily::Ipv6]),
        ]);
        let avail = available(&["PEER_V4", "PEER_V6"]);

        let on = render("65100", BbrStatus::Enabled, &groups, &avail);
        let off = render("65100", BbrStatus::Disabled, &groups, &avail);

        assert_eq!(on.restart, off.restart);
        assert_eq!(on.lines.len(), off.lines.len());
        for (on_line, off_line) in on.lines.iter().zip(off.lines.iter()) {
            if on_line.contains("allowas-in") {
                assert_eq!(off_line.replacen("no ", "", 1), *on_line);
            } else {
                assert_eq!(on_line, off_line);
            }
        }
    }

    #[test]
    fn test_restart_set_deduplicates() {
        // One daemon template matched by two configured names and both
        // address families still restarts once
        let groups = enabled_groups(&[
            ("PEER", &[AddressFamily::Ipv4, AddressFamily::Ipv6]),
            ("PEER_BOTH", &[AddressFamily::Ipv4, AddressFamily::Ipv6]),
        ]);
        let avail = available(&["PEER_BOTH"]);
        let batch = render("65000", BbrStatus::Enabled, &groups, &avail);

        assert_eq!(batch.restart, available(&["PEER_BOTH"]));
        let toggles = batch
            .lines
            .iter()
            .filter(|line| line.contains("allowas-in"))
            .count();
        // Two configured names x two families, all against the same template
        assert_eq!(toggles, 4);
    }

    #[test]
    fn test_no_matching_topology_yields_bare_scaffold() {
        let groups = enabled_groups(&[("PG1", &[AddressFamily::Ipv4])]);
        let batch = render("65000", BbrStatus::Enabled, &groups, &BTreeSet::new());
        assert_eq!(
            batch.lines,
            vec![
                "router bgp 65000",
                " address-family ipv4",
                " exit-address-family",
                " address-family ipv6",
                " exit-address-family",
                "exit",
            ]
        );
        assert!(batch.restart.is_empty());
    }
}
