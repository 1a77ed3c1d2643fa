//! Network segment checking for clabcli.
//!
//! An EDA configuration carries a short list of CIDR rules describing the lab
//! network segments it applies to. This module discovers the host's IPv4
//! addresses and reports, for each rule, whether the host falls inside it.
//! Overlapping rules are independent checks: every containing rule matches.

use std::net::IpAddr;
use std::process::Command;

use anyhow::Result;
use ipnet::IpNet;
use tracing::debug;

use crate::error::ClabError;

#[cfg(test)]
use mockall::automock;

/// Source of the host's IP addresses, injectable for testing.
#[cfg_attr(test, automock)]
pub trait AddressProvider: Send + Sync {
    /// Return all IPv4 addresses currently assigned to the host,
    /// loopback excluded.
    fn local_addresses(&self) -> Result<Vec<IpAddr>>;
}

/// Real provider that parses `ip -4 addr show` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAddressProvider;

impl AddressProvider for SystemAddressProvider {
    fn local_addresses(&self) -> Result<Vec<IpAddr>> {
        let output = Command::new("ip").args(["-4", "addr", "show"]).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ip_addr_output(&stdout))
    }
}

/// Parse the output of `ip -4 addr show` into plain addresses.
///
/// Address lines look like `    inet 192.168.1.17/24 brd ...`; the CIDR
/// suffix is the interface prefix, not part of the address itself.
pub fn parse_ip_addr_output(stdout: &str) -> Vec<IpAddr> {
    let mut addrs = Vec::new();
    for line in stdout.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("inet ") {
            if let Some(field) = rest.split_whitespace().next() {
                let ip_str = field.split('/').next().unwrap_or(field);
                if let Ok(ip) = ip_str.parse::<IpAddr>() {
                    if !ip.is_loopback() {
                        addrs.push(ip);
                    }
                }
            }
        }
    }
    addrs
}

/// Check whether any of the given addresses falls inside a CIDR segment.
///
/// A syntactically invalid segment is a typed error, never a silent `false`.
pub fn segment_contains(segment: &str, addrs: &[IpAddr]) -> Result<bool, ClabError> {
    let net: IpNet = segment
        .trim()
        .parse()
        .map_err(|_| ClabError::InvalidCidr(segment.to_string()))?;
    Ok(addrs.iter().any(|addr| net.contains(addr)))
}

/// Verdict for a single network rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMatch {
    pub segment: String,
    pub matched: bool,
}

/// Evaluate every rule independently against the host addresses.
///
/// Overlapping segments (e.g. 10.0.0.0/8 containing 10.1.0.0/16) are not
/// exclusive alternatives; each reports its own verdict. Invalid rules
/// abort the evaluation so a typo in the remote config is surfaced.
pub fn matching_segments(rules: &[String], addrs: &[IpAddr]) -> Result<Vec<SegmentMatch>, ClabError> {
    let mut verdicts = Vec::with_capacity(rules.len());
    for rule in rules {
        let matched = segment_contains(rule, addrs)?;
        debug!("Segment {}: {}", rule, if matched { "match" } else { "no match" });
        verdicts.push(SegmentMatch {
            segment: rule.clone(),
            matched,
        });
    }
    Ok(verdicts)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ipv4_cidr_strategy() -> impl Strategy<Value = String> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255, 0u8..=32)
            .prop_map(|(a, b, c, d, prefix)| format!("{}.{}.{}.{}/{}", a, b, c, d, prefix))
    }

    proptest! {
        /// Any well-formed CIDR parses; the check never errors on it.
        #[test]
        fn prop_valid_cidr_never_errors(cidr in ipv4_cidr_strategy()) {
            let local: Vec<IpAddr> = vec!["192.168.1.1".parse().unwrap()];
            prop_assert!(segment_contains(&cidr, &local).is_ok());
        }

        /// A /32 segment matches exactly its own address.
        #[test]
        fn prop_host_route_matches_itself(a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
            let ip = format!("{}.{}.{}.{}", a, b, c, d);
            let local: Vec<IpAddr> = vec![ip.parse().unwrap()];
            let segment = format!("{}/32", ip);
            prop_assert!(segment_contains(&segment, &local).unwrap());
        }

        /// Parsing arbitrary `ip addr` output never panics.
        #[test]
        fn prop_parse_arbitrary_output_no_panic(content in ".*") {
            let _ = parse_ip_addr_output(&content);
        }
    }
}
