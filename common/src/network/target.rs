//! # Target Classification
//!
//! Turns raw target lines into the two collections a probe run works on:
//! * **hosts**: host names and standalone IPv4 unicast addresses.
//! * **networks**: IPv4 CIDR blocks with a prefix between /8 and /30.
//!
//! A line may hold a single token or several whitespace-separated ones. In the
//! latter case consecutive addresses are greedily paired as `address netmask`,
//! so `"10.0.0.0 255.255.255.0"` becomes the network `10.0.0.0/24`.

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use tracing::debug;

use crate::error::{FastPingError, Result};
use crate::utils::ip;

/// Prefix lengths the probing executable accepts for network expansion.
pub const NETWORK_PREFIXES: RangeInclusive<u8> = 8..=30;

const UNICAST_ONLY: &str = "only IPv4 unicast addresses are supported";
const NETWORK_RANGE: &str = "only IPv4 unicast networks with bit masks from 8 to 30 are supported";

/// What a single token turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Anything that does not parse as an address; resolved later by the prober.
    Host(String),
    Address(Ipv4Addr),
    Network(Ipv4Network),
}

impl FromStr for Classification {
    type Err = FastPingError;

    /// Classifies a lone token.
    ///
    /// Unlike tokens on a multi-token line, a lone address must be usable as a
    /// host by itself: netmasks and non-unicast addresses are rejected.
    fn from_str(s: &str) -> Result<Self> {
        match parse_token(s)? {
            Classification::Address(addr) => standalone_address(addr).map(Classification::Address),
            other => Ok(other),
        }
    }
}

/// Hosts and networks in first-seen order, each without duplicates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassifiedTargets {
    hosts: Vec<String>,
    networks: Vec<Ipv4Network>,
}

impl ClassifiedTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn networks(&self) -> &[Ipv4Network] {
        &self.networks
    }

    pub fn len(&self) -> usize {
        self.hosts.len() + self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add(&mut self, classification: Classification) {
        match classification {
            Classification::Host(name) => push_unique(&mut self.hosts, name),
            Classification::Address(addr) => push_unique(&mut self.hosts, addr.to_string()),
            Classification::Network(net) => push_unique(&mut self.networks, net),
        }
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Classifies every raw target line.
///
/// Fails on the first invalid address or network; nothing is returned for the
/// lines that did classify.
pub fn classify<I, S>(lines: I) -> Result<ClassifiedTargets>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut targets = ClassifiedTargets::new();
    for line in lines {
        classify_line(line.as_ref(), &mut targets)?;
    }
    debug!(
        hosts = targets.hosts.len(),
        networks = targets.networks.len(),
        "targets classified"
    );
    Ok(targets)
}

/// Classifies one raw line into `targets`.
pub fn classify_line(line: &str, targets: &mut ClassifiedTargets) -> Result<()> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        [] => {}
        [token] => targets.add(token.parse::<Classification>()?),
        _ => {
            let mut addresses: Vec<Ipv4Addr> = Vec::new();
            for &token in &tokens {
                match parse_token(token)? {
                    Classification::Address(addr) => addresses.push(addr),
                    other => targets.add(other),
                }
            }
            for paired in pair_addresses(addresses)? {
                targets.add(paired);
            }
        }
    }
    Ok(())
}

/// Greedily pairs `address netmask` runs into networks.
///
/// The head of the queue is combined with the next item when that item is a
/// netmask; otherwise the head stands alone and pairing restarts from the
/// following address. A single leftover address is emitted on its own.
pub fn pair_addresses(addresses: Vec<Ipv4Addr>) -> Result<Vec<Classification>> {
    let mut pending: VecDeque<Ipv4Addr> = VecDeque::from(addresses);
    let mut paired: Vec<Classification> = Vec::with_capacity(pending.len());

    while let (Some(&addr), Some(&mask)) = (pending.front(), pending.get(1)) {
        if !ip::is_unicast(&addr) {
            return Err(FastPingError::address_range(addr.to_string(), UNICAST_ONLY));
        }

        if let Some(bits) = ip::netmask_bits(&mask) {
            let pair = format!("{addr} {mask}");
            let net: Ipv4Network = network(&pair, addr, bits)?;
            let net = Ipv4Network::new(net.network(), bits)
                .map_err(|e| FastPingError::address_range(pair, e.to_string()))?;
            paired.push(Classification::Network(net));
            pending.drain(..2);
        } else {
            paired.push(Classification::Address(standalone_address(addr)?));
            pending.pop_front();
        }
    }

    if let Some(addr) = pending.pop_front() {
        paired.push(Classification::Address(standalone_address(addr)?));
    }

    Ok(paired)
}

/// Reads a target file: each line is classified like an inline target, blank lines skipped.
pub fn read_targets_file(path: &Path) -> Result<Vec<String>> {
    let contents: String = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Parses a token without judging whether a bare address may stand alone.
fn parse_token(token: &str) -> Result<Classification> {
    if let Some((addr_str, prefix_str)) = token.split_once('/') {
        return match addr_str.parse::<IpAddr>() {
            Ok(IpAddr::V4(addr)) => {
                let prefix: u8 = match prefix_str.parse::<u8>() {
                    Ok(prefix) => prefix,
                    // `address/netmask`
                    Err(_) => prefix_str
                        .parse::<Ipv4Addr>()
                        .ok()
                        .and_then(|mask| ip::netmask_bits(&mask))
                        .ok_or_else(|| FastPingError::address_range(token, NETWORK_RANGE))?,
                };
                network(token, addr, prefix).map(Classification::Network)
            }
            Ok(IpAddr::V6(_)) => Err(FastPingError::address_range(token, NETWORK_RANGE)),
            Err(_) => Ok(Classification::Host(token.to_string())),
        };
    }

    match token.parse::<IpAddr>() {
        Ok(IpAddr::V4(addr)) => Ok(Classification::Address(addr)),
        Ok(IpAddr::V6(_)) => Err(FastPingError::address_range(token, UNICAST_ONLY)),
        Err(_) => Ok(Classification::Host(token.to_string())),
    }
}

fn network(token: &str, addr: Ipv4Addr, prefix: u8) -> Result<Ipv4Network> {
    if !NETWORK_PREFIXES.contains(&prefix) {
        return Err(FastPingError::address_range(token, NETWORK_RANGE));
    }

    let net = Ipv4Network::new(addr, prefix)
        .map_err(|e| FastPingError::address_range(token, e.to_string()))?;

    if !ip::is_unicast(&addr) || !ip::is_unicast(&net.network()) {
        return Err(FastPingError::address_range(token, NETWORK_RANGE));
    }
    Ok(net)
}

fn standalone_address(addr: Ipv4Addr) -> Result<Ipv4Addr> {
    if ip::is_unicast(&addr) && !ip::is_netmask(&addr) {
        Ok(addr)
    } else {
        Err(FastPingError::address_range(addr.to_string(), UNICAST_ONLY))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
