//! Builds one probe invocation per classified target.
//!
//! Targets are never batched: a failing invocation only ever affects the
//! single host or network it was built for.

use std::fmt;
use std::path::{Path, PathBuf};

use fastping_common::network::target::ClassifiedTargets;

/// Resolve names, emit CSV records.
pub const HOST_FLAGS: &str = "-nV";
/// Same as [`HOST_FLAGS`] plus network expansion.
pub const NETWORK_FLAGS: &str = "-ngV";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Host,
    Network,
}

/// A single execution of the probing executable against one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeInvocation {
    pub program: PathBuf,
    pub kind: ProbeKind,
    pub target: String,
}

impl ProbeInvocation {
    pub fn host(program: &Path, target: &str) -> Self {
        Self {
            program: program.to_path_buf(),
            kind: ProbeKind::Host,
            target: target.to_string(),
        }
    }

    pub fn network(program: &Path, cidr: &str) -> Self {
        Self {
            program: program.to_path_buf(),
            kind: ProbeKind::Network,
            target: cidr.to_string(),
        }
    }

    pub fn args(&self) -> [&str; 2] {
        let flags = match self.kind {
            ProbeKind::Host => HOST_FLAGS,
            ProbeKind::Network => NETWORK_FLAGS,
        };
        [flags, self.target.as_str()]
    }
}

impl fmt::Display for ProbeInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [flags, target] = self.args();
        write!(f, "{} {flags} {target}", self.program.display())
    }
}

/// Hosts first, then networks, each in classification order.
pub fn build_invocations(program: &Path, targets: &ClassifiedTargets) -> Vec<ProbeInvocation> {
    let hosts = targets
        .hosts()
        .iter()
        .map(|host| ProbeInvocation::host(program, host));
    let networks = targets
        .networks()
        .iter()
        .map(|net| ProbeInvocation::network(program, &net.to_string()));

    hosts.chain(networks).collect()
}
