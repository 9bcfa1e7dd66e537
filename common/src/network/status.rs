//! # Reachability Status
//!
//! The outcome vocabulary of a probe run and the map that collects it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::FastPingError;

/// Reachability of one resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Alive,
    Unreachable,
    Unresolvable,
}

impl Status {
    /// Parses a status token as written by the probing executable.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "alive" => Some(Self::Alive),
            "unreachable" => Some(Self::Unreachable),
            "unresolvable" => Some(Self::Unresolvable),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Alive => "alive",
            Self::Unreachable => "unreachable",
            Self::Unresolvable => "unresolvable",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A caller-facing status filter: `alive`, `dead` or `noip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Alive,
    Dead,
    NoIp,
}

impl StatusFilter {
    pub fn status(self) -> Status {
        match self {
            Self::Alive => Status::Alive,
            Self::Dead => Status::Unreachable,
            Self::NoIp => Status::Unresolvable,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FastPingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alive" => Ok(Self::Alive),
            "dead" => Ok(Self::Dead),
            "noip" => Ok(Self::NoIp),
            other => Err(FastPingError::Usage(format!(
                "invalid status filter '{other}', valid options are 'alive', 'dead' or 'noip'"
            ))),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::NoIp => "noip",
        };
        f.write_str(name)
    }
}

/// Target identifier to status, in first-insertion order.
///
/// Re-inserting a known identifier overwrites its status but keeps its
/// original position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusMap {
    entries: Vec<(String, Status)>,
    index: HashMap<String, usize>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: String, status: Status) -> Option<Status> {
        if let Some(&pos) = self.index.get(&target) {
            return Some(std::mem::replace(&mut self.entries[pos].1, status));
        }
        self.index.insert(target.clone(), self.entries.len());
        self.entries.push((target, status));
        None
    }

    pub fn get(&self, target: &str) -> Option<Status> {
        self.index.get(target).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Status)> {
        self.entries.iter().map(|(target, status)| (target.as_str(), *status))
    }

    pub fn alive(&self) -> Vec<String> {
        filter_by_status(self, Status::Alive)
    }

    pub fn unreachable(&self) -> Vec<String> {
        filter_by_status(self, Status::Unreachable)
    }

    pub fn unresolvable(&self) -> Vec<String> {
        filter_by_status(self, Status::Unresolvable)
    }

    /// Number of entries per status, as `(alive, unreachable, unresolvable)`.
    pub fn tally(&self) -> (usize, usize, usize) {
        self.entries
            .iter()
            .fold((0, 0, 0), |(a, u, n), (_, status)| match status {
                Status::Alive => (a + 1, u, n),
                Status::Unreachable => (a, u + 1, n),
                Status::Unresolvable => (a, u, n + 1),
            })
    }
}

impl FromIterator<(String, Status)> for StatusMap {
    fn from_iter<T: IntoIterator<Item = (String, Status)>>(iter: T) -> Self {
        let mut map = StatusMap::new();
        for (target, status) in iter {
            map.insert(target, status);
        }
        map
    }
}

/// Renders the map back into `target,status` records, one per line.
///
/// Targets are quoted whenever the record reader would need it.
impl fmt::Display for StatusMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        for (target, status) in self.iter() {
            writer
                .write_record([target, status.as_token()])
                .map_err(|_| fmt::Error)?;
        }
        let bytes: Vec<u8> = writer.into_inner().map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

/// Targets in `map` whose status equals `status`, in map order.
pub fn filter_by_status(map: &StatusMap, status: Status) -> Vec<String> {
    map.iter()
        .filter(|(_, s)| *s == status)
        .map(|(target, _)| target.to_string())
        .collect()
}
