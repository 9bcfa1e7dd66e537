//! Merges raw probe output into a [`StatusMap`].
//!
//! Every outcome is expected to hold zero or more `target,status` records.
//! A record that cannot be understood fails the whole aggregation instead of
//! being dropped.

use fastping_common::network::status::{Status, StatusMap};
use fastping_common::{FastPingError, Result};

use crate::prober::ProbeOutcome;

/// Concatenates outcome blocks, one record per line, skipping blank lines.
pub fn combine(outcomes: &[ProbeOutcome]) -> String {
    let mut text = String::new();
    for line in outcomes.iter().flat_map(|outcome| outcome.output.lines()) {
        if line.trim().is_empty() {
            continue;
        }
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Parses `target,status` records; later records for a target win.
pub fn parse_records(text: &str) -> Result<StatusMap> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut map = StatusMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| FastPingError::OutputFormat {
            line: e.position().map_or(0, |pos| pos.line()),
            detail: e.to_string(),
        })?;
        let line: u64 = record.position().map_or(0, |pos| pos.line());

        let (target, token) = match (record.len(), record.get(0), record.get(1)) {
            (2, Some(target), Some(token)) if !target.is_empty() => (target, token),
            _ => {
                return Err(FastPingError::OutputFormat {
                    line,
                    detail: format!("expected 'target,status', found {:?}", record.iter().collect::<Vec<_>>()),
                });
            }
        };

        let status = Status::from_token(token).ok_or_else(|| FastPingError::OutputFormat {
            line,
            detail: format!("unknown status '{token}' for {target}"),
        })?;
        map.insert(target.to_string(), status);
    }
    Ok(map)
}

pub fn aggregate(outcomes: &[ProbeOutcome]) -> Result<StatusMap> {
    parse_records(&combine(outcomes))
}
