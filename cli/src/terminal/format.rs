use colored::*;
use fastping_common::network::status::Status;

use crate::terminal::colors;

pub fn status_to_colored(status: Status) -> ColoredString {
    let color = match status {
        Status::Alive => colors::ALIVE,
        Status::Unreachable => colors::UNREACHABLE,
        Status::Unresolvable => colors::UNRESOLVABLE,
    };
    status.as_token().color(color).bold()
}

/// Width of the widest target, used to align result lines.
pub fn key_width<'a>(targets: impl Iterator<Item = &'a str>) -> usize {
    targets.map(console::measure_text_width).max().unwrap_or(0)
}
