use std::time::{Duration, Instant};

use colored::*;
use fastping_common::config::Config;
use fastping_common::network::status::{StatusFilter, StatusMap};
use fastping_core::{FastPing, PingReport, PingRequest};

use crate::commands::PingArgs;
use crate::fprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn ping(args: PingArgs, cfg: &Config) -> anyhow::Result<()> {
    let engine = FastPing::new(cfg.clone())?.on_progress(spinner::report_probe_progress);

    let request = PingRequest {
        targets: args.targets,
        filename: args.file,
        status: args.status,
    };

    spinner::start(cfg.quiet);
    let start_time: Instant = Instant::now();
    let report = engine.ping(request).await;
    spinner::finish();

    match report? {
        PingReport::Full(map) => print_map(&map, start_time.elapsed(), cfg),
        PingReport::Filtered { filter, targets } => print_filtered(filter, &targets, cfg),
    }
    Ok(())
}

fn print_map(map: &StatusMap, total_time: Duration, cfg: &Config) {
    if map.is_empty() {
        print::header("zero targets reported", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("ping results", cfg.quiet);
    let width: usize = format::key_width(map.iter().map(|(target, _)| target));
    for (target, status) in map.iter() {
        match cfg.quiet {
            0 | 1 => print::aligned_line(target, width, format::status_to_colored(status)),
            _ => print::print(&format!("{target},{status}")),
        }
    }
    print_summary(map, total_time, cfg);
}

fn print_filtered(filter: StatusFilter, targets: &[String], cfg: &Config) {
    print::header(&format!("{filter} targets"), cfg.quiet);
    for target in targets {
        print::print(target);
    }
}

fn print_summary(map: &StatusMap, total_time: Duration, cfg: &Config) {
    let (alive, dead, noip) = map.tally();
    let alive: ColoredString = format!("{alive} alive").bold().color(colors::ALIVE);
    let dead: ColoredString = format!("{dead} unreachable").bold().color(colors::UNREACHABLE);
    let noip: ColoredString = format!("{noip} unresolvable").bold().color(colors::UNRESOLVABLE);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("{alive}, {dead}, {noip} in {total_time}");

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        1 => {
            fprint!();
            fastping_common::success!("{}", output);
        }
        _ => {}
    }
}
