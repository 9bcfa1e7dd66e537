use colored::*;
use fastping_common::config::Config;
use fastping_core::system;

use crate::terminal::print;

const KEY_WIDTH: usize = 10;

pub fn info(cfg: &Config) -> anyhow::Result<()> {
    let path = system::locate_fping(cfg.executable.as_deref())?;
    let exe = system::inspect(&path)?;

    let csv: ColoredString = if exe.csv_support {
        "supported".green().bold()
    } else {
        "missing".red().bold()
    };
    let timeout: String = cfg
        .probe_timeout
        .map_or_else(|| "none".to_string(), |t| format!("{}ms", t.as_millis()));

    print::aligned_line("Executable", KEY_WIDTH, exe.path.display());
    print::aligned_line("Version", KEY_WIDTH, &exe.version);
    print::aligned_line("CSV output", KEY_WIDTH, csv);
    print::aligned_line("Pool size", KEY_WIDTH, cfg.workers());
    print::aligned_line("Timeout", KEY_WIDTH, timeout);

    if !exe.csv_support {
        anyhow::bail!("{} cannot be used: CSV output is not supported", exe.path.display());
    }
    Ok(())
}
