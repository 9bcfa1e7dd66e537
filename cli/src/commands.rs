pub mod info;
pub mod ping;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use fastping_common::config::{Config, DEFAULT_POOL_SIZE};

#[derive(Parser)]
#[command(name = "fastping", version)]
#[command(about = "Ping hosts and whole networks in parallel through fping.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Number of fping processes allowed to run at once
    #[arg(long, global = true, default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    /// Kill a single fping process after this many milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Use this fping executable instead of searching PATH
    #[arg(long, global = true, value_name = "PATH")]
    pub fping: Option<PathBuf>,

    /// Print less; repeat to print only results
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the fping executable in use and whether it is supported
    #[command(alias = "i")]
    Info,
    /// Ping hosts, addresses and networks
    #[command(alias = "p")]
    Ping(PingArgs),
}

#[derive(Args)]
pub struct PingArgs {
    /// Host names, IPv4 addresses, CIDR networks or quoted "address netmask" pairs
    pub targets: Vec<String>,

    /// Read targets from a file, each line classified like an inline target
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Only list targets with this status: alive, dead or noip
    #[arg(short, long)]
    pub status: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            pool_size: self.pool_size,
            probe_timeout: self.timeout.map(Duration::from_millis),
            executable: self.fping.clone(),
            quiet: self.quiet,
        }
    }
}
