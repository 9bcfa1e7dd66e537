mod commands;
mod terminal;

use commands::{CommandLine, Commands, info, ping};
use fastping_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    let cfg: Config = commands.config();
    print::banner(cfg.quiet);

    match commands.command {
        Commands::Info => {
            print::header("about the probe", cfg.quiet);
            info::info(&cfg)
        }
        Commands::Ping(args) => {
            print::header("getting ready to probe", cfg.quiet);
            ping::ping(args, &cfg).await
        }
    }
}
