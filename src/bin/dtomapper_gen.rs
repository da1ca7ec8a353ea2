use clap::Parser;
use dtomapper::cli::{run_cli, Cli};
use dtomapper::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
