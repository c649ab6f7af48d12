use clap::Parser;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = stegano_core::Result<T>;

fn main() -> CliResult<()> {
    env_logger::init();

    match CliArgs::parse().command {
        Commands::Hide(args) => args.run(),
        Commands::Unveil(args) => args.run(),
        Commands::Capacity(args) => args.run(),
        Commands::Analyze(args) => args.run(),
        Commands::Detect(args) => args.run(),
    }
}
