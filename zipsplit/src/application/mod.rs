pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use zipsplit_core::error::Result;

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    match cli.command {
        Commands::Split {
            source,
            level,
            store,
            deterministic,
            yes,
        } => handlers::handle_split(source, level, store, deterministic, yes),
        Commands::Plan { source, json } => handlers::handle_plan(source, json),
        Commands::List { archive } => handlers::handle_list(archive),
    }
}
