// src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            db_path,
            seed,
            fail_on_missing_seed,
            quiet,
        } => commands::cmd_run(&db_path, &seed, fail_on_missing_seed, quiet),
    };

    if let Err(err) = result {
        eprintln!("{err:#}");
        let code = err
            .downcast_ref::<assetfix::Error>()
            .map_or(1, assetfix::Error::exit_code);
        std::process::exit(code);
    }
}
