//! Jammer - bundle resolver for versioned front-end modules

use clap::Parser;

use jammer::cli::{Cli, Commands};
use jammer::commands::{self, Context};
use jammer::error::Result;
use jammer::logging;

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone();
    let overrides = cli.overrides();
    let context = || Context::from_current_dir(config_path.as_deref(), overrides.clone());

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(&context()?, args),
        Commands::Contents(args) => commands::contents::run(&context()?, args),
        Commands::Headers(args) => commands::headers::run(&context()?, args),
        Commands::Session(args) => commands::session::run(&context()?, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
