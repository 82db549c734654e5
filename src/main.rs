mod cli;
mod dispatcher;
mod error;
mod extractors;
mod fmt;
mod ledger;
mod models;
mod patterns;
mod reports;
mod settings;
mod store;
mod tree;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Scan { page, url } => cli::scan::run(&page, &url),
        Commands::Summary => cli::summary::run(),
        Commands::List => cli::list::run(),
        Commands::Clear { yes } => cli::clear::run(yes),
        Commands::Export { output } => cli::export::run(&output),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
