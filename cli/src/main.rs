mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{districts, modes, reproject, street, sub_index, walkability_map};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Log to stderr so command output on stdout stays machine-readable.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).with_filter(filter))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Districts => districts::run(&cli),
        Commands::Walkability(args) => walkability_map::run(&cli, args),
        Commands::SubIndex(args) => sub_index::run(&cli, args),
        Commands::Street(args) => street::run(&cli, args),
        Commands::Modes(args) => modes::run(&cli, args),
        Commands::Reproject(args) => reproject::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
