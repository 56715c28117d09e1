//! Pedalera CLI - command-line interface for pedalera bank management.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pedalera")]
#[command(author, version, about = "Pedalboard routing-graph toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known plugins and their ports
    Plugins(commands::plugins::PluginsArgs),

    /// Print the structure of a bank file
    Show(commands::show::ShowArgs),

    /// Check that a bank file loads against the current plugin registry
    Validate(commands::validate::ValidateArgs),

    /// Write a demo bank file
    Demo(commands::demo::DemoArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plugins(args) => commands::plugins::run(args),
        Commands::Show(args) => commands::show::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Demo(args) => commands::demo::run(args),
    }
}
