use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod shell;

#[derive(Parser)]
#[command(name = "modeshift", version, about = "Timed accessibility modes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available modes
    Modes(commands::modes::ModesArgs),
    /// Format a number of seconds as a remaining-time label
    Format(commands::format::FormatArgs),
    /// Interactive session over a live engine
    Session(commands::session::SessionArgs),
    /// Replay a command script on a virtual clock
    Simulate(commands::simulate::SimulateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    // stdout carries command output; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Modes(args) => commands::modes::run(args),
        Commands::Format(args) => commands::format::run(args),
        Commands::Session(args) => commands::session::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
