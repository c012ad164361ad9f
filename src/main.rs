use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{ConfigCommand, PlannerCommand, QuoteCommand};
use mini_apis::config::Config;
use mini_apis_core::{PlannerRepository, QuoteRepository};

#[derive(Parser)]
#[command(name = "mini-apis")]
#[command(version)]
#[command(about = "Administration tool for the quotemaster and myPlanner documents", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage quotemaster quotes
    Quotes(QuoteCommand),

    /// Manage myPlanner users, events and tasks
    Planner(PlannerCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Quotes(cmd)) => {
            let mut repo = QuoteRepository::open(config.quotes_path(), config.reset_hash.clone())?;
            cmd.run(&mut repo)?;
        }
        Some(Commands::Planner(cmd)) => {
            let mut repo = PlannerRepository::open(config.planner_path())?;
            cmd.run(&mut repo)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
