use clap::{Args, Subcommand};
use mini_apis::config::Config;

use super::OutputFormat;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        println!("port: {}", config.port);
                        println!("data_dir: {}", config.data_dir.display());
                        println!("  quotes: {}", config.quotes_path().display());
                        println!("  planner: {}", config.planner_path().display());
                        println!("reset_hash: {}", config.reset_hash);
                    }
                }
                Ok(())
            }
        }
    }
}
