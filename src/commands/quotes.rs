use clap::{Args, Subcommand};
use mini_apis_core::{Quote, QuoteRepository};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct QuoteCommand {
    #[command(subcommand)]
    pub command: QuoteSubcommand,
}

#[derive(Subcommand)]
pub enum QuoteSubcommand {
    /// Show a quote by ID, or a random one
    Show {
        /// Quote ID (random if omitted)
        id: Option<i64>,

        /// Pick among the most liked quotes
        #[arg(long, conflicts_with = "id")]
        popular: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List all quotes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new quote
    Add {
        /// Quote text (1-400 characters)
        text: String,

        /// Who said it (1-40 characters)
        #[arg(long, short)]
        name: String,
    },

    /// Like a quote
    Like {
        /// Quote ID
        id: i64,
    },

    /// Restore the default quotes
    Reset {
        /// Reset password
        password: String,
    },
}

fn print_quote(quote: &Quote) {
    println!("\"{}\"", quote.quote);
    println!("  - {}", quote.name);
    println!("ID: {}  Likes: {}", quote.id, quote.likes);
}

impl QuoteCommand {
    pub fn run(&self, repo: &mut QuoteRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            QuoteSubcommand::Show {
                id,
                popular,
                format,
            } => {
                let quote = match id {
                    Some(id) => repo.quote_by_id(*id)?,
                    None if *popular => repo.popular_quote()?,
                    None => repo.random_quote()?,
                };

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(quote)?),
                    OutputFormat::Text => print_quote(quote),
                }
                Ok(())
            }

            QuoteSubcommand::List { format } => {
                let quotes = repo.quotes();

                if quotes.is_empty() {
                    println!("No quotes found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(quotes)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<5}  {:<6}  {:<20}  QUOTE", "ID", "LIKES", "NAME");
                        println!("{}", "-".repeat(80));
                        for quote in quotes {
                            println!(
                                "{:<5}  {:<6}  {:<20}  {}",
                                quote.id,
                                quote.likes,
                                truncate(&quote.name, 20),
                                truncate(&quote.quote, 43)
                            );
                        }
                        println!(
                            "\nTotal: {} quote(s), most likes: {}",
                            quotes.len(),
                            repo.max_likes()
                        );
                    }
                }
                Ok(())
            }

            QuoteSubcommand::Add { text, name } => {
                let id = repo.new_quote(text, name)?;
                println!("Added quote {}", id);
                Ok(())
            }

            QuoteSubcommand::Like { id } => {
                repo.like_quote(*id)?;
                let quote = repo.quote_by_id(*id)?;
                println!("Quote {} now has {} like(s)", quote.id, quote.likes);
                Ok(())
            }

            QuoteSubcommand::Reset { password } => {
                repo.reset_quotes(password)?;
                println!("Restored {} default quote(s)", repo.len());
                Ok(())
            }
        }
    }
}
