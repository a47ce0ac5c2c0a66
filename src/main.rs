use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pressroom::config::read_config;
use pressroom::logger::configure_logger;
use pressroom::page_data;
use pressroom::store::open_store;

#[derive(Parser)]
#[command(name = "pressroom", about = "Static blog post data layer")]
struct Cli {
    /// Configuration file to use
    #[arg(short, long, default_value = "pressroom.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List post summaries, newest first
    List,
    /// List post identifiers as static route parameters
    Ids,
    /// Show one post, body included
    Show { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = read_config(&cli.config)
        .with_context(|| format!("Error reading configuration {}", cli.config.display()))?;
    configure_logger(&config)?;

    let store = open_store(&config)?;

    match cli.command {
        Command::List => {
            let summaries = page_data::home_page(store.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Command::Ids => {
            let paths = page_data::static_paths(store.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&paths)?);
        }
        Command::Show { id } => {
            let post = page_data::post_page(store.as_ref(), &id).await?;
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
    }

    Ok(())
}
