//! Binary for the GetIn registration bot.

use anyhow::Result;
use clap::Parser;
use gbot_cli::{load_config, Cli, Commands};
use gbot_telegram::run_bot;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
    }
}
