mod simulate;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use game_core::{scoring, GameConfig};
use storage::{BestScoreRepository, ScoreStore};
use tracing_subscriber::EnvFilter;

use crate::simulate::{simulate, SimulationOptions};

#[derive(Parser, Debug)]
struct Cli {
    /// Defaults to the database the desktop game uses.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored best score.
    Show,
    /// Forget the stored best score.
    Reset,
    /// Play one round with a bot on virtual time.
    Simulate {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 500)]
        think_ms: u64,
        /// Let the bot memorize the preview.
        #[arg(long)]
        peek: bool,
        #[arg(long)]
        json: bool,
        /// Compare against and update the stored best score.
        #[arg(long)]
        record: bool,
    },
}

async fn open_store(database_url: Option<String>) -> Result<ScoreStore> {
    let database_url = match database_url {
        Some(url) => url,
        None => storage::default_database_url()?,
    };
    tracing::debug!(database_url = %database_url, "opening score store");
    ScoreStore::new(&database_url).await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Show => {
            let store = open_store(cli.database_url).await?;
            let best = store.load_best().await?;
            println!("{}", scoring::best_label(best));
        }
        Command::Reset => {
            let store = open_store(cli.database_url).await?;
            store.clear_best().await?;
            println!("best score cleared");
        }
        Command::Simulate {
            seed,
            think_ms,
            peek,
            json,
            record,
        } => {
            let store = if record {
                Some(open_store(cli.database_url).await?)
            } else {
                None
            };
            let best = match &store {
                Some(store) => store.load_best().await?,
                None => None,
            };

            let options = SimulationOptions {
                seed: seed.unwrap_or_else(rand::random),
                think: Duration::from_millis(think_ms),
                peek,
                best,
            };
            let run = simulate(GameConfig::default(), &options)?;

            if let Some(store) = &store {
                for score in &run.persisted {
                    store.save_best(*score).await?;
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                println!("seed {} finished in {} clicks", run.seed, run.clicks);
                for message in &run.messages {
                    println!("\n{message}");
                }
            }
        }
    }

    Ok(())
}
