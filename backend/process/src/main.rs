use std::path::PathBuf;

use anyhow::{Context, Error};
use clap::{Parser, Subcommand};
use lexicon::{BackendKind, Larousse, connect, larousse::DEFAULT_BASE_URL};
use tracing_subscriber::{EnvFilter, fmt};

use process::{export_history, utils::read_word_file, warm_history};

#[derive(Parser, Debug)]
#[command(author, version, about = "Maintenance tasks for the dictionary history")]
struct Args {
    #[arg(long, env = "HISTORY_BACKEND", default_value = "firebase")]
    backend: BackendKind,

    #[arg(long, env = "HISTORY_URL", default_value = "http://127.0.0.1:9000/history.json")]
    history_url: String,

    #[arg(long, env = "HISTORY_KEY", default_value = "history")]
    history_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up words that are not in the history yet
    Warm {
        words: Vec<String>,

        /// One word per line
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long, env = "DICTIONARY_URL", default_value = DEFAULT_BASE_URL)]
        dictionary_url: String,
    },

    /// Write the history as plain text JSON
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let store = connect(args.backend, &args.history_url, &args.history_key)
        .await
        .with_context(|| format!("Failed to open {} history store", args.backend))?;

    match args.command {
        Command::Warm {
            mut words,
            file,
            dictionary_url,
        } => {
            if let Some(path) = file {
                words.extend(read_word_file(&path)?);
            }

            let source = Larousse::new(&dictionary_url)?;
            warm_history(&store, &source, &words).await?;
        }
        Command::Export { out } => {
            export_history(&store, out).await?;
        }
    }

    Ok(())
}
