use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use mnemo::commands;

#[derive(Parser)]
#[command(name = "mnemo")]
#[command(
  about = "Vocabulary mnemonic builder\nGenerate study records with a language model and keep them in a Notion database"
)]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate study records for words, export them to CSV and upload them
  Enrich {
    /// Words to enrich; comma- or newline-separated blobs also accepted
    words: Vec<String>,
    /// Read additional words from a file
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Directory for the CSV export
    #[arg(long, default_value = "outputs")]
    out_dir: PathBuf,
    /// Generate and export only, skip the upload stage
    #[arg(long)]
    skip_upload: bool,
  },
  /// List words due for review today
  Due,
  /// Count stored records per review tag
  Tags,
  /// Show records added per day as a bar chart
  Chart,
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  match cli.command {
    Commands::Enrich { words, input, out_dir, skip_upload } => {
      commands::enrich::execute(words, input, out_dir, skip_upload).await?;
    }
    Commands::Due => {
      commands::due::execute().await?;
    }
    Commands::Tags => {
      commands::tags::execute().await?;
    }
    Commands::Chart => {
      commands::chart::execute().await?;
    }
  }

  Ok(())
}
