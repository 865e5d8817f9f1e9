use anyhow::{Context, Result};
use colored::*;

use crate::aggregate::daily_counts;
use crate::config::StoreConfig;
use crate::notion::NotionClient;

// Keeps one very productive day from flooding the terminal
const MAX_BAR: usize = 60;

/// Show records added per calendar day as a textual bar chart.
pub async fn execute() -> Result<()> {
  let client = NotionClient::new(&StoreConfig::from_env()?)?;
  let words = client.query_pages().await.context("could not read the notes store")?;

  let counts = daily_counts(&words);
  if counts.is_empty() {
    scribe::info("the notes store has no records yet");
    return Ok(());
  }

  scribe::heading("Words added per day");
  for (date, count) in counts {
    let bar = "█".repeat(count.min(MAX_BAR));
    println!("{date}  {} {count}", bar.green());
  }
  Ok(())
}
