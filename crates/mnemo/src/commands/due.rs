use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;

use crate::config::StoreConfig;
use crate::notion::NotionClient;
use crate::schedule::due_tag;

/// List the words whose day-offset since creation matches one of their
/// review tags today.
pub async fn execute() -> Result<()> {
  let client = NotionClient::new(&StoreConfig::from_env()?)?;
  let words = client.query_pages().await.context("could not read the notes store")?;

  let today = Utc::now();
  let due: Vec<(&str, String)> =
    words.iter().filter_map(|word| due_tag(word, today).map(|tag| (word.word.as_str(), tag))).collect();

  if due.is_empty() {
    scribe::info("no words are due for review today");
    return Ok(());
  }

  scribe::heading("Due today");
  for (word, tag) in due {
    println!("{} ({})", word.bold(), tag.cyan());
  }
  Ok(())
}
