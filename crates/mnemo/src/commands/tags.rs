use anyhow::{Context, Result};

use crate::aggregate::tag_counts;
use crate::config::StoreConfig;
use crate::notion::NotionClient;

/// Show how many stored records carry each review tag. With the fixed
/// all-five-tags schedule every line should equal the total record count;
/// a mismatch means hand-edited pages.
pub async fn execute() -> Result<()> {
  let client = NotionClient::new(&StoreConfig::from_env()?)?;
  let words = client.query_pages().await.context("could not read the notes store")?;

  scribe::heading("Review tags");
  for (tag, count) in tag_counts(&words) {
    println!("{tag:>4}  {count}");
  }
  scribe::info(&format!("{} record(s) total", words.len()));
  Ok(())
}
