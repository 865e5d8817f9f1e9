//! The generation-and-persist batch.
//!
//! Strictly sequential: each word is enriched, then the batch is exported
//! to CSV, then each record is uploaded, with a pacing delay between
//! generator calls. A failure at either stage is recorded against its word
//! and never aborts the rest of the batch.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;

use crate::enrichment::{build_prompt, parse_reply};
use crate::export::export_csv;
use crate::generator::Generator;
use crate::notion::PageStore;
use crate::record::WordRecord;

/// Which stage a word failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
  /// Generator call failed or its reply did not validate; the word is
  /// dropped entirely (not exported, not uploaded).
  Generation,
  /// The store rejected the page; the word is still in the CSV.
  Persist,
}

#[derive(Debug, Clone)]
pub struct BatchFailure {
  pub word: String,
  pub stage: FailureStage,
  pub reason: String,
}

/// What a batch run produced, reported in aggregate after the run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
  /// Path of the CSV export, if any record parsed.
  pub exported: Option<PathBuf>,
  /// Records that parsed (exported regardless of upload outcome).
  pub parsed: Vec<WordRecord>,
  /// Words whose page creation succeeded.
  pub uploaded: Vec<String>,
  pub failures: Vec<BatchFailure>,
}

/// Run the batch: enrich every word, export the parsed records, then
/// upload them one at a time. `store` is `None` when the caller asked to
/// skip the upload stage.
pub async fn run_batch(
  words: &[String],
  generator: &dyn Generator,
  store: Option<&dyn PageStore>,
  out_dir: &Path,
  pacing: Duration,
) -> Result<BatchOutcome> {
  let mut outcome = BatchOutcome::default();

  for (index, word) in words.iter().enumerate() {
    if index > 0 {
      sleep(pacing).await;
    }

    scribe::step(&format!("enriching: {word}"));
    let reply = match generator.generate(&build_prompt(word)).await {
      Ok(reply) => reply,
      Err(err) => {
        scribe::warn(&format!("generation failed for {word}: {err}"));
        outcome.failures.push(BatchFailure {
          word: word.clone(),
          stage: FailureStage::Generation,
          reason: err.to_string(),
        });
        continue;
      }
    };

    match parse_reply(&reply) {
      Ok(record) => outcome.parsed.push(record),
      Err(err) => {
        scribe::warn(&format!("reply for {word} did not validate: {err}"));
        outcome.failures.push(BatchFailure {
          word: word.clone(),
          stage: FailureStage::Generation,
          reason: err.to_string(),
        });
      }
    }
  }

  if outcome.parsed.is_empty() {
    scribe::warn("no words produced a usable record; nothing to export");
    return Ok(outcome);
  }

  let path = export_csv(&outcome.parsed, out_dir)?;
  scribe::success(&format!("exported {} record(s) to {}", outcome.parsed.len(), path.display()));
  outcome.exported = Some(path);

  if let Some(store) = store {
    for record in &outcome.parsed {
      match store.create_page(record).await {
        Ok(()) => {
          scribe::success(&format!("uploaded: {}", record.word));
          outcome.uploaded.push(record.word.clone());
        }
        Err(err) => {
          scribe::warn(&format!("upload failed for {}: {err}", record.word));
          outcome.failures.push(BatchFailure {
            word: record.word.clone(),
            stage: FailureStage::Persist,
            reason: err.to_string(),
          });
        }
      }
    }
  }

  Ok(outcome)
}
