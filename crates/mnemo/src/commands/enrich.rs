use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::{pacing_from_env, GeneratorConfig, StoreConfig};
use crate::enrichment::split_words;
use crate::generator::OpenAiGenerator;
use crate::notion::{NotionClient, PageStore};
use crate::pipeline::{run_batch, BatchOutcome, FailureStage};

/// Run the full enrichment batch: words from the command line and/or an
/// input file, CSV export, then upload unless asked to skip it.
pub async fn execute(
  words: Vec<String>,
  input: Option<PathBuf>,
  out_dir: PathBuf,
  skip_upload: bool,
) -> Result<()> {
  let mut blob = words.join(",");
  if let Some(path) = input {
    let text =
      fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    blob.push(',');
    blob.push_str(&text);
  }

  let words = split_words(&blob);
  if words.is_empty() {
    bail!("no words to process; pass words as arguments or via --input");
  }
  scribe::info(&format!("processing {} word(s)", words.len()));

  let generator = OpenAiGenerator::new(&GeneratorConfig::from_env()?)?;
  let store = if skip_upload {
    None
  } else {
    Some(NotionClient::new(&StoreConfig::from_env()?)?)
  };
  let store_ref: Option<&dyn PageStore> = store.as_ref().map(|s| s as &dyn PageStore);

  let outcome = run_batch(&words, &generator, store_ref, &out_dir, pacing_from_env()).await?;
  report(&outcome, skip_upload);
  Ok(())
}

fn report(outcome: &BatchOutcome, skip_upload: bool) {
  scribe::heading("Batch summary");

  if skip_upload {
    scribe::info(&format!("parsed {} record(s), upload skipped", outcome.parsed.len()));
  } else {
    scribe::success(&format!("uploaded: {}", outcome.uploaded.len()));
    for word in &outcome.uploaded {
      scribe::info(&format!("  {word}"));
    }
  }

  if !outcome.failures.is_empty() {
    scribe::error(&format!("failed: {}", outcome.failures.len()));
    for failure in &outcome.failures {
      let stage = match failure.stage {
        FailureStage::Generation => "generation",
        FailureStage::Persist => "upload",
      };
      scribe::info(&format!("  {} ({stage}): {}", failure.word, failure.reason));
    }
  }
}
