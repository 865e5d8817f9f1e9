//! Turning a raw word into a generation request and validating the reply.
//!
//! The parse is deliberately all-or-nothing: a reply that is not one JSON
//! object carrying every expected field discards the whole word for this
//! run. No partial recovery, no field defaults.

use serde_json::Value;
use thiserror::Error;

use crate::record::WordRecord;

/// System instruction sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are a TOEIC vocabulary mnemonic designer. You excel at \
   memory anchors and semantic association, and you reply with exactly the JSON object you \
   are asked for, nothing else.";

/// Every key the generator's reply must carry.
pub const REPLY_FIELDS: [&str; 10] = [
  "Word",
  "Part of Speech",
  "Chinese",
  "Anchor",
  "Video",
  "Semantic",
  "Example1",
  "Example2",
  "Example3",
  "Review",
];

#[derive(Debug, Error)]
pub enum EnrichError {
  #[error("reply is not valid JSON: {0}")]
  InvalidJson(#[from] serde_json::Error),
  #[error("reply is not a JSON object")]
  NotAnObject,
  #[error("reply is missing the `{0}` field")]
  MissingField(&'static str),
}

/// Split a bulk text blob into words: commas and newlines separate, tokens
/// are trimmed, empties dropped. Order is preserved.
pub fn split_words(blob: &str) -> Vec<String> {
  blob
    .replace('\n', ",")
    .split(',')
    .map(str::trim)
    .filter(|word| !word.is_empty())
    .map(str::to_string)
    .collect()
}

/// Build the generation prompt for one word.
///
/// The reply contract is spelled out inline: one JSON object, these exact
/// keys, plain-text values, and the fixed review schedule.
pub fn build_prompt(word: &str) -> String {
  format!(
    r#"For the TOEIC vocabulary word "{word}", produce:

1. Part of speech and a Traditional Chinese gloss (e.g. "n. 飛機")
2. A memory anchor (association, word-splitting, sound-alike or situational imagery that makes the word stick)
3. Three TOEIC-style example sentences, each followed by its Traditional Chinese translation
4. One YouTube lyric or video link whose context connects to the word (may be left empty)
5. A semantic network: 2-3 synonyms with how they differ, common collocations, and 3 collocation examples

Reply with exactly one JSON object in the following format. Every value must be plain text:
{{
  "Word": "{word}",
  "Part of Speech": "",
  "Chinese": "",
  "Anchor": "",
  "Video": "",
  "Semantic": "",
  "Example1": "",
  "Example2": "",
  "Example3": "",
  "Review": "D2,D4,D7,D14,D30"
}}"#
  )
}

/// Strip one surrounding Markdown code fence, if present. Chat models often
/// wrap JSON replies in ```json fences even when told not to.
fn strip_fence(raw: &str) -> &str {
  let trimmed = raw.trim();
  if let Some(inner) = trimmed.strip_prefix("```").and_then(|rest| rest.strip_suffix("```")) {
    inner.strip_prefix("json").unwrap_or(inner).trim()
  } else {
    trimmed
  }
}

/// Parse and validate a generator reply into a [`WordRecord`].
pub fn parse_reply(raw: &str) -> Result<WordRecord, EnrichError> {
  let value: Value = serde_json::from_str(strip_fence(raw))?;
  let object = value.as_object().ok_or(EnrichError::NotAnObject)?;

  for field in REPLY_FIELDS {
    if !object.contains_key(field) {
      return Err(EnrichError::MissingField(field));
    }
  }

  Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full_reply(word: &str) -> String {
    format!(
      r#"{{
        "Word": "{word}",
        "Part of Speech": "n.",
        "Chinese": "發票",
        "Anchor": "in-voice: the voice inside the envelope asking for money",
        "Video": "",
        "Semantic": "Bill is informal. Receipt proves payment. Statement summarizes.",
        "Example1": "Please settle the invoice by Friday. 請在週五前支付發票。",
        "Example2": "The invoice lists three items. 發票上列了三項。",
        "Example3": "We emailed the invoice today. 我們今天寄出發票。",
        "Review": "D2,D4,D7,D14,D30"
      }}"#
    )
  }

  #[test]
  fn split_words_handles_commas_newlines_and_blanks() {
    let blob = "invoice, itinerary\nnegotiate,\n , refund";
    assert_eq!(split_words(blob), vec!["invoice", "itinerary", "negotiate", "refund"]);
  }

  #[test]
  fn split_words_on_empty_blob_is_empty() {
    assert!(split_words("").is_empty());
    assert!(split_words(" ,\n, ").is_empty());
  }

  #[test]
  fn prompt_names_the_word_and_the_schedule() {
    let prompt = build_prompt("invoice");
    assert!(prompt.contains("\"invoice\""));
    assert!(prompt.contains("\"Review\": \"D2,D4,D7,D14,D30\""));
    for field in REPLY_FIELDS {
      assert!(prompt.contains(&format!("\"{field}\"")), "prompt should name {field}");
    }
  }

  #[test]
  fn parse_accepts_a_complete_reply() {
    let record = parse_reply(&full_reply("invoice")).unwrap();
    assert_eq!(record.word, "invoice");
    assert_eq!(record.chinese, "發票");
    assert_eq!(record.review_tags().len(), 5);
  }

  #[test]
  fn parse_accepts_a_fenced_reply() {
    let fenced = format!("```json\n{}\n```", full_reply("refund"));
    let record = parse_reply(&fenced).unwrap();
    assert_eq!(record.word, "refund");
  }

  #[test]
  fn parse_rejects_invalid_json() {
    let err = parse_reply("I'm sorry, I can't help with that.").unwrap_err();
    assert!(matches!(err, EnrichError::InvalidJson(_)));
  }

  #[test]
  fn parse_rejects_non_object_json() {
    let err = parse_reply(r#"["Word", "invoice"]"#).unwrap_err();
    assert!(matches!(err, EnrichError::NotAnObject));
  }

  #[test]
  fn parse_rejects_missing_fields() {
    let reply = full_reply("invoice").replace(r#""Anchor": "in-voice: the voice inside the envelope asking for money","#, "");
    let err = parse_reply(&reply).unwrap_err();
    assert!(matches!(err, EnrichError::MissingField("Anchor")));
  }
}
