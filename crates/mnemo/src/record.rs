use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed review schedule attached to every record at creation time.
///
/// `D<n>` means "due for review n days after creation". The set is a static
/// template, not an audit trail: the scheduler only ever reads it.
pub const REVIEW_TAGS: [&str; 5] = ["D2", "D4", "D7", "D14", "D30"];

/// The `Review` field value every generated record carries.
pub fn default_review() -> String {
  REVIEW_TAGS.join(",")
}

/// One enriched vocabulary entry, field names matching the wire schema the
/// generator is asked to produce (and the CSV export header).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
  #[serde(rename = "Word")]
  pub word: String,
  #[serde(rename = "Part of Speech")]
  pub part_of_speech: String,
  #[serde(rename = "Chinese")]
  pub chinese: String,
  #[serde(rename = "Anchor")]
  pub anchor: String,
  #[serde(rename = "Video")]
  pub video: String,
  #[serde(rename = "Semantic")]
  pub semantic: String,
  #[serde(rename = "Example1")]
  pub example1: String,
  #[serde(rename = "Example2")]
  pub example2: String,
  #[serde(rename = "Example3")]
  pub example3: String,
  /// Comma-separated review tags, e.g. `"D2,D4,D7,D14,D30"`
  #[serde(rename = "Review")]
  pub review: String,
}

impl WordRecord {
  /// The review tags as individual trimmed labels.
  pub fn review_tags(&self) -> Vec<String> {
    self.review.split(',').map(|tag| tag.trim().to_string()).filter(|tag| !tag.is_empty()).collect()
  }

  /// Semantic-network text with sentence boundaries turned into paragraph
  /// breaks, the form the notes store receives.
  pub fn semantic_paragraphs(&self) -> String {
    self.semantic.replace(". ", ".\n")
  }
}

/// The read-path projection of a stored page: just enough to drive the
/// review scheduler and the aggregations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredWord {
  pub word: String,
  pub review_tags: Vec<String>,
  pub created_at: DateTime<Utc>,
}
