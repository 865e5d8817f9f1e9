//! Client for the hosted notes store (Notion pages API).
//!
//! Write path: one page per word with typed properties. Read path: a full
//! snapshot of the database reduced to [`StoredWord`]s, following the
//! cursor until the store reports no more pages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::config::StoreConfig;
use crate::record::{StoredWord, WordRecord};

const NOTION_VERSION: &str = "2022-06-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum NotionError {
  #[error("request to the notes store failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("notes store returned {status}: {body}")]
  Api { status: StatusCode, body: String },
}

/// Write seam consumed by the batch pipeline; lets tests record page
/// creations without a network.
#[async_trait]
pub trait PageStore {
  async fn create_page(&self, record: &WordRecord) -> Result<(), NotionError>;
}

pub struct NotionClient {
  client: Client,
  url: String,
  token: String,
  database_id: String,
}

#[derive(Deserialize)]
struct QueryResponse {
  results: Vec<Page>,
  has_more: bool,
  next_cursor: Option<String>,
}

#[derive(Deserialize)]
struct Page {
  created_time: DateTime<Utc>,
  properties: PageProperties,
}

#[derive(Deserialize)]
struct PageProperties {
  #[serde(rename = "Word")]
  word: TitleProperty,
  #[serde(rename = "Review", default)]
  review: MultiSelectProperty,
}

#[derive(Deserialize)]
struct TitleProperty {
  title: Vec<RichTextItem>,
}

#[derive(Deserialize)]
struct RichTextItem {
  text: TextContent,
}

#[derive(Deserialize)]
struct TextContent {
  content: String,
}

#[derive(Deserialize, Default)]
struct MultiSelectProperty {
  multi_select: Vec<SelectOption>,
}

#[derive(Deserialize)]
struct SelectOption {
  name: String,
}

impl From<Page> for StoredWord {
  fn from(page: Page) -> Self {
    // A page with an empty title still counts as a record; its word is ""
    let word = page
      .properties
      .word
      .title
      .into_iter()
      .next()
      .map(|item| item.text.content)
      .unwrap_or_default();
    let review_tags =
      page.properties.review.multi_select.into_iter().map(|option| option.name).collect();
    Self { word, review_tags, created_at: page.created_time }
  }
}

fn rich_text(content: &str) -> Value {
  json!([{ "text": { "content": content } }])
}

impl NotionClient {
  pub fn new(config: &StoreConfig) -> Result<Self, NotionError> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(Self {
      client,
      url: config.url.trim_end_matches('/').to_string(),
      token: config.token.clone(),
      database_id: config.database_id.clone(),
    })
  }

  fn post(&self, path: &str) -> reqwest::RequestBuilder {
    self
      .client
      .post(format!("{}{path}", self.url))
      .bearer_auth(&self.token)
      .header("Notion-Version", NOTION_VERSION)
  }

  /// The full property map for one record, per the database schema:
  /// title, select, rich text, url and multi-select properties.
  fn page_properties(record: &WordRecord) -> Value {
    // Notion rejects empty-string URLs; an absent video link becomes null
    let video = if record.video.trim().is_empty() { Value::Null } else { json!(record.video) };

    json!({
      "Word": { "title": rich_text(&record.word) },
      "Part of Speech": { "select": { "name": record.part_of_speech } },
      "Chinese": { "rich_text": rich_text(&record.chinese) },
      "Anchor": { "rich_text": rich_text(&record.anchor) },
      "Video": { "url": video },
      "Semantic": { "rich_text": rich_text(&record.semantic_paragraphs()) },
      "Example 1": { "rich_text": rich_text(&record.example1) },
      "Example 2": { "rich_text": rich_text(&record.example2) },
      "Example 3": { "rich_text": rich_text(&record.example3) },
      "Review": {
        "multi_select": record.review_tags().iter().map(|tag| json!({ "name": tag })).collect::<Vec<_>>()
      }
    })
  }

  /// Read the whole database as [`StoredWord`]s, following pagination
  /// cursors until the snapshot is complete.
  pub async fn query_pages(&self) -> Result<Vec<StoredWord>, NotionError> {
    let mut words = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
      let mut body = serde_json::Map::new();
      if let Some(cursor) = &cursor {
        body.insert("start_cursor".to_string(), json!(cursor));
      }

      let response = self
        .post(&format!("/v1/databases/{}/query", self.database_id))
        .json(&Value::Object(body))
        .send()
        .await?;

      let status = response.status();
      if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NotionError::Api { status, body });
      }

      let page: QueryResponse = response.json().await?;
      words.extend(page.results.into_iter().map(StoredWord::from));

      match (page.has_more, page.next_cursor) {
        (true, Some(next)) => cursor = Some(next),
        (true, None) => {
          // Store claims more pages but gave no cursor; take what we have
          tracing::warn!("notes store reported has_more without a next_cursor");
          break;
        }
        (false, _) => break,
      }
    }

    tracing::debug!(count = words.len(), "fetched stored words");
    Ok(words)
  }
}

#[async_trait]
impl PageStore for NotionClient {
  async fn create_page(&self, record: &WordRecord) -> Result<(), NotionError> {
    let body = json!({
      "parent": { "database_id": self.database_id },
      "properties": Self::page_properties(record),
    });

    let response = self.post("/v1/pages").json(&body).send().await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(NotionError::Api { status, body });
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::default_review;

  fn record() -> WordRecord {
    WordRecord {
      word: "invoice".to_string(),
      part_of_speech: "n.".to_string(),
      chinese: "發票".to_string(),
      anchor: "in-voice".to_string(),
      video: String::new(),
      semantic: "Bill is informal. Receipt proves payment.".to_string(),
      example1: "e1".to_string(),
      example2: "e2".to_string(),
      example3: "e3".to_string(),
      review: default_review(),
    }
  }

  #[test]
  fn properties_follow_the_database_schema() {
    let props = NotionClient::page_properties(&record());

    assert_eq!(props["Word"]["title"][0]["text"]["content"], "invoice");
    assert_eq!(props["Part of Speech"]["select"]["name"], "n.");
    assert_eq!(props["Chinese"]["rich_text"][0]["text"]["content"], "發票");
    assert_eq!(props["Review"]["multi_select"].as_array().unwrap().len(), 5);
    assert_eq!(props["Review"]["multi_select"][0]["name"], "D2");
  }

  #[test]
  fn empty_video_becomes_a_null_url() {
    let props = NotionClient::page_properties(&record());
    assert!(props["Video"]["url"].is_null());

    let mut with_video = record();
    with_video.video = "https://youtu.be/abc".to_string();
    let props = NotionClient::page_properties(&with_video);
    assert_eq!(props["Video"]["url"], "https://youtu.be/abc");
  }

  #[test]
  fn semantic_text_is_written_with_paragraph_breaks() {
    let props = NotionClient::page_properties(&record());
    assert_eq!(
      props["Semantic"]["rich_text"][0]["text"]["content"],
      "Bill is informal.\nReceipt proves payment."
    );
  }

  #[test]
  fn stored_word_projection_handles_empty_titles() {
    let page: Page = serde_json::from_value(json!({
      "created_time": "2024-01-01T04:00:00.000Z",
      "properties": {
        "Word": { "title": [] },
        "Review": { "multi_select": [{ "name": "D2" }, { "name": "D4" }] }
      }
    }))
    .unwrap();

    let stored = StoredWord::from(page);
    assert_eq!(stored.word, "");
    assert_eq!(stored.review_tags, vec!["D2", "D4"]);
  }

  #[test]
  fn stored_word_projection_reads_title_and_created_time() {
    let page: Page = serde_json::from_value(json!({
      "created_time": "2024-03-10T09:30:00.000Z",
      "properties": {
        "Word": { "title": [{ "text": { "content": "itinerary" } }] },
        "Review": { "multi_select": [] }
      }
    }))
    .unwrap();

    let stored = StoredWord::from(page);
    assert_eq!(stored.word, "itinerary");
    assert!(stored.review_tags.is_empty());
    assert_eq!(stored.created_at.to_rfc3339(), "2024-03-10T09:30:00+00:00");
  }
}
