//! Pure reductions over the stored collection for the read-only dashboards.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::record::{StoredWord, REVIEW_TAGS};
use crate::schedule::local_date;

/// How many records carry each tag of the fixed review vocabulary, in
/// schedule order.
///
/// Every record is created with all five tags, so each count is expected to
/// equal the total record count; this is a sanity check on the collection,
/// not a progress tracker.
pub fn tag_counts(records: &[StoredWord]) -> Vec<(&'static str, usize)> {
  REVIEW_TAGS
    .iter()
    .map(|tag| {
      let count = records.iter().filter(|r| r.review_tags.iter().any(|t| t == tag)).count();
      (*tag, count)
    })
    .collect()
}

/// Records created per calendar day (study timezone), ascending by date.
/// Days with no records do not appear.
pub fn daily_counts(records: &[StoredWord]) -> Vec<(NaiveDate, usize)> {
  let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
  for record in records {
    *by_day.entry(local_date(record.created_at)).or_insert(0) += 1;
  }
  by_day.into_iter().collect()
}
