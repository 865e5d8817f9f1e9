//! Fixed-offset review scheduling.
//!
//! A record is due on the exact day its offset since creation matches one of
//! its review tags, nothing else. There is no catch-up for missed days and
//! the tags are never written back; "due today" is always derived at read
//! time.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::record::StoredWord;

/// The study calendar is anchored to one fixed civil timezone (UTC+8).
/// Day-difference arithmetic on raw instants gives wrong answers across
/// zone boundaries, so both endpoints are reduced to local dates first.
pub const STUDY_UTC_OFFSET_HOURS: i32 = 8;

pub fn study_zone() -> FixedOffset {
  // 8h east is always within chrono's valid offset range
  FixedOffset::east_opt(STUDY_UTC_OFFSET_HOURS * 3600).unwrap()
}

/// The calendar date of an instant in the study timezone.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
  instant.with_timezone(&study_zone()).date_naive()
}

/// Whole calendar days between the two instants' local midnights.
pub fn day_offset(created_at: DateTime<Utc>, today: DateTime<Utc>) -> i64 {
  (local_date(today) - local_date(created_at)).num_days()
}

/// The review tag a record is due for today, if any.
///
/// The candidate is `D{day_offset}`; it only counts when the record's own
/// tag set contains it. Future-dated records (negative offset) are never
/// due.
pub fn due_tag(record: &StoredWord, today: DateTime<Utc>) -> Option<String> {
  let offset = day_offset(record.created_at, today);
  if offset < 0 {
    return None;
  }
  let candidate = format!("D{offset}");
  record.review_tags.iter().any(|tag| *tag == candidate).then_some(candidate)
}
