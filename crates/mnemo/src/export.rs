//! Local CSV export of parsed records.
//!
//! Every successfully parsed word lands here before any upload is
//! attempted, so a failed upload never loses generated content. Files are
//! written UTF-8 with a BOM so spreadsheet software opens the CJK text
//! losslessly, and the timestamped name keeps repeated runs from
//! overwriting each other.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::record::WordRecord;
use crate::schedule::study_zone;

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Write one CSV file named `output_today_{YYYYMMDDHHMM}.csv` under
/// `out_dir` (created on demand) and return its path.
///
/// Columns are the record's wire field names, one row per record.
pub fn export_csv(records: &[WordRecord], out_dir: &Path) -> Result<PathBuf> {
  fs::create_dir_all(out_dir)
    .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

  // Stamp in the study timezone so "today's" file is named for the study
  // day, not the server's UTC day
  let stamp = Utc::now().with_timezone(&study_zone()).format("%Y%m%d%H%M");
  let path = out_dir.join(format!("output_today_{stamp}.csv"));

  let mut file =
    File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
  file.write_all(BOM)?;

  let mut writer = csv::Writer::from_writer(file);
  for record in records {
    writer.serialize(record)?;
  }
  writer.flush()?;

  Ok(path)
}

/// Read an exported file back into records. The inverse of [`export_csv`];
/// tolerates the BOM it writes.
pub fn read_csv(path: &Path) -> Result<Vec<WordRecord>> {
  let text =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let text = text.trim_start_matches('\u{feff}');

  let mut reader = csv::Reader::from_reader(text.as_bytes());
  let mut records = Vec::new();
  for row in reader.deserialize() {
    records.push(row.with_context(|| format!("malformed row in {}", path.display()))?);
  }
  Ok(records)
}
