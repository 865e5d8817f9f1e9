//! Scribe - small logging helpers for the mnemo CLI
//!
//! All output goes to stderr so stdout stays reserved for command results
//! (lists, tables, charts) that a user may want to pipe elsewhere.
//!
//! Levels: `info()`, `warn()`, `error()`, `success()`, `step()`.

use colored::*;

/// Write one message to stderr, line by line.
fn emit(prefix: &ColoredString, message: &str) {
  for line in message.lines() {
    eprintln!("{prefix} {line}");
  }
}

/// General progress information
pub fn info(message: &str) {
  emit(&"•".blue().bold(), message);
}

/// Something needs attention but the run continues
pub fn warn(message: &str) {
  emit(&"!".yellow().bold(), message);
}

/// Something went wrong
pub fn error(message: &str) {
  emit(&"✗".red().bold(), message);
}

/// A unit of work completed
pub fn success(message: &str) {
  emit(&"✓".green().bold(), message);
}

/// The start of a per-item processing step
pub fn step(message: &str) {
  emit(&"→".cyan(), message);
}

/// Section heading for grouped report output
pub fn heading(message: &str) {
  eprintln!();
  eprintln!("{}", message.bold());
  eprintln!("{}", "-".repeat(message.chars().count()));
}

#[cfg(test)]
mod tests {
  use super::*;

  // The functions only write to stderr; these just pin down that none of
  // them panics on awkward input.

  #[test]
  fn multiline_messages_do_not_panic() {
    info("first\nsecond");
    warn("first\nsecond");
    error("first\nsecond");
    success("first\nsecond");
    step("first\nsecond");
  }

  #[test]
  fn empty_and_unicode_messages_do_not_panic() {
    info("");
    heading("複習報告");
    success("单字 ✓");
  }
}
