//! Mnemo - vocabulary mnemonic builder
//!
//! Expands bare words into full study records via a text-generation
//! service, exports them to CSV, keeps them as pages in a Notion database,
//! and derives the read-only review dashboards (due today, tag counters,
//! daily additions) from that same database.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod enrichment;
pub mod export;
pub mod generator;
pub mod notion;
pub mod pipeline;
pub mod record;
pub mod schedule;
