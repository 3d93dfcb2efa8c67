//! # Handball Insights
//!
//! Performance analytics over free-text handball match event logs.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (events, matches, players, metric catalog, gauges)
//! - **classify**: Text normalization and the versioned event vocabulary
//! - **teams**: Per-match team attribution
//! - **calculate**: Counters, gauges, objectives, rankings, zone maps, player reports
//! - **pipeline**: Scoped report orchestration
//! - **storage**: JSONL loading for the CLI
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod classify;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod teams;

pub use models::*;
pub use pipeline::{Analyzer, Report, ReportWarning};
