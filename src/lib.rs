//! Statcast CSV dashboard: parse a pitch-by-pitch CSV, filter it by
//! category, and serve it as JSON alongside a static browser UI.

pub mod config;
pub mod dataset;
pub mod filter;
pub mod serve;
