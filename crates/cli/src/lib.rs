//! Translit QA CLI
//!
//! Command-line interface for running the transliteration E2E suite and
//! turning its results into PDF and Excel reports.

pub mod commands;
pub mod output;
