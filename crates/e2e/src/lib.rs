//! Transliteration E2E runner
//!
//! This crate drives the Singlish-to-Sinhala widget through Playwright:
//! - Generates a Playwright project from the static test cases
//! - Runs it via the Playwright CLI with the JSON reporter enabled
//! - Loads the reporter output as a [`translit_common::ResultTree`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    E2E Test Runner (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── scaffold(store)      -> playwright.config.js + spec  │
//! │    ├── execute(store)       -> RunArtifacts                 │
//! │    └── load_results()       -> ResultTree                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Generated spec                                             │
//! │    ├── one test per static case: fill, expect toHaveText    │
//! │    ├── UI checks: pressSequentially, expect not empty       │
//! │    └── actualOutput annotation, recorded pass or fail       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod playwright;
pub mod runner;
pub mod spec;

pub use error::{E2eError, E2eResult};
pub use playwright::{Browser, ExecutionOutcome, PlaywrightConfig, PlaywrightHandle};
pub use runner::{RunArtifacts, TestRunner};
pub use spec::{default_ui_cases, UiCase};
