//! Error types for E2E runs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Playwright not found. Install with: npm install -D @playwright/test && npx playwright install")]
    PlaywrightNotFound,

    #[error("Unknown browser '{0}' (expected chromium, firefox or webkit)")]
    UnknownBrowser(String),

    #[error("Test results file not found at {0}")]
    ResultsMissing(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] translit_common::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
