//! Test runner that writes the Playwright project, runs it and loads results

use std::path::PathBuf;
use tracing::{debug, info, warn};

use translit_common::{Config, ResultTree, StaticStore};

use crate::error::{E2eError, E2eResult};
use crate::playwright::{ExecutionOutcome, PlaywrightConfig, PlaywrightHandle};
use crate::spec::{default_ui_cases, UiCase};

/// Everything a run leaves behind for the report pipeline
#[derive(Debug)]
pub struct RunArtifacts {
    /// `None` when the Playwright process could not be run to completion
    pub execution: Option<ExecutionOutcome>,
    pub results_path: PathBuf,
    pub results: ResultTree,
}

/// Main E2E test runner
pub struct TestRunner {
    playwright: PlaywrightHandle,
    ui_cases: Vec<UiCase>,
}

impl TestRunner {
    /// Create a runner from workspace configuration, verifying Playwright is installed
    pub fn new(config: &Config) -> E2eResult<Self> {
        let playwright = PlaywrightHandle::new(PlaywrightConfig::from_config(config)?)?;
        Ok(Self::with_handle(playwright))
    }

    /// Create a runner around an existing handle
    pub fn with_handle(playwright: PlaywrightHandle) -> Self {
        Self {
            playwright,
            ui_cases: default_ui_cases(),
        }
    }

    pub fn playwright(&self) -> &PlaywrightHandle {
        &self.playwright
    }

    pub fn ui_cases(&self) -> &[UiCase] {
        &self.ui_cases
    }

    /// Write the Playwright config and test file for the given cases
    pub fn scaffold(&self, store: &StaticStore) -> E2eResult<()> {
        if store.is_empty() {
            warn!("No static test cases loaded; only UI checks will run");
        }
        self.playwright.write_project(store.cases(), &self.ui_cases)?;
        info!(
            "Generated {} functional and {} UI test(s) in {}",
            store.len(),
            self.ui_cases.len(),
            self.playwright.spec_path().display()
        );
        Ok(())
    }

    /// Scaffold, run the browser tests and load the results tree.
    ///
    /// Failing tests and a failed Playwright process do not abort the run.
    /// A stale artifact that cannot be removed, or a missing or unreadable
    /// artifact afterwards, is an error.
    pub async fn execute(&self, store: &StaticStore) -> E2eResult<RunArtifacts> {
        self.scaffold(store)?;
        self.playwright.clear_stale_results()?;

        let execution = match self.playwright.run().await {
            Ok(outcome) => {
                if outcome.success() {
                    info!("All tests passed ({} ms)", outcome.duration_ms);
                } else {
                    warn!(
                        "Tests completed with failures (exit code {:?}, {} ms)",
                        outcome.exit_code, outcome.duration_ms
                    );
                }
                Some(outcome)
            }
            Err(e) => {
                warn!("Tests completed with failures: {}", e);
                None
            }
        };

        let results = self.load_results()?;
        Ok(RunArtifacts {
            execution,
            results_path: self.playwright.results_path(),
            results,
        })
    }

    /// Read the JSON reporter output of the last run
    pub fn load_results(&self) -> E2eResult<ResultTree> {
        let path = self.playwright.results_path();
        if !path.exists() {
            return Err(E2eError::ResultsMissing(path.display().to_string()));
        }
        debug!("Loading results from {}", path.display());
        Ok(ResultTree::from_file(&path)?)
    }
}
