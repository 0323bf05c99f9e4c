//! Playwright browser automation

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use translit_common::{Config, StaticTestCase};

use crate::error::{E2eError, E2eResult};
use crate::spec::{self, UiCase};

/// Generated Playwright configuration file
pub const CONFIG_FILE: &str = "playwright.config.js";
/// Generated test file, relative to the project directory
pub const SPEC_FILE: &str = "tests/transliteration.spec.js";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::UnknownBrowser(other.to_string())),
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    /// Page hosting the transliteration widget
    pub base_url: String,
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub retries: u32,
    pub action_timeout_ms: u64,
    pub navigation_timeout_ms: u64,
    pub test_timeout_ms: u64,
    pub ignore_https_errors: bool,

    /// Placeholder of the Singlish input field
    pub input_placeholder: String,

    /// Title of the panel preceding the Sinhala output div
    pub output_panel_title: String,

    /// Annotation type used to report the observed output
    pub actual_annotation: String,

    /// Directory the project files are written to and Playwright runs in
    pub project_dir: PathBuf,

    /// JSON reporter output, relative to `project_dir`
    pub results_file: PathBuf,

    /// Wall-clock limit for one `playwright test` invocation
    pub run_timeout: Option<Duration>,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self::build(&Config::default(), Browser::default())
    }
}

impl PlaywrightConfig {
    pub fn from_config(config: &Config) -> E2eResult<Self> {
        let browser = config.browser.browser.parse()?;
        Ok(Self::build(config, browser))
    }

    fn build(config: &Config, browser_kind: Browser) -> Self {
        let browser = &config.browser;
        Self {
            base_url: browser.base_url.clone(),
            browser: browser_kind,
            headless: browser.headless,
            viewport_width: browser.viewport_width,
            viewport_height: browser.viewport_height,
            retries: browser.retries,
            action_timeout_ms: browser.action_timeout_ms,
            navigation_timeout_ms: browser.navigation_timeout_ms,
            test_timeout_ms: browser.test_timeout_ms,
            ignore_https_errors: browser.ignore_https_errors,
            input_placeholder: browser.input_placeholder.clone(),
            output_panel_title: browser.output_panel_title.clone(),
            actual_annotation: config.pipeline.actual_annotation.clone(),
            project_dir: config.paths.project_dir.clone(),
            results_file: config.paths.results_file.clone(),
            run_timeout: match browser.run_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}

/// Exit status and output of one `playwright test` invocation
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Playwright project handle
pub struct PlaywrightHandle {
    config: PlaywrightConfig,
}

impl PlaywrightHandle {
    /// Create a new Playwright handle, verifying the CLI is available
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed(&config.project_dir)?;
        Ok(Self { config })
    }

    /// Create a handle without checking for the CLI, for generating files only
    pub fn unchecked(config: PlaywrightConfig) -> Self {
        Self { config }
    }

    /// Check if Playwright is installed
    fn check_playwright_installed(project_dir: &Path) -> E2eResult<()> {
        let dir = if project_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            project_dir
        };
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    pub fn config(&self) -> &PlaywrightConfig {
        &self.config
    }

    pub fn config_path(&self) -> PathBuf {
        self.config.project_dir.join(CONFIG_FILE)
    }

    pub fn spec_path(&self) -> PathBuf {
        self.config.project_dir.join(SPEC_FILE)
    }

    pub fn results_path(&self) -> PathBuf {
        if self.config.results_file.is_absolute() {
            self.config.results_file.clone()
        } else {
            self.config.project_dir.join(&self.config.results_file)
        }
    }

    /// Write the Playwright config and the generated spec file
    pub fn write_project(&self, cases: &[StaticTestCase], ui_cases: &[UiCase]) -> E2eResult<()> {
        let config_js = spec::build_config_script(&self.config)?;
        let spec_js = spec::build_spec_script(&self.config, cases, ui_cases)?;

        let spec_path = self.spec_path();
        if let Some(parent) = spec_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(self.config_path(), config_js)?;
        std::fs::write(&spec_path, spec_js)?;

        debug!(
            "Wrote {} and {}",
            self.config_path().display(),
            spec_path.display()
        );
        Ok(())
    }

    /// Remove the results file left by a previous run, so that a missing
    /// artifact after the next run is detectable.
    pub fn clear_stale_results(&self) -> E2eResult<()> {
        let results_path = self.results_path();
        if results_path.exists() {
            debug!("Removing stale results at {}", results_path.display());
            std::fs::remove_file(&results_path)?;
        }
        Ok(())
    }

    /// Run the generated project.
    ///
    /// A non-zero exit only means some tests failed; it is returned as an
    /// outcome, not an error.
    pub async fn run(&self) -> E2eResult<ExecutionOutcome> {
        info!("Running Playwright tests ({})", self.config.browser.as_str());
        let start = Instant::now();

        let mut cmd = TokioCommand::new("npx");
        cmd.arg("playwright")
            .arg("test")
            .arg("--config")
            .arg(CONFIG_FILE)
            .current_dir(&self.config.project_dir)
            .kill_on_drop(true);

        let output = match self.config.run_timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| {
                    E2eError::Timeout(format!("playwright test after {}s", limit.as_secs()))
                })??,
            None => cmd.output().await?,
        };

        let outcome = ExecutionOutcome {
            exit_code: output.status.code(),
            duration_ms: start.elapsed().as_millis() as u64,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !outcome.success() && !outcome.stderr.trim().is_empty() {
            warn!("Playwright stderr:\n{}", outcome.stderr.trim_end());
        }
        debug!("Playwright finished in {} ms", outcome.duration_ms);

        Ok(outcome)
    }
}
