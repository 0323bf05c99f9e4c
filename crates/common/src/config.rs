//! Workspace configuration (`translit.toml`)

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::pipeline::PipelineOptions;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "translit.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub pipeline: PipelineOptions,
    pub browser: BrowserConfig,
    pub fonts: FontConfig,
    pub web: WebConfig,
}

/// Filesystem locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// JSON table of static test cases
    pub static_data: PathBuf,

    /// Directory receiving the generated Playwright project
    pub project_dir: PathBuf,

    /// Playwright JSON reporter output, relative to `project_dir` when not absolute
    pub results_file: PathBuf,

    /// Directory for rendered reports
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            static_data: PathBuf::from("data/test_cases.json"),
            project_dir: PathBuf::from("."),
            results_file: PathBuf::from("test-results/results.json"),
            output_dir: PathBuf::from("public"),
        }
    }
}

impl PathsConfig {
    /// Absolute or project-relative location of the results artifact
    pub fn results_path(&self) -> PathBuf {
        if self.results_file.is_absolute() {
            self.results_file.clone()
        } else {
            self.project_dir.join(&self.results_file)
        }
    }
}

/// Browser and widget settings for the Playwright run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Page hosting the transliteration widget
    pub base_url: String,

    /// chromium, firefox or webkit
    pub browser: String,

    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Retries for failed tests
    pub retries: u32,

    pub action_timeout_ms: u64,
    pub navigation_timeout_ms: u64,

    /// Per-test timeout
    pub test_timeout_ms: u64,

    pub ignore_https_errors: bool,

    /// Placeholder text of the Singlish input field
    pub input_placeholder: String,

    /// Title of the panel whose following div shows the Sinhala output
    pub output_panel_title: String,

    /// Wall-clock limit for the whole `playwright test` run (0 = none)
    pub run_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.swifttranslator.com/".to_string(),
            browser: "chromium".to_string(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            retries: 2,
            action_timeout_ms: 30_000,
            navigation_timeout_ms: 60_000,
            test_timeout_ms: 60_000,
            ignore_https_errors: true,
            input_placeholder: "Input Your Singlish Text Here.".to_string(),
            output_panel_title: "Sinhala".to_string(),
            run_timeout_secs: 0,
        }
    }
}

/// TrueType fonts for the PDF report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font for Latin-only reports
    pub latin: Option<PathBuf>,

    /// Font covering Sinhala, used when a report contains non-Latin text
    pub fallback: Option<PathBuf>,
}

/// Live-serving settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl WebConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.addr
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("web.addr '{}': {}", self.addr, e)))
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when it is absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.ui_marker.is_empty() {
            return Err(Error::InvalidConfig("pipeline.ui_marker must not be empty".into()));
        }
        if self.pipeline.actual_annotation.is_empty() {
            return Err(Error::InvalidConfig(
                "pipeline.actual_annotation must not be empty".into(),
            ));
        }
        match self.browser.browser.as_str() {
            "chromium" | "firefox" | "webkit" => {}
            other => {
                return Err(Error::InvalidConfig(format!(
                    "browser.browser must be chromium, firefox or webkit (got '{}')",
                    other
                )))
            }
        }
        self.web.socket_addr()?;
        Ok(())
    }

    /// Where a report with the given extension is written
    pub fn report_path(&self, extension: &str) -> PathBuf {
        self.paths.output_dir.join(format!("test_report.{}", extension))
    }
}
