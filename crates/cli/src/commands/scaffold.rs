//! Scaffold Command

use anyhow::Result;

use translit_common::Config;
use translit_e2e::{PlaywrightConfig, PlaywrightHandle, TestRunner};

use super::report::load_store;
use crate::output::{print_info, print_success};

pub fn execute(config: &Config) -> Result<()> {
    let store = load_store(config)?;
    let runner = TestRunner::with_handle(PlaywrightHandle::unchecked(
        PlaywrightConfig::from_config(config)?,
    ));
    runner.scaffold(&store)?;

    let playwright = runner.playwright();
    print_success(&format!("Wrote {}", playwright.config_path().display()));
    print_success(&format!("Wrote {}", playwright.spec_path().display()));
    print_info("Run with: npx playwright test");
    Ok(())
}
