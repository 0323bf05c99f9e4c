//! Generated Playwright project: config and test file
//!
//! Case data is embedded as JSON literals, so inputs containing quotes,
//! backticks or Sinhala text need no JavaScript escaping of their own.

use serde::{Deserialize, Serialize};
use serde_json::json;

use translit_common::StaticTestCase;

use crate::error::E2eResult;
use crate::playwright::PlaywrightConfig;

/// A UI interaction check: keys are typed one by one and the output panel
/// must become non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiCase {
    pub id: String,
    pub name: String,
    pub keys: String,
}

impl UiCase {
    pub fn new(id: impl Into<String>, name: impl Into<String>, keys: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            keys: keys.into(),
        }
    }

    /// Title as it appears in the results tree
    pub fn title(&self) -> String {
        format!("{}: {}", self.id, self.name)
    }
}

/// The real-time update check run alongside the functional cases
pub fn default_ui_cases() -> Vec<UiCase> {
    vec![UiCase::new("Pos_UI_0001", "Output updates in real-time", "m")]
}

/// Title a functional case runs under
pub fn case_title(case: &StaticTestCase) -> String {
    format!("{}: {}", case.id, case.name)
}

/// Render `playwright.config.js`
pub fn build_config_script(config: &PlaywrightConfig) -> E2eResult<String> {
    let output_file = config.results_file.to_string_lossy();
    let use_block = json!({
        "browserName": config.browser.as_str(),
        "headless": config.headless,
        "viewport": {
            "width": config.viewport_width,
            "height": config.viewport_height,
        },
        "ignoreHTTPSErrors": config.ignore_https_errors,
        "actionTimeout": config.action_timeout_ms,
        "navigationTimeout": config.navigation_timeout_ms,
    });
    let reporter = json!([["list"], ["json", { "outputFile": output_file }]]);

    Ok(format!(
        r#"// Generated by translit; changes are overwritten on the next run.
const {{ defineConfig }} = require('@playwright/test');

module.exports = defineConfig({{
  testDir: './tests',
  retries: {retries},
  timeout: {timeout},
  reporter: {reporter},
  use: {use_block},
}});
"#,
        retries = config.retries,
        timeout = config.test_timeout_ms,
        reporter = serde_json::to_string(&reporter)?,
        use_block = serde_json::to_string_pretty(&use_block)?,
    ))
}

/// Render the test file covering every static case plus the UI checks
pub fn build_spec_script(
    config: &PlaywrightConfig,
    cases: &[StaticTestCase],
    ui_cases: &[UiCase],
) -> E2eResult<String> {
    Ok(format!(
        r#"// Generated by translit; changes are overwritten on the next run.
const {{ test, expect }} = require('@playwright/test');

const BASE_URL = {base_url};
const INPUT_PLACEHOLDER = {placeholder};
const OUTPUT_PANEL_TITLE = {panel};
const ACTUAL_ANNOTATION = {annotation};

const CASES = {cases};

const UI_CASES = {ui_cases};

const inputField = (page) => page.getByPlaceholder(INPUT_PLACEHOLDER);

const outputField = (page) =>
  page
    .locator('.panel-title', {{ hasText: OUTPUT_PANEL_TITLE }})
    .locator('xpath=following-sibling::div[1]');

async function recordActual(output, testInfo) {{
  const text = await output.textContent({{ timeout: 5000 }}).catch(() => null);
  testInfo.annotations.push({{
    type: ACTUAL_ANNOTATION,
    description: (text ?? '').trim(),
  }});
}}

test.describe('Singlish to Sinhala transliteration', () => {{
  test.beforeEach(async ({{ page }}) => {{
    await page.goto(BASE_URL);
  }});

  for (const tc of CASES) {{
    test(`${{tc.id}}: ${{tc.name}}`, async ({{ page }}, testInfo) => {{
      const output = outputField(page);
      try {{
        await inputField(page).fill(tc.input);
        await expect(output).toHaveText(tc.expected);
      }} finally {{
        await recordActual(output, testInfo);
      }}
    }});
  }}

  for (const ui of UI_CASES) {{
    test(`${{ui.id}}: ${{ui.name}}`, async ({{ page }}, testInfo) => {{
      const output = outputField(page);
      try {{
        await inputField(page).pressSequentially(ui.keys);
        await expect(output).not.toBeEmpty();
      }} finally {{
        await recordActual(output, testInfo);
      }}
    }});
  }}
}});
"#,
        base_url = serde_json::to_string(&config.base_url)?,
        placeholder = serde_json::to_string(&config.input_placeholder)?,
        panel = serde_json::to_string(&config.output_panel_title)?,
        annotation = serde_json::to_string(&config.actual_annotation)?,
        cases = serde_json::to_string_pretty(cases)?,
        ui_cases = serde_json::to_string_pretty(ui_cases)?,
    ))
}
