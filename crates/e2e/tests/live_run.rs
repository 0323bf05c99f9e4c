//! Runner tests against a generated project
//!
//! The live test needs Node, `@playwright/test` and network access.
//! Run with: cargo test --package translit-e2e --test live_run -- --ignored

use tempfile::TempDir;

use translit_common::{Config, ReportPipeline, StaticStore, StaticTestCase};
use translit_e2e::{E2eError, PlaywrightConfig, PlaywrightHandle, TestRunner};

fn store() -> StaticStore {
    StaticStore::new(vec![
        StaticTestCase {
            id: "TC_0001".to_string(),
            name: "Greeting".to_string(),
            input: "aayuboovan".to_string(),
            expected: "ආයුබෝවන්".to_string(),
        },
        StaticTestCase {
            id: "TC_0002".to_string(),
            name: "Simple sentence".to_string(),
            input: "mama gedhara yanavaa".to_string(),
            expected: "මම ගෙදර යනවා".to_string(),
        },
    ])
}

fn config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.paths.project_dir = dir.path().to_path_buf();
    config
}

#[test]
fn generated_project_lists_every_case() {
    let dir = TempDir::new().unwrap();
    let pw = PlaywrightConfig::from_config(&config(&dir)).unwrap();
    let runner = TestRunner::with_handle(PlaywrightHandle::unchecked(pw));

    runner.scaffold(&store()).unwrap();
    assert_eq!(runner.ui_cases().len(), 1);

    let spec = std::fs::read_to_string(runner.playwright().spec_path()).unwrap();
    for id in ["TC_0001", "TC_0002", "Pos_UI_0001"] {
        assert!(spec.contains(id), "missing {id}");
    }
    let config_js = std::fs::read_to_string(runner.playwright().config_path()).unwrap();
    assert!(config_js.contains("testDir: './tests'"));
}

#[test]
fn stale_results_are_cleared_before_a_run() {
    let dir = TempDir::new().unwrap();
    let pw = PlaywrightConfig::from_config(&config(&dir)).unwrap();
    let runner = TestRunner::with_handle(PlaywrightHandle::unchecked(pw));

    let results = runner.playwright().results_path();
    std::fs::create_dir_all(results.parent().unwrap()).unwrap();
    std::fs::write(
        &results,
        r#"{"suites":[{"title":"old.spec.js","specs":[{"title":"TC_0001: Greeting","tests":[{"results":[{"status":"passed"}]}]}]}]}"#,
    )
    .unwrap();
    assert!(runner.load_results().is_ok());

    runner.scaffold(&store()).unwrap();
    runner.playwright().clear_stale_results().unwrap();

    assert!(matches!(
        runner.load_results(),
        Err(E2eError::ResultsMissing(_))
    ));
}

#[tokio::test]
#[ignore]
async fn live_run_produces_report_records() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let runner = match TestRunner::new(&config) {
        Ok(runner) => runner,
        Err(E2eError::PlaywrightNotFound) => return,
        Err(e) => panic!("unexpected error: {e}"),
    };

    let store = store();
    let artifacts = runner.execute(&store).await.unwrap();
    let records = ReportPipeline::with_defaults(&store).run(&artifacts.results);

    assert_eq!(records.len(), 3);
    assert!(records.iter().any(|r| r.id() == "Pos_UI_0001"));
}
