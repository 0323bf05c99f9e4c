//! Run Command

use anyhow::Result;
use clap::Args;
use tracing::info;

use translit_common::{Config, ReportPipeline};
use translit_e2e::{E2eError, TestRunner};

use super::report::{load_results, load_store, missing_results, render_reports};
use crate::output::print_warning;

#[derive(Args)]
pub struct RunArgs {
    /// Reuse the existing results file instead of running Playwright
    #[arg(long)]
    pub skip_tests: bool,
}

pub async fn execute(args: RunArgs, config: &Config) -> Result<()> {
    let store = load_store(config)?;

    let tree = if args.skip_tests {
        info!("Skipping test execution");
        load_results(&config.paths.results_path())?
    } else {
        info!("Running tests...");
        let runner = TestRunner::new(config)?;
        match runner.execute(&store).await {
            Ok(artifacts) => {
                match &artifacts.execution {
                    Some(outcome) => info!(
                        "Playwright exited with {:?} after {} ms",
                        outcome.exit_code, outcome.duration_ms
                    ),
                    None => print_warning(
                        "Playwright did not run to completion; reporting its partial results",
                    ),
                }
                info!("Loaded results from {}", artifacts.results_path.display());
                artifacts.results
            }
            Err(E2eError::ResultsMissing(path)) => missing_results(&path),
            Err(e) => return Err(e.into()),
        }
    };

    info!("Generating reports...");
    let records = ReportPipeline::new(&store, config.pipeline.clone()).run(&tree);
    render_reports(config, records).await
}
