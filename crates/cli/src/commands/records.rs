//! Records Command

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use translit_common::{Config, ReportPipeline};

use super::report::{load_results, load_store};
use crate::output::{print_list, print_warning, OutputFormat};

#[derive(Args)]
pub struct RecordsArgs {
    /// Results artifact to process (defaults to [paths].results_file)
    #[arg(long)]
    pub results: Option<PathBuf>,
}

pub fn execute(args: RecordsArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let results_path = args.results.unwrap_or_else(|| config.paths.results_path());
    let store = load_store(config)?;
    let tree = load_results(&results_path)?;
    let records = ReportPipeline::new(&store, config.pipeline.clone()).run(&tree);

    print_list(records.records(), format);

    if matches!(format, OutputFormat::Table) {
        let summary = records.summary();
        println!(
            "Total Tests: {} | Passed: {} | Failed: {}",
            summary.total, summary.passed, summary.failed
        );
        if summary.total > 0 && summary.passed == 0 {
            print_warning("No test passed");
        }
    }
    Ok(())
}
