//! Report Commands

use anyhow::{bail, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use translit_common::{Config, ReportPipeline, ReportRecordSet, ResultTree, StaticStore};
use translit_report::{render_all, ExcelRenderer, PdfRenderer, RenderJob, Renderer};

use crate::output::{print_error, print_success};

#[derive(Args)]
pub struct ReportArgs {
    /// Results artifact to process (defaults to [paths].results_file)
    #[arg(long)]
    pub results: Option<PathBuf>,
}

pub async fn execute(args: ReportArgs, config: &Config) -> Result<()> {
    let results_path = args.results.unwrap_or_else(|| config.paths.results_path());
    let store = load_store(config)?;
    let tree = load_results(&results_path)?;
    let records = ReportPipeline::new(&store, config.pipeline.clone()).run(&tree);
    render_reports(config, records).await
}

pub fn load_store(config: &Config) -> Result<StaticStore> {
    let store = StaticStore::load(&config.paths.static_data)?;
    info!(
        "Loaded {} static case(s) from {}",
        store.len(),
        config.paths.static_data.display()
    );
    Ok(store)
}

/// Load a results artifact, exiting with status 1 when it does not exist
pub fn load_results(path: &Path) -> Result<ResultTree> {
    match ResultTree::from_file(path) {
        Ok(tree) => Ok(tree),
        Err(translit_common::Error::ResultsMissing(path)) => missing_results(&path),
        Err(e) => Err(e.into()),
    }
}

pub fn missing_results(path: &str) -> ! {
    print_error(&format!(
        "Test results not found at {}. No reports were generated.",
        path
    ));
    std::process::exit(1)
}

/// Render the PDF and Excel reports concurrently. Each outcome is reported on
/// its own; the command fails afterwards if any renderer failed.
pub async fn render_reports(config: &Config, records: ReportRecordSet) -> Result<()> {
    let renderers: Vec<Arc<dyn Renderer>> = vec![
        Arc::new(PdfRenderer::new(config.fonts.clone())),
        Arc::new(ExcelRenderer::new()),
    ];
    let jobs: Vec<RenderJob> = renderers
        .into_iter()
        .map(|renderer| {
            let path = config.report_path(renderer.extension());
            RenderJob::new(renderer, path)
        })
        .collect();
    let total = jobs.len();

    let outcomes = render_all(Arc::new(records), jobs).await;

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => print_success(&format!("{} report: {}", outcome.renderer, path.display())),
            Err(e) => {
                failed += 1;
                print_error(&format!("{} report failed: {}", outcome.renderer, e));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} report(s) failed", failed, total);
    }
    Ok(())
}
