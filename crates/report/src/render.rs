//! Renderer abstraction and concurrent rendering

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use translit_common::ReportRecordSet;

use crate::error::{ReportError, ReportResult};
use crate::output::write_report;

/// Turns a finalized record set into a downloadable document
pub trait Renderer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    /// MIME type of the rendered bytes
    fn content_type(&self) -> &'static str;

    /// Render the records. Must not mutate shared state.
    fn render(&self, records: &ReportRecordSet) -> ReportResult<Vec<u8>>;
}

/// A renderer paired with its destination
#[derive(Clone)]
pub struct RenderJob {
    pub renderer: Arc<dyn Renderer>,
    pub path: PathBuf,
}

impl RenderJob {
    pub fn new(renderer: Arc<dyn Renderer>, path: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            path: path.into(),
        }
    }
}

/// Completion of one render job
#[derive(Debug)]
pub struct RenderOutcome {
    pub renderer: &'static str,
    /// Path written, which differs from the job path after a locked-file fallback
    pub result: ReportResult<PathBuf>,
}

impl RenderOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Render and write one job on the current thread
pub fn render_to_file(job: &RenderJob, records: &ReportRecordSet) -> ReportResult<PathBuf> {
    let bytes = job.renderer.render(records)?;
    write_report(&job.path, &bytes)
}

/// Run every job as its own blocking task over the shared records.
///
/// Jobs complete or fail independently; outcomes come back in job order.
pub async fn render_all(records: Arc<ReportRecordSet>, jobs: Vec<RenderJob>) -> Vec<RenderOutcome> {
    let tasks = jobs.into_iter().map(|job| {
        let records = Arc::clone(&records);
        async move {
            let name = job.renderer.name();
            info!("Generating {} report...", name);

            let handle = tokio::task::spawn_blocking(move || render_to_file(&job, &records));
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ReportError::Task(name.to_string(), e.to_string())),
            };

            match &result {
                Ok(path) => info!("{} report saved to: {}", name, path.display()),
                Err(e) => error!("Error generating {} report: {}", name, e),
            }

            RenderOutcome {
                renderer: name,
                result,
            }
        }
    });

    futures::future::join_all(tasks).await
}
