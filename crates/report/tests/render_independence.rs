//! Renderers complete or fail independently of each other

use std::sync::Arc;

use translit_common::{ReportRecordSet, StaticTestCase};
use translit_report::{
    render_all, ExcelRenderer, PdfRenderer, RenderJob, Renderer, ReportError, ReportResult,
};

fn records() -> Arc<ReportRecordSet> {
    let cases: Vec<StaticTestCase> = (1..=5)
        .map(|i| StaticTestCase {
            id: format!("TC_{:04}", i),
            name: format!("Sentence {}", i),
            input: "mama gedhara yanavaa".to_string(),
            expected: "mama gedhara yanavaa".to_string(),
        })
        .collect();
    Arc::new(ReportRecordSet::preview(&cases))
}

struct PanickingRenderer;

impl Renderer for PanickingRenderer {
    fn name(&self) -> &'static str {
        "Panicking"
    }

    fn extension(&self) -> &'static str {
        "bin"
    }

    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }

    fn render(&self, _records: &ReportRecordSet) -> ReportResult<Vec<u8>> {
        panic!("renderer blew up");
    }
}

#[tokio::test]
async fn failing_excel_does_not_block_pdf() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be overwritten with a file
    let blocked = dir.path().join("test_report.xlsx");
    std::fs::create_dir_all(&blocked).unwrap();
    let pdf_path = dir.path().join("test_report.pdf");

    let outcomes = render_all(
        records(),
        vec![
            RenderJob::new(Arc::new(ExcelRenderer::new()), &blocked),
            RenderJob::new(Arc::new(PdfRenderer::default()), &pdf_path),
        ],
    )
    .await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].renderer, "Excel");
    assert!(!outcomes[0].is_ok());
    assert_eq!(outcomes[1].renderer, "PDF");
    assert_eq!(outcomes[1].result.as_ref().unwrap(), &pdf_path);
    assert!(std::fs::read(&pdf_path).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn panicking_renderer_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let xlsx_path = dir.path().join("test_report.xlsx");

    let outcomes = render_all(
        records(),
        vec![
            RenderJob::new(Arc::new(PanickingRenderer), dir.path().join("never.bin")),
            RenderJob::new(Arc::new(ExcelRenderer::new()), &xlsx_path),
        ],
    )
    .await;

    assert!(matches!(outcomes[0].result, Err(ReportError::Task(_, _))));
    assert!(outcomes[1].is_ok());
    assert!(xlsx_path.exists());
}

#[tokio::test]
async fn both_renderers_share_the_same_records() {
    let dir = tempfile::tempdir().unwrap();
    let shared = records();
    let before = (*shared).clone();

    let outcomes = render_all(
        Arc::clone(&shared),
        vec![
            RenderJob::new(Arc::new(PdfRenderer::default()), dir.path().join("r.pdf")),
            RenderJob::new(Arc::new(ExcelRenderer::new()), dir.path().join("r.xlsx")),
        ],
    )
    .await;

    assert!(outcomes.iter().all(|o| o.is_ok()));
    assert_eq!(*shared, before);
}
