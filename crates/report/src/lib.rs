//! Translit QA report rendering
//!
//! Renderers consume a finalized [`ReportRecordSet`](translit_common::ReportRecordSet)
//! as read-only data:
//! - [`ExcelRenderer`] writes a single-sheet xlsx workbook
//! - [`PdfRenderer`] writes a landscape, multi-page PDF table
//!
//! [`render_all`] runs several renderers concurrently; each one completes or
//! fails on its own.

pub mod error;
pub mod excel;
pub mod output;
pub mod pdf;
pub mod render;

pub use error::{ReportError, ReportResult};
pub use excel::ExcelRenderer;
pub use output::write_report;
pub use pdf::PdfRenderer;
pub use render::{render_all, render_to_file, RenderJob, RenderOutcome, Renderer};
