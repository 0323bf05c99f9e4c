//! Error types for report rendering

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Renderer '{0}' task failed: {1}")]
    Task(String, String),
}

pub type ReportResult<T> = Result<T, ReportError>;
