//! Translit QA Common Library
//!
//! Shared types and the report pipeline: the Playwright result-tree model, the
//! static expectation store, and the flatten/classify/enrich pass that turns raw
//! results into report records.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod results;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{BrowserConfig, Config, FontConfig, PathsConfig, WebConfig};
pub use error::{Error, Result};
pub use pipeline::{IdAllocator, PipelineOptions, ReportPipeline};
pub use results::{RawOutcome, ResultTree, Suite};
pub use store::StaticStore;
pub use types::*;

/// Translit QA version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
