//! Report pipeline
//!
//! Turns a Playwright result tree into the flat record set the renderers consume:
//! - Flatten the suite tree into outcomes (discovery order)
//! - Classify each outcome as a UI or functional test
//! - Mint `Pos_Fun_NNNN` / `Neg_Fun_NNNN` ids for functional tests
//! - Join functional tests with their static expectation

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::results::{RawOutcome, ResultTree};
use crate::store::StaticStore;
use crate::types::{
    ClassifiedRecord, FunctionalRecord, ReportRecord, ReportRecordSet, Status, UiRecord,
};

/// Title substring that marks a UI interaction test
pub const DEFAULT_UI_MARKER: &str = "Pos_UI";

/// Annotation type carrying the observed transliteration output
pub const DEFAULT_ACTUAL_ANNOTATION: &str = "actualOutput";

/// Tunables of the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub ui_marker: String,
    pub actual_annotation: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            ui_marker: DEFAULT_UI_MARKER.to_string(),
            actual_annotation: DEFAULT_ACTUAL_ANNOTATION.to_string(),
        }
    }
}

// ============================================================================
// Id allocation
// ============================================================================

/// Per-run pass/fail counters for functional test ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    positive: u32,
    negative: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for a functional test with the given status
    pub fn next(&mut self, status: Status) -> String {
        if status.is_pass() {
            self.positive += 1;
            format!("Pos_Fun_{:04}", self.positive)
        } else {
            self.negative += 1;
            format!("Neg_Fun_{:04}", self.negative)
        }
    }

    pub fn positive(&self) -> u32 {
        self.positive
    }

    pub fn negative(&self) -> u32 {
        self.negative
    }
}

/// Split a test title at its first `:` into a trimmed id and optional rest
fn split_title(title: &str) -> (&str, Option<&str>) {
    match title.split_once(':') {
        Some((id, rest)) => (id.trim(), Some(rest.trim())),
        None => (title.trim(), None),
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Classifies and enriches outcomes against a static table
pub struct ReportPipeline<'a> {
    store: &'a StaticStore,
    options: PipelineOptions,
}

impl<'a> ReportPipeline<'a> {
    pub fn new(store: &'a StaticStore, options: PipelineOptions) -> Self {
        Self { store, options }
    }

    pub fn with_defaults(store: &'a StaticStore) -> Self {
        Self::new(store, PipelineOptions::default())
    }

    /// Process a whole result tree with fresh counters
    pub fn run(&self, tree: &ResultTree) -> ReportRecordSet {
        self.process(&tree.outcomes())
    }

    /// Process already-flattened outcomes with fresh counters
    pub fn process(&self, outcomes: &[RawOutcome]) -> ReportRecordSet {
        let mut ids = IdAllocator::new();
        let records: Vec<ReportRecord> = outcomes
            .iter()
            .map(|outcome| self.classify(outcome, &mut ids).into())
            .collect();

        let set = ReportRecordSet::new(records);
        let summary = set.summary();
        info!(
            "Processed {} record(s): {} passed, {} failed",
            summary.total, summary.passed, summary.failed
        );
        set
    }

    /// Classify one outcome, drawing a functional id from `ids` when needed
    pub fn classify(&self, outcome: &RawOutcome, ids: &mut IdAllocator) -> ClassifiedRecord {
        let status = Status::from_raw(&outcome.status);
        let actual = outcome
            .annotation(&self.options.actual_annotation)
            .unwrap_or_default()
            .to_string();
        let (title_id, rest) = split_title(&outcome.title);

        if outcome.title.contains(&self.options.ui_marker) {
            let name = match rest {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => outcome.title.clone(),
            };
            debug!("UI test '{}' keeps id {}", outcome.title, title_id);
            return ClassifiedRecord::Ui(UiRecord {
                id: title_id.to_string(),
                name,
                actual,
                status,
            });
        }

        let id = ids.next(status);
        let (name, input, expected) = match self.store.get(title_id) {
            Some(case) => (case.name.clone(), case.input.clone(), case.expected.clone()),
            None => {
                warn!(
                    "No static test case matches '{}' (title '{}'); leaving its fields blank",
                    title_id, outcome.title
                );
                (String::new(), String::new(), String::new())
            }
        };
        debug!("Functional test {} reported as {}", title_id, id);

        ClassifiedRecord::Functional(FunctionalRecord {
            id,
            source_id: title_id.to_string(),
            name,
            input,
            expected,
            actual,
            status,
        })
    }
}
