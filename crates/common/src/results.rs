//! Playwright JSON reporter output
//!
//! Only the parts the report pipeline reads are modelled; every other field of
//! the reporter output is ignored on deserialization.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Root of a `results.json` artifact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTree {
    #[serde(default)]
    pub suites: Vec<Suite>,
}

/// A group of specs and nested suites. Either list may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub specs: Vec<Spec>,
    #[serde(default)]
    pub suites: Vec<Suite>,
}

/// A single named test scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    pub title: String,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
}

/// One executed test of a spec (one per project)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestEntry {
    #[serde(default)]
    pub results: Vec<TestRun>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// One attempt of a test. Retries append further attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    #[serde(default)]
    pub status: String,
}

/// Out-of-band note attached to a test during execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Flattened result of one spec
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOutcome {
    pub title: String,
    /// Raw status of the first attempt, empty when the test never ran
    pub status: String,
    pub annotations: Vec<Annotation>,
}

impl RawOutcome {
    pub fn passed(&self) -> bool {
        self.status == crate::types::PASSED_STATUS
    }

    /// Description of the first annotation with the given type
    pub fn annotation(&self, kind: &str) -> Option<&str> {
        self.annotations
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.description.as_deref().unwrap_or(""))
    }
}

impl ResultTree {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::from)
    }

    /// Load a results artifact. A missing file is reported as [`Error::ResultsMissing`].
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ResultsMissing(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| Error::MalformedResults {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Every spec of the tree in depth-first pre-order
    pub fn outcomes(&self) -> Vec<RawOutcome> {
        flatten(&self.suites)
    }
}

/// Flatten suites into outcomes. Each suite contributes its own specs before
/// descending into its child suites; source order is kept at every level.
pub fn flatten(suites: &[Suite]) -> Vec<RawOutcome> {
    let mut out = Vec::new();
    for suite in suites {
        walk(suite, &mut out);
    }
    out
}

fn walk(suite: &Suite, out: &mut Vec<RawOutcome>) {
    for spec in &suite.specs {
        out.push(outcome_of(spec));
    }
    for child in &suite.suites {
        walk(child, out);
    }
}

fn outcome_of(spec: &Spec) -> RawOutcome {
    let Some(test) = spec.tests.first() else {
        warn!("Spec '{}' has no test entry; reporting it as failed", spec.title);
        return RawOutcome {
            title: spec.title.clone(),
            ..Default::default()
        };
    };

    let status = match test.results.first() {
        Some(run) => run.status.clone(),
        None => {
            warn!("Spec '{}' has no result; reporting it as failed", spec.title);
            String::new()
        }
    };

    if test.results.len() > 1 {
        debug!(
            "Spec '{}' ran {} attempts; using the first",
            spec.title,
            test.results.len()
        );
    }

    RawOutcome {
        title: spec.title.clone(),
        status,
        annotations: test.annotations.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(title: &str, status: &str) -> Spec {
        Spec {
            title: title.to_string(),
            tests: vec![TestEntry {
                results: vec![TestRun {
                    status: status.to_string(),
                }],
                annotations: vec![],
            }],
        }
    }

    fn titles(outcomes: &[RawOutcome]) -> Vec<&str> {
        outcomes.iter().map(|o| o.title.as_str()).collect()
    }

    #[test]
    fn test_flatten_specs_before_child_suites() {
        let tree = vec![Suite {
            title: "root".to_string(),
            specs: vec![spec("a", "passed"), spec("b", "passed")],
            suites: vec![Suite {
                title: "child".to_string(),
                specs: vec![spec("c", "failed")],
                suites: vec![Suite {
                    title: "grandchild".to_string(),
                    specs: vec![spec("d", "passed"), spec("e", "failed")],
                    suites: vec![],
                }],
            }],
        }];

        let outcomes = flatten(&tree);
        assert_eq!(titles(&outcomes), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_flatten_sibling_suites_in_source_order() {
        let tree = vec![
            Suite {
                title: "first".to_string(),
                specs: vec![],
                suites: vec![Suite {
                    specs: vec![spec("x", "passed")],
                    ..Default::default()
                }],
            },
            Suite {
                title: "second".to_string(),
                specs: vec![spec("y", "passed")],
                suites: vec![],
            },
        ];

        assert_eq!(titles(&flatten(&tree)), vec!["x", "y"]);
    }

    #[test]
    fn test_empty_suite_yields_nothing() {
        let tree = ResultTree::from_json(r#"{"suites": [{"title": "empty"}]}"#).unwrap();
        assert!(tree.outcomes().is_empty());
    }

    #[test]
    fn test_spec_without_results_still_yields_outcome() {
        let tree = vec![Suite {
            specs: vec![
                Spec {
                    title: "no tests".to_string(),
                    tests: vec![],
                },
                Spec {
                    title: "no results".to_string(),
                    tests: vec![TestEntry::default()],
                },
            ],
            ..Default::default()
        }];

        let outcomes = flatten(&tree);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.passed()));
    }

    #[test]
    fn test_parse_playwright_reporter_output() {
        let json = r#"{
            "config": {"version": "1.40.0"},
            "suites": [{
                "title": "transliteration.spec.js",
                "file": "transliteration.spec.js",
                "specs": [],
                "suites": [{
                    "title": "Singlish to Sinhala Transliteration Tests",
                    "specs": [{
                        "title": "TC_0001: Simple greeting",
                        "ok": true,
                        "tests": [{
                            "projectName": "",
                            "annotations": [
                                {"type": "actualOutput", "description": "ආයුබෝවන්"}
                            ],
                            "results": [
                                {"status": "passed", "duration": 1200, "retry": 0},
                                {"status": "failed", "duration": 900, "retry": 1}
                            ]
                        }]
                    }]
                }]
            }],
            "errors": [],
            "stats": {"expected": 1}
        }"#;

        let tree = ResultTree::from_json(json).unwrap();
        let outcomes = tree.outcomes();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].title, "TC_0001: Simple greeting");
        assert!(outcomes[0].passed());
        assert_eq!(outcomes[0].annotation("actualOutput"), Some("ආයුබෝවන්"));
    }

    #[test]
    fn test_annotation_uses_first_match() {
        let outcome = RawOutcome {
            title: "t".to_string(),
            status: "passed".to_string(),
            annotations: vec![
                Annotation {
                    kind: "issue".to_string(),
                    description: Some("ignored".to_string()),
                },
                Annotation {
                    kind: "actualOutput".to_string(),
                    description: Some("first".to_string()),
                },
                Annotation {
                    kind: "actualOutput".to_string(),
                    description: Some("second".to_string()),
                },
            ],
        };

        assert_eq!(outcome.annotation("actualOutput"), Some("first"));
        assert_eq!(outcome.annotation("missing"), None);
    }

    #[test]
    fn test_from_file_missing_is_results_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResultTree::from_file(&dir.path().join("results.json")).unwrap_err();
        assert!(matches!(err, Error::ResultsMissing(_)));
    }

    #[test]
    fn test_from_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = ResultTree::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedResults { .. }));
    }
}
