//! Static expectation store

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::StaticTestCase;

/// Ordered, read-only table of static test cases with an id index
#[derive(Debug, Clone, Default)]
pub struct StaticStore {
    cases: Vec<StaticTestCase>,
    index: HashMap<String, usize>,
}

impl StaticStore {
    /// Build a store. When an id repeats, lookups resolve to its first occurrence.
    pub fn new(cases: Vec<StaticTestCase>) -> Self {
        let mut index = HashMap::with_capacity(cases.len());
        for (i, case) in cases.iter().enumerate() {
            if index.contains_key(&case.id) {
                warn!("Duplicate static test id '{}' at position {}", case.id, i);
                continue;
            }
            index.insert(case.id.clone(), i);
        }
        Self { cases, index }
    }

    /// Load the table from a JSON file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Static test data not found at {}; using an empty table", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let cases: Vec<StaticTestCase> =
            serde_json::from_str(&content).map_err(|e| Error::MalformedStaticData {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!("Loaded {} static test case(s) from {}", cases.len(), path.display());
        Ok(Self::new(cases))
    }

    pub fn get(&self, id: &str) -> Option<&StaticTestCase> {
        self.index.get(id).map(|&i| &self.cases[i])
    }

    pub fn cases(&self) -> &[StaticTestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
