//! Core types for Translit QA

use serde::{Deserialize, Serialize};

/// Inputs up to this many characters are short.
pub const SHORT_INPUT_MAX: usize = 30;

/// Inputs of at least this many characters are long.
pub const LONG_INPUT_MIN: usize = 300;

/// Raw result status Playwright reports for a passing attempt
pub const PASSED_STATUS: &str = "passed";

/// A predefined transliteration case with its expected output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticTestCase {
    pub id: String,
    pub name: String,
    pub input: String,
    pub expected: String,
}

/// Report-facing outcome of a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Pass,
    Fail,
    /// Only used for static previews that were never executed.
    #[serde(rename = "Not Run")]
    NotRun,
}

impl Status {
    /// Map a raw Playwright status. Anything other than `passed` is a failure,
    /// including `skipped`, `timedOut` and `interrupted`.
    pub fn from_raw(raw: &str) -> Self {
        if raw == PASSED_STATUS {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "Pass",
            Status::Fail => "Fail",
            Status::NotRun => "Not Run",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Status::Pass)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input length bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthType {
    #[serde(rename = "S")]
    Short,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Long,
}

impl LengthType {
    /// Bucket an input by its length in characters. Missing input is short.
    pub fn of(input: Option<&str>) -> Self {
        let len = input.map(|s| s.chars().count()).unwrap_or(0);
        if len <= SHORT_INPUT_MAX {
            LengthType::Short
        } else if len >= LONG_INPUT_MIN {
            LengthType::Long
        } else {
            LengthType::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthType::Short => "S",
            LengthType::Medium => "M",
            LengthType::Long => "L",
        }
    }
}

impl std::fmt::Display for LengthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`LengthType::of`]
pub fn length_type(input: Option<&str>) -> LengthType {
    LengthType::of(input)
}

// ============================================================================
// Classified records
// ============================================================================

/// Placeholder input shown for UI interaction tests
pub const UI_INPUT: &str = "UI Interaction";
/// Placeholder expectation shown for UI interaction tests
pub const UI_EXPECTED: &str = "Real-time update";
pub const UI_JUSTIFICATION: &str = "Real-time validation";
pub const UI_COVERED: &str = "UI Responsiveness";

/// A UI interaction test. Keeps the identifier written in its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiRecord {
    pub id: String,
    pub name: String,
    pub actual: String,
    pub status: Status,
}

/// A functional transliteration test joined with its static expectation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalRecord {
    /// Freshly minted `Pos_Fun_NNNN` / `Neg_Fun_NNNN` identifier
    pub id: String,
    /// Identifier from the test title, used only for the static lookup
    pub source_id: String,
    pub name: String,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub status: Status,
}

/// Outcome of classifying one raw result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedRecord {
    Ui(UiRecord),
    Functional(FunctionalRecord),
}

impl ClassifiedRecord {
    pub fn id(&self) -> &str {
        match self {
            ClassifiedRecord::Ui(r) => &r.id,
            ClassifiedRecord::Functional(r) => &r.id,
        }
    }
}

// ============================================================================
// Report records
// ============================================================================

/// One row of a rendered report. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    id: String,
    name: String,
    input: String,
    expected: String,
    actual: String,
    status: Status,
    length_type: LengthType,
    justification: String,
    covered: String,
}

impl ReportRecord {
    /// Row for a static case that has not been executed
    pub fn preview(case: &StaticTestCase) -> Self {
        Self {
            id: case.id.clone(),
            name: case.name.clone(),
            input: case.input.clone(),
            expected: case.expected.clone(),
            actual: String::new(),
            status: Status::NotRun,
            length_type: LengthType::of(Some(&case.input)),
            justification: String::new(),
            covered: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn length_type(&self) -> LengthType {
        self.length_type
    }

    pub fn justification(&self) -> &str {
        &self.justification
    }

    pub fn covered(&self) -> &str {
        &self.covered
    }

    /// Text of a single column
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Id => &self.id,
            Column::Name => &self.name,
            Column::Input => &self.input,
            Column::Expected => &self.expected,
            Column::Actual => &self.actual,
            Column::Status => self.status.as_str(),
            Column::LengthType => self.length_type.as_str(),
            Column::Justification => &self.justification,
            Column::Covered => &self.covered,
        }
    }
}

impl From<UiRecord> for ReportRecord {
    fn from(r: UiRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            input: UI_INPUT.to_string(),
            expected: UI_EXPECTED.to_string(),
            actual: r.actual,
            status: r.status,
            length_type: LengthType::Short,
            justification: UI_JUSTIFICATION.to_string(),
            covered: UI_COVERED.to_string(),
        }
    }
}

impl From<FunctionalRecord> for ReportRecord {
    fn from(r: FunctionalRecord) -> Self {
        let length_type = LengthType::of(Some(&r.input));
        Self {
            id: r.id,
            name: r.name,
            input: r.input,
            expected: r.expected,
            actual: r.actual,
            status: r.status,
            length_type,
            justification: String::new(),
            covered: String::new(),
        }
    }
}

impl From<ClassifiedRecord> for ReportRecord {
    fn from(r: ClassifiedRecord) -> Self {
        match r {
            ClassifiedRecord::Ui(ui) => ui.into(),
            ClassifiedRecord::Functional(f) => f.into(),
        }
    }
}

/// Report columns in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    Input,
    Expected,
    Actual,
    Status,
    LengthType,
    Justification,
    Covered,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Id,
        Column::Name,
        Column::Input,
        Column::Expected,
        Column::Actual,
        Column::Status,
        Column::LengthType,
        Column::Justification,
        Column::Covered,
    ];

    /// Spreadsheet header text
    pub fn header(&self) -> &'static str {
        match self {
            Column::Id => "TC ID",
            Column::Name => "Test case name",
            Column::Input => "Input",
            Column::Expected => "Expected output",
            Column::Actual => "Actual output",
            Column::Status => "Status",
            Column::LengthType => "Input length type",
            Column::Justification => "Accuracy justification/ Description of issue type",
            Column::Covered => "What is covered by the test",
        }
    }
}

/// Pass/fail tally of a record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Finalized, ordered output of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReportRecordSet {
    records: Vec<ReportRecord>,
}

impl ReportRecordSet {
    pub fn new(records: Vec<ReportRecord>) -> Self {
        Self { records }
    }

    /// Preview rows for every case of a static table, in table order
    pub fn preview<'a>(cases: impl IntoIterator<Item = &'a StaticTestCase>) -> Self {
        Self::new(cases.into_iter().map(ReportRecord::preview).collect())
    }

    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> Summary {
        let passed = self.records.iter().filter(|r| r.status == Status::Pass).count();
        let failed = self.records.iter().filter(|r| r.status == Status::Fail).count();
        Summary {
            total: self.records.len(),
            passed,
            failed,
        }
    }

    /// Whether any row carries characters outside Latin-1
    pub fn has_non_latin_text(&self) -> bool {
        self.records.iter().any(|r| {
            Column::ALL
                .iter()
                .any(|c| r.field(*c).chars().any(|ch| ch as u32 > 0xFF))
        })
    }
}

impl<'a> IntoIterator for &'a ReportRecordSet {
    type Item = &'a ReportRecord;
    type IntoIter = std::slice::Iter<'a, ReportRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
