//! Spreadsheet report

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use translit_common::{Column, ReportRecordSet, Status};

use crate::error::ReportResult;
use crate::render::Renderer;

pub const SHEET_NAME: &str = "Test Execution Results";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const PASS_COLOR: u32 = 0x008000;
const FAIL_COLOR: u32 = 0xFF0000;

fn column_width(column: Column) -> f64 {
    match column {
        Column::Id => 15.0,
        Column::Name => 30.0,
        Column::Status => 10.0,
        Column::LengthType => 15.0,
        Column::Input
        | Column::Expected
        | Column::Actual
        | Column::Justification
        | Column::Covered => 40.0,
    }
}

/// Long free-text columns get wrapped text
fn wraps(column: Column) -> bool {
    matches!(column, Column::Input | Column::Expected | Column::Actual)
}

/// Formatting applied to one sheet cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellStyle {
    Header,
    Wrapped,
    Pass,
    Fail,
    Plain,
}

impl CellStyle {
    fn font_color(self) -> Option<u32> {
        match self {
            CellStyle::Pass => Some(PASS_COLOR),
            CellStyle::Fail => Some(FAIL_COLOR),
            _ => None,
        }
    }

    fn format(self) -> Format {
        let format = match self {
            CellStyle::Header => Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            CellStyle::Wrapped => Format::new().set_text_wrap(),
            CellStyle::Pass | CellStyle::Fail | CellStyle::Plain => Format::new(),
        };
        match self.font_color() {
            Some(rgb) => format.set_font_color(Color::RGB(rgb)),
            None => format,
        }
    }
}

/// One built format per style, shared by every cell of the sheet
struct Formats {
    header: Format,
    wrapped: Format,
    pass: Format,
    fail: Format,
    plain: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: CellStyle::Header.format(),
            wrapped: CellStyle::Wrapped.format(),
            pass: CellStyle::Pass.format(),
            fail: CellStyle::Fail.format(),
            plain: CellStyle::Plain.format(),
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Header => &self.header,
            CellStyle::Wrapped => &self.wrapped,
            CellStyle::Pass => &self.pass,
            CellStyle::Fail => &self.fail,
            CellStyle::Plain => &self.plain,
        }
    }
}

/// Style of a body cell. Only the status column is coloured.
fn cell_style(column: Column, status: Status) -> CellStyle {
    match column {
        Column::Status => match status {
            Status::Pass => CellStyle::Pass,
            Status::Fail => CellStyle::Fail,
            Status::NotRun => CellStyle::Plain,
        },
        c if wraps(c) => CellStyle::Wrapped,
        _ => CellStyle::Plain,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SheetCell<'a> {
    text: &'a str,
    style: CellStyle,
}

/// Header row followed by one row per record, in column order
fn sheet_rows(records: &ReportRecordSet) -> Vec<Vec<SheetCell<'_>>> {
    let header = Column::ALL
        .iter()
        .map(|column| SheetCell {
            text: column.header(),
            style: CellStyle::Header,
        })
        .collect();

    std::iter::once(header)
        .chain(records.iter().map(|record| {
            Column::ALL
                .iter()
                .map(|column| SheetCell {
                    text: record.field(*column),
                    style: cell_style(*column, record.status()),
                })
                .collect()
        }))
        .collect()
}

/// Renders records as a single-sheet xlsx workbook
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelRenderer;

impl ExcelRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Build the workbook without serializing it
    pub fn workbook(&self, records: &ReportRecordSet) -> ReportResult<Workbook> {
        let mut workbook = Workbook::new();
        let formats = Formats::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, column) in Column::ALL.iter().enumerate() {
            sheet.set_column_width(col as u16, column_width(*column))?;
        }

        for (row, cells) in sheet_rows(records).iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                sheet.write_string_with_format(
                    row as u32,
                    col as u16,
                    cell.text,
                    formats.get(cell.style),
                )?;
            }
        }

        Ok(workbook)
    }
}

impl Renderer for ExcelRenderer {
    fn name(&self) -> &'static str {
        "Excel"
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn render(&self, records: &ReportRecordSet) -> ReportResult<Vec<u8>> {
        let mut workbook = self.workbook(records)?;
        Ok(workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use translit_common::StaticTestCase;

    fn records(n: usize) -> ReportRecordSet {
        let cases: Vec<StaticTestCase> = (1..=n)
            .map(|i| StaticTestCase {
                id: format!("TC_{:04}", i),
                name: format!("case {}", i),
                input: "mama gedhara yanavaa".to_string(),
                expected: "මම ගෙදර යනවා".to_string(),
            })
            .collect();
        ReportRecordSet::preview(&cases)
    }

    #[test]
    fn test_render_produces_zip_container() {
        let bytes = ExcelRenderer::new().render(&records(3)).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_empty_record_set() {
        let bytes = ExcelRenderer::new().render(&ReportRecordSet::default()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    fn executed() -> ReportRecordSet {
        let store = translit_common::StaticStore::new(vec![
            StaticTestCase {
                id: "TC_0001".to_string(),
                name: "Greeting".to_string(),
                input: "aayuboovan".to_string(),
                expected: "ආයුබෝවන්".to_string(),
            },
            StaticTestCase {
                id: "TC_0002".to_string(),
                name: "Sentence".to_string(),
                input: "mama gedhara yanavaa".to_string(),
                expected: "මම ගෙදර යනවා".to_string(),
            },
        ]);
        let tree = translit_common::ResultTree::from_json(
            r#"{"suites":[{"title":"t.spec.js","specs":[
                {"title":"TC_0001: Greeting","tests":[{"results":[{"status":"passed"}]}]},
                {"title":"TC_0002: Sentence","tests":[{"results":[{"status":"failed"}]}]}
            ]}]}"#,
        )
        .unwrap();
        translit_common::ReportPipeline::with_defaults(&store).run(&tree)
    }

    #[test]
    fn test_header_row_text_and_order() {
        let records = ReportRecordSet::default();
        let rows = sheet_rows(&records);
        assert_eq!(rows.len(), 1);

        let headers: Vec<&str> = rows[0].iter().map(|cell| cell.text).collect();
        assert_eq!(
            headers,
            vec![
                "TC ID",
                "Test case name",
                "Input",
                "Expected output",
                "Actual output",
                "Status",
                "Input length type",
                "Accuracy justification/ Description of issue type",
                "What is covered by the test",
            ]
        );
        assert!(rows[0].iter().all(|cell| cell.style == CellStyle::Header));
    }

    #[test]
    fn test_status_cell_is_coloured_by_outcome() {
        let records = executed();
        let rows = sheet_rows(&records);
        let status_col = Column::ALL.iter().position(|c| *c == Column::Status).unwrap();

        assert_eq!(rows[1][status_col].text, "Pass");
        assert_eq!(rows[1][status_col].style, CellStyle::Pass);
        assert_eq!(rows[2][status_col].text, "Fail");
        assert_eq!(rows[2][status_col].style, CellStyle::Fail);

        assert_eq!(CellStyle::Pass.font_color(), Some(0x008000));
        assert_eq!(CellStyle::Fail.font_color(), Some(0xFF0000));
        assert_eq!(CellStyle::Plain.font_color(), None);
    }

    #[test]
    fn test_body_rows_follow_column_order() {
        let records = executed();
        let rows = sheet_rows(&records);
        assert_eq!(rows.len(), 3);

        let first: Vec<&str> = rows[1].iter().map(|cell| cell.text).collect();
        assert_eq!(first[0], "Pos_Fun_0001");
        assert_eq!(first[1], "Greeting");
        assert_eq!(first[2], "aayuboovan");
        assert_eq!(first[3], "ආයුබෝවන්");
        assert_eq!(rows[2][0].text, "Neg_Fun_0001");
    }

    #[test]
    fn test_free_text_cells_wrap() {
        let records = executed();
        let rows = sheet_rows(&records);
        for (col, column) in Column::ALL.iter().enumerate() {
            let style = rows[1][col].style;
            match column {
                Column::Input | Column::Expected | Column::Actual => {
                    assert_eq!(style, CellStyle::Wrapped, "{:?}", column)
                }
                Column::Status => assert_eq!(style, CellStyle::Pass),
                _ => assert_eq!(style, CellStyle::Plain, "{:?}", column),
            }
        }
    }

    #[test]
    fn test_not_run_status_is_plain() {
        assert_eq!(cell_style(Column::Status, Status::NotRun), CellStyle::Plain);
        assert_eq!(cell_style(Column::Actual, Status::Fail), CellStyle::Wrapped);
    }

    #[test]
    fn test_wrapped_columns() {
        let wrapped: Vec<Column> = Column::ALL.iter().copied().filter(|c| wraps(*c)).collect();
        assert_eq!(wrapped, vec![Column::Input, Column::Expected, Column::Actual]);
    }
}
