//! Paginated PDF report
//!
//! A4 landscape. All layout constants are in points measured from the top-left
//! corner of the page and converted to PDF user space when drawn.

use std::fs::File;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Pt, Rgb,
};
use tracing::{debug, warn};
use translit_common::{Column, FontConfig, ReportRecord, ReportRecordSet, Status};

use crate::error::{ReportError, ReportResult};
use crate::render::Renderer;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const REPORT_TITLE: &str = "Test Execution Report";

const PAGE_WIDTH: f32 = 841.89;
const PAGE_HEIGHT: f32 = 595.28;
const MARGIN: f32 = 30.0;
const RULE_END: f32 = 780.0;
/// Running header line, above the title on page one
const CAPTION_Y: f32 = 12.0;

const TABLE_TOP: f32 = 150.0;
const CONTINUATION_TOP: f32 = 50.0;
const ROW_HEIGHT: f32 = 20.0;
const ROW_GAP: f32 = 10.0;
const PAGE_BREAK_Y: f32 = 500.0;

const TITLE_SIZE: f32 = 20.0;
const STATS_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const CAPTION_SIZE: f32 = 8.0;

/// Average glyph advance as a fraction of the font size
const AVG_CHAR_WIDTH: f32 = 0.5;
const ELLIPSIS: &str = "...";

struct PdfColumn {
    title: &'static str,
    column: Column,
    x: f32,
    width: f32,
}

const COLUMNS: [PdfColumn; 6] = [
    PdfColumn { title: "TC ID", column: Column::Id, x: 30.0, width: 60.0 },
    PdfColumn { title: "Test Case Name", column: Column::Name, x: 100.0, width: 110.0 },
    PdfColumn { title: "Input", column: Column::Input, x: 220.0, width: 130.0 },
    PdfColumn { title: "Expected", column: Column::Expected, x: 360.0, width: 130.0 },
    PdfColumn { title: "Actual", column: Column::Actual, x: 500.0, width: 130.0 },
    PdfColumn { title: "Status", column: Column::Status, x: 640.0, width: 140.0 },
];

/// Fit text on one line of `width` points, ending in an ellipsis when cut
pub fn truncate_to_width(text: &str, width: f32, font_size: f32) -> String {
    let single_line: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let max_chars = (width / (font_size * AVG_CHAR_WIDTH)).floor() as usize;
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = single_line.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Replace glyphs the built-in fonts cannot encode
fn latin1_only(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

// ============================================================================
// Pagination
// ============================================================================

/// Rows drawn on one page, with their top offsets
#[derive(Debug, Clone, PartialEq)]
struct PagePlan {
    header_y: f32,
    rows: Vec<(usize, f32)>,
}

impl PagePlan {
    fn new(header_y: f32) -> Self {
        Self {
            header_y,
            rows: Vec::new(),
        }
    }

    fn first_row_y(&self) -> f32 {
        self.header_y + ROW_HEIGHT + ROW_GAP
    }
}

fn plan_pages(count: usize) -> Vec<PagePlan> {
    let mut pages = Vec::new();
    let mut current = PagePlan::new(TABLE_TOP);
    let mut y = current.first_row_y();

    for index in 0..count {
        if y > PAGE_BREAK_Y {
            pages.push(std::mem::replace(&mut current, PagePlan::new(CONTINUATION_TOP)));
            y = current.first_row_y();
        }
        current.rows.push((index, y));
        y += ROW_HEIGHT + ROW_GAP;
    }

    pages.push(current);
    pages
}

/// What is drawn on a page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq)]
enum Element {
    Caption { page: usize, pages: usize },
    TitleBlock,
    Header { y: f32 },
    Row { index: usize, y: f32 },
}

/// Elements of page `page` (1-based) out of `pages`. Every page repeats the
/// running caption and the column header row; only page one has the title.
fn layout(plan: &PagePlan, page: usize, pages: usize) -> Vec<Element> {
    let mut elements = vec![Element::Caption { page, pages }];
    if page == 1 {
        elements.push(Element::TitleBlock);
    }
    elements.push(Element::Header { y: plan.header_y });
    elements.extend(
        plan.rows
            .iter()
            .map(|&(index, y)| Element::Row { index, y }),
    );
    elements
}

// ============================================================================
// Fonts
// ============================================================================

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// False for the built-in fonts, which only cover Latin-1
    embedded: bool,
}

impl Fonts {
    fn builtin(doc: &PdfDocumentReference) -> ReportResult<Self> {
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Font(e.to_string()))?;
        Ok(Self {
            regular,
            bold,
            embedded: false,
        })
    }

    fn external(doc: &PdfDocumentReference, path: &Path) -> ReportResult<Self> {
        let file = File::open(path)?;
        let font = doc
            .add_external_font(file)
            .map_err(|e| ReportError::Font(e.to_string()))?;
        Ok(Self {
            regular: font.clone(),
            bold: font,
            embedded: true,
        })
    }
}

// ============================================================================
// Drawing
// ============================================================================

fn at(x: f32, y_top: f32, font_size: f32) -> (Mm, Mm) {
    // Text is placed by baseline; offsets in this module describe the line top.
    let baseline = PAGE_HEIGHT - y_top - font_size * 0.8;
    (Mm::from(Pt(x)), Mm::from(Pt(baseline)))
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

struct Canvas<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
}

impl Canvas<'_> {
    fn text(&self, text: &str, size: f32, x: f32, y: f32, font: &IndirectFontRef) {
        let text = if self.fonts.embedded {
            text.to_string()
        } else {
            latin1_only(text)
        };
        let (x, y) = at(x, y, size);
        self.layer.use_text(text, size, x, y, font);
    }

    fn rule(&self, y: f32) {
        let y = Mm::from(Pt(PAGE_HEIGHT - y));
        self.layer.set_outline_color(rgb(0.0, 0.0, 0.0));
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm::from(Pt(MARGIN)), y), false),
                (Point::new(Mm::from(Pt(RULE_END)), y), false),
            ],
            is_closed: false,
        });
    }

    fn title_block(&self, records: &ReportRecordSet) {
        let summary = records.summary();
        self.layer.set_fill_color(rgb(0.0, 0.0, 0.0));

        let title_width = REPORT_TITLE.len() as f32 * TITLE_SIZE * AVG_CHAR_WIDTH;
        let title_x = ((PAGE_WIDTH - title_width) / 2.0).max(MARGIN);
        self.text(REPORT_TITLE, TITLE_SIZE, title_x, MARGIN + 10.0, &self.fonts.bold);

        let stats = format!(
            "Total Tests: {}   Passed: {}   Failed: {}",
            summary.total, summary.passed, summary.failed
        );
        self.text(&stats, STATS_SIZE, MARGIN, 90.0, &self.fonts.regular);
    }

    fn caption(&self, page: usize, pages: usize) {
        self.layer.set_fill_color(rgb(0.4, 0.4, 0.4));
        let caption = format!("{} - page {} of {}", REPORT_TITLE, page, pages);
        self.text(&caption, CAPTION_SIZE, MARGIN, CAPTION_Y, &self.fonts.regular);
    }

    fn header(&self, y: f32) {
        self.layer.set_fill_color(rgb(0.0, 0.0, 0.0));
        for column in &COLUMNS {
            self.text(column.title, BODY_SIZE, column.x, y, &self.fonts.bold);
        }
        self.rule(y + ROW_HEIGHT);
    }

    fn row(&self, record: &ReportRecord, y: f32) {
        for column in &COLUMNS {
            let color = match (column.column, record.status()) {
                (Column::Status, Status::Pass) => rgb(0.0, 0.5, 0.0),
                (Column::Status, Status::Fail) => rgb(1.0, 0.0, 0.0),
                _ => rgb(0.0, 0.0, 0.0),
            };
            self.layer.set_fill_color(color);
            let text = truncate_to_width(record.field(column.column), column.width, BODY_SIZE);
            self.text(&text, BODY_SIZE, column.x, y, &self.fonts.regular);
        }
        self.rule(y + ROW_HEIGHT);
    }
}

/// Renders records as a landscape, multi-page table
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    fonts: FontConfig,
}

impl PdfRenderer {
    pub fn new(fonts: FontConfig) -> Self {
        Self { fonts }
    }

    /// Pick the font for this render: the fallback font when the records carry
    /// non-Latin text, otherwise the Latin font, then the built-in Helvetica.
    fn load_fonts(&self, doc: &PdfDocumentReference, needs_unicode: bool) -> ReportResult<Fonts> {
        let candidates: Vec<&PathBuf> = if needs_unicode {
            [self.fonts.fallback.as_ref(), self.fonts.latin.as_ref()]
                .into_iter()
                .flatten()
                .collect()
        } else {
            self.fonts.latin.iter().collect()
        };

        for path in candidates {
            match Fonts::external(doc, path) {
                Ok(fonts) => {
                    debug!("Using font {}", path.display());
                    return Ok(fonts);
                }
                Err(e) => warn!("Cannot use font {}: {}", path.display(), e),
            }
        }

        if needs_unicode {
            warn!("No font covering non-Latin text is available; those glyphs are replaced with '?'");
        }
        Fonts::builtin(doc)
    }
}

impl Renderer for PdfRenderer {
    fn name(&self) -> &'static str {
        "PDF"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }

    fn render(&self, records: &ReportRecordSet) -> ReportResult<Vec<u8>> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            REPORT_TITLE,
            Mm::from(Pt(PAGE_WIDTH)),
            Mm::from(Pt(PAGE_HEIGHT)),
            "Layer 1",
        );
        let fonts = self.load_fonts(&doc, records.has_non_latin_text())?;
        let rows = records.records();
        let plans = plan_pages(rows.len());

        for (n, plan) in plans.iter().enumerate() {
            let layer = if n == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) =
                    doc.add_page(Mm::from(Pt(PAGE_WIDTH)), Mm::from(Pt(PAGE_HEIGHT)), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };
            let canvas = Canvas {
                layer,
                fonts: &fonts,
            };

            for element in layout(plan, n + 1, plans.len()) {
                match element {
                    Element::Caption { page, pages } => canvas.caption(page, pages),
                    Element::TitleBlock => canvas.title_block(records),
                    Element::Header { y } => canvas.header(y),
                    Element::Row { index, y } => canvas.row(&rows[index], y),
                }
            }
        }

        debug!("Rendered {} record(s) on {} page(s)", rows.len(), plans.len());
        doc.save_to_bytes().map_err(|e| ReportError::Pdf(e.to_string()))
    }
}
