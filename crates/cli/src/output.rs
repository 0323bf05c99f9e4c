//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use translit_common::{Column, ReportRecord, Status};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<Cell>;
}

impl TableDisplay for ReportRecord {
    fn headers() -> Vec<&'static str> {
        vec!["TC ID", "Name", "Input", "Expected", "Actual", "Status", "Length"]
    }

    fn row(&self) -> Vec<Cell> {
        let status = Cell::new(self.status().as_str());
        let status = match self.status() {
            Status::Pass => status.fg(Color::Green),
            Status::Fail => status.fg(Color::Red),
            Status::NotRun => status,
        };
        vec![
            Cell::new(self.field(Column::Id)),
            Cell::new(self.field(Column::Name)),
            Cell::new(self.field(Column::Input)),
            Cell::new(self.field(Column::Expected)),
            Cell::new(self.field(Column::Actual)),
            status,
            Cell::new(self.field(Column::LengthType)),
        ]
    }
}

/// Build the table for a list of items
pub fn table<T: TableDisplay>(items: &[T]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(T::headers());
    for item in items {
        table.add_row(item.row());
    }
    table
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No records found.");
                return;
            }
            println!("{}", table(items));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("⚠️  {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}
