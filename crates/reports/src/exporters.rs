//! Report exporters - CSV, JSON, Markdown
//!
//! Every exporter renders the same [`ReportData`] view, so a report type
//! only has to describe its headers and rows once.

use serde_json::{Map, Value};

/// Trait for exporting reports to different formats
pub trait ReportExporter {
    /// Export to the target format
    fn export(&self, report: &dyn ReportData) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}

/// Trait for data that can be exported
pub trait ReportData {
    /// Get the report title
    fn title(&self) -> &str;

    /// Get column headers
    fn headers(&self) -> Vec<String>;

    /// Get data rows
    fn rows(&self) -> Vec<Vec<String>>;

    /// Get summary statistics as key-value pairs
    fn summary(&self) -> Vec<(String, String)>;
}

// ============================================================================
// CSV Exporter
// ============================================================================

/// CSV format exporter
///
/// Writes a header line followed by the data rows; the title and summary
/// are not part of the CSV output.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    fn escape_field(field: &str) -> String {
        let needs_quotes = field.contains(',')
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r');

        if needs_quotes {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn push_line(output: &mut String, fields: &[String]) {
        let escaped: Vec<String> = fields.iter().map(|f| Self::escape_field(f)).collect();
        output.push_str(&escaped.join(","));
        output.push('\n');
    }
}

impl ReportExporter for CsvExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = String::new();

        Self::push_line(&mut output, &report.headers());
        for row in report.rows() {
            Self::push_line(&mut output, &row);
        }

        output
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

// ============================================================================
// JSON Exporter
// ============================================================================

/// JSON format exporter
///
/// Cells stay strings, so decimal values come out exactly as computed.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportExporter for JsonExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let headers = report.headers();

        let data: Vec<Value> = report
            .rows()
            .into_iter()
            .map(|row| {
                let mut obj = Map::new();
                for (i, header) in headers.iter().enumerate() {
                    let value = row.get(i).cloned().unwrap_or_default();
                    obj.insert(header.clone(), Value::String(value));
                }
                Value::Object(obj)
            })
            .collect();

        let summary: Map<String, Value> = report
            .summary()
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();

        let output = serde_json::json!({
            "title": report.title(),
            "summary": summary,
            "data": data,
        });

        let mut text = serde_json::to_string_pretty(&output).unwrap_or_default();
        text.push('\n');
        text
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

// ============================================================================
// Markdown Exporter
// ============================================================================

/// Markdown format exporter
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter;

impl MarkdownExporter {
    pub fn new() -> Self {
        Self
    }

    // Party names are free-form; a bare pipe would split the cell.
    fn escape_cell(cell: &str) -> String {
        cell.replace('|', "\\|").replace('\n', " ")
    }

    fn push_row<S: AsRef<str>>(output: &mut String, cells: &[S]) {
        let escaped: Vec<String> = cells.iter().map(|c| Self::escape_cell(c.as_ref())).collect();
        output.push_str("| ");
        output.push_str(&escaped.join(" | "));
        output.push_str(" |\n");
    }
}

impl ReportExporter for MarkdownExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = format!("# {}\n\n", report.title());

        output.push_str("## Summary\n\n");
        for (key, value) in report.summary() {
            output.push_str(&format!("- **{}**: {}\n", key, value));
        }
        output.push('\n');

        output.push_str("## Data\n\n");

        let headers = report.headers();
        if !headers.is_empty() {
            Self::push_row(&mut output, &headers);
            Self::push_row(&mut output, &vec!["---"; headers.len()]);

            for row in report.rows() {
                Self::push_row(&mut output, &row);
            }
        }

        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
