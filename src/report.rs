/*!
 * Reporting functionality for MergeFS
 *
 * Renders the file listing and the result of a combine run, either as
 * console tables (via the tabled library) or as JSON.
 */

use std::time::Duration;

use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::classify::classify;
use crate::error::Result;
use crate::filter::FilterKind;
use crate::registry::Registry;
use crate::types::{CombinedDocument, SelectionStats};
use crate::utils::{estimate_tokens, format_file_size};

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
pub enum ReportFormat {
    /// Console tables
    #[default]
    Table,
    /// JSON document
    Json,
}

/// One row of the file listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileListing {
    pub index: usize,
    pub path: String,
    pub size: u64,
    pub language: String,
    pub is_code: bool,
    pub selected: bool,
}

/// File listing under a filter view
#[derive(Debug, Clone, Serialize)]
pub struct ListingReport {
    pub filter: FilterKind,
    pub stats: SelectionStats,
    pub files: Vec<FileListing>,
}

impl ListingReport {
    /// Build the listing of the entries visible under a filter
    pub fn new(registry: &Registry, filter: FilterKind) -> Self {
        let files = registry
            .files()
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter.matches(entry))
            .map(|(index, entry)| {
                let class = classify(&entry.name);
                FileListing {
                    index,
                    path: entry.display_path(),
                    size: entry.size,
                    language: class.language,
                    is_code: class.is_code,
                    selected: registry.is_selected(index),
                }
            })
            .collect();

        Self {
            filter,
            stats: registry.stats(),
            files,
        }
    }
}

/// Result of a combine run
#[derive(Debug, Clone, Serialize)]
pub struct CombineReport {
    pub output_file: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    pub files_combined: usize,
    pub failures: Vec<String>,
    pub stats: SelectionStats,
    pub estimated_tokens: usize,
    pub generated_at: String,
}

impl CombineReport {
    /// Summarize a combined document
    pub fn new(
        output_file: impl Into<String>,
        duration: Duration,
        document: &CombinedDocument,
        stats: SelectionStats,
    ) -> Self {
        Self {
            output_file: output_file.into(),
            duration,
            files_combined: document.files_combined,
            failures: document.failures.clone(),
            stats,
            estimated_tokens: estimate_tokens(&document.text),
            generated_at: Local::now().to_rfc3339(),
        }
    }
}

fn serialize_duration<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Report generator
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    fn style(table: &mut Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    /// Render a file listing
    pub fn render_listing(&self, report: &ListingReport) -> Result<String> {
        match self.format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportFormat::Table => Ok(self.listing_table(report)),
        }
    }

    /// Render a combine summary
    pub fn render_combine(&self, report: &CombineReport) -> Result<String> {
        match self.format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportFormat::Table => Ok(self.combine_table(report)),
        }
    }

    fn listing_table(&self, report: &ListingReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "#")]
            index: usize,
            #[tabled(rename = "Sel")]
            selected: &'static str,
            #[tabled(rename = "File Path")]
            path: String,
            #[tabled(rename = "Size")]
            size: String,
            #[tabled(rename = "Language")]
            language: String,
        }

        let rows: Vec<FileRow> = report
            .files
            .iter()
            .map(|file| FileRow {
                index: file.index,
                selected: if file.selected { "[x]" } else { "[ ]" },
                path: file.path.clone(),
                size: format_file_size(file.size),
                language: if file.is_code {
                    file.language.clone()
                } else {
                    format!("{} (text)", file.language)
                },
            })
            .collect();

        let title = format!(
            "📋  FILES ({}): {} shown, {} of {} selected, {}",
            report.filter,
            report.files.len(),
            report.stats.selected_count,
            report.stats.total,
            format_file_size(report.stats.selected_bytes)
        );

        format!("{}\n{}", title, Self::style(&mut Table::new(rows)))
    }

    fn combine_table(&self, report: &CombineReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,
            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Combined".to_string(),
                value: self.format_number(report.files_combined),
            },
            SummaryRow {
                key: "💾 Selected Size".to_string(),
                value: format_file_size(report.stats.selected_bytes),
            },
            SummaryRow {
                key: "📦 LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.estimated_tokens)
                ),
            },
        ];

        if !report.failures.is_empty() {
            rows.push(SummaryRow {
                key: "⚠️ Read Failures".to_string(),
                value: report.failures.join(", "),
            });
        }

        format!(
            "✅  COMBINE COMPLETE\n{}",
            Self::style(&mut Table::new(rows))
        )
    }
}
