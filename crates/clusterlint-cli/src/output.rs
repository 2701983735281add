//! Output formatting and writing utilities
//!
//! This module formats validation reports and machine type listings as
//! JSON, YAML, or human-readable text, and writes them with optional
//! color and progress indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use clusterlint_core::{ErrorKind, MachineTypeInfo, ValidationError, ValidationReport};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format validation reports, one per manifest file
    fn format_reports(&self, reports: &[ValidationReport], use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output of arbitrary data falls back to pretty JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_reports(&self, reports: &[ValidationReport], use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(reports
                .iter()
                .map(|report| format_report_human(report, use_color))
                .collect::<Vec<_>>()
                .join("\n")),
            _ => self.format(&reports),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && format == OutputFormat::Human && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "✓".green(), message.green()))
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.writeln(formatted.trim_end())
    }

    /// Write validation reports
    ///
    /// Human output prints every report, even in quiet mode, since the
    /// violations are the result of the command.
    pub fn reports(&mut self, reports: &[ValidationReport]) -> Result<()> {
        let formatted = self.format.format_reports(reports, self.use_color)?;
        self.writeln(formatted.trim_end())
    }

    /// Write machine types as a table or in the configured data format
    pub fn machine_types(&mut self, types: &[MachineTypeInfo]) -> Result<()> {
        if self.format != OutputFormat::Human {
            return self.data(&types);
        }

        let rows = types
            .iter()
            .map(|t| {
                vec![
                    t.name.clone(),
                    format!("{}", t.memory_gb),
                    t.cores.to_string(),
                    yes_no(t.gpu).to_string(),
                    t.ephemeral_disks.to_string(),
                    yes_no(t.burstable).to_string(),
                ]
            })
            .collect();
        self.table(&["NAME", "MEMORY (GiB)", "CORES", "GPU", "DISKS", "BURSTABLE"], rows)
    }

    /// Create a progress bar over `length` items, or `None` when output is not interactive
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress || length < 2 {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        let mut widths = headers.iter().map(|h| h.len()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");

        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => format!("{:width$}", cell, width = width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join("  ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Format a report for human reading
fn format_report_human(report: &ValidationReport, use_color: bool) -> String {
    let mut output = String::new();

    if report.is_clean() {
        let line = format!(
            "✓ {}: {} document(s), no violations\n",
            report.source, report.documents
        );
        if use_color {
            output.push_str(&line.green().to_string());
        } else {
            output.push_str(&line);
        }
        return output;
    }

    let (duplicate, invalid, forbidden) = report.counts();
    let header = format!(
        "✗ {}: {} document(s), {} violation(s) ({} duplicate, {} invalid, {} forbidden)",
        report.source,
        report.documents,
        report.errors.len(),
        duplicate,
        invalid,
        forbidden
    );
    if use_color {
        output.push_str(&header.red().bold().to_string());
    } else {
        output.push_str(&header);
    }
    output.push('\n');

    for error in &report.errors {
        output.push_str("  ");
        output.push_str(&format_error_line(error, use_color));
        output.push('\n');
    }

    output
}

fn format_error_line(error: &ValidationError, use_color: bool) -> String {
    let line = error.to_string();
    if !use_color {
        return line;
    }

    match error.kind {
        ErrorKind::Duplicate => line.yellow().to_string(),
        ErrorKind::Invalid => line.red().to_string(),
        ErrorKind::Forbidden => line.magenta().to_string(),
    }
}

#[cfg(test)]
mod tests;
