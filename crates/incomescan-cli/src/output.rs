use std::io::Write;

use incomescan_core::{AggregateSummary, ExtractionResult};
use incomescan_reporting::ScanReport;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the per-document result lines.
///
/// `results` parallels `report.documents` and is only consulted for the
/// full extracted text when `show_text` is set.
pub fn print_documents(
    w: &mut dyn Write,
    report: &ScanReport<'_>,
    results: &[ExtractionResult],
    show_text: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    let total = report.documents.len();

    for (i, doc) in report.documents.iter().enumerate() {
        if !doc.success {
            if color.enabled() {
                writeln!(
                    w,
                    "[{}/{}] {} -> {}",
                    i + 1,
                    total,
                    doc.file_name,
                    "UNREADABLE".red()
                )?;
            } else {
                writeln!(w, "[{}/{}] {} -> UNREADABLE", i + 1, total, doc.file_name)?;
            }
            continue;
        }

        let header = format!(
            "{} ({:.0}% confidence)",
            doc.document_type,
            doc.confidence * 100.0
        );
        if color.enabled() {
            writeln!(
                w,
                "[{}/{}] {} -> {}",
                i + 1,
                total,
                doc.file_name,
                header.green()
            )?;
        } else {
            writeln!(w, "[{}/{}] {} -> {}", i + 1, total, doc.file_name, header)?;
        }

        let fields = doc.extracted_fields;
        if let Some(wages) = fields.wages {
            writeln!(w, "      wages: ${:.2}", wages)?;
        }
        if let Some(agi) = fields.adjusted_gross_income {
            writeln!(w, "      adjusted gross income: ${:.2}", agi)?;
        }
        if let Some(taxable) = fields.taxable_income {
            writeln!(w, "      taxable income: ${:.2}", taxable)?;
        }
        if let Some(year) = fields.year {
            writeln!(w, "      year: {}", year)?;
        }
        if let Some(employer) = &fields.employer_name {
            writeln!(w, "      employer: {}", employer)?;
        }
        if let Some(employee) = &fields.employee_name {
            writeln!(w, "      employee: {}", employee)?;
        }
        if fields.is_empty() {
            if color.enabled() {
                writeln!(w, "      {}", "(no fields extracted)".dimmed())?;
            } else {
                writeln!(w, "      (no fields extracted)")?;
            }
        }

        if show_text {
            if let Some(result) = results.get(i) {
                writeln!(w, "      --- extracted text ---")?;
                for line in result.text.lines() {
                    writeln!(w, "      {}", line)?;
                }
            }
        }
    }

    Ok(())
}

/// Print the aggregate totals block.
pub fn print_summary(
    w: &mut dyn Write,
    summary: &AggregateSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    let sep = "-".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.dimmed())?;
    } else {
        writeln!(w, "{}", sep)?;
    }

    writeln!(w, "Total wages: ${:.2}", summary.total_wages)?;
    writeln!(w, "Total AGI:   ${:.2}", summary.total_agi)?;

    if !summary.years.is_empty() {
        let years: Vec<String> = summary.years.iter().map(|y| y.to_string()).collect();
        writeln!(w, "Years:       {}", years.join(", "))?;
    }
    if !summary.document_types.is_empty() {
        let types: Vec<&str> = summary.document_types.iter().map(|t| t.as_str()).collect();
        writeln!(w, "Documents:   {}", types.join(", "))?;
    }

    Ok(())
}
