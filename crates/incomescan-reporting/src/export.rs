use std::io::Write;
use std::path::Path;

use crate::{ExportFormat, ScanReport};

/// Render a scan report and write it to the given path.
pub fn export_results(
    report: &ScanReport<'_>,
    format: ExportFormat,
    path: &Path,
) -> Result<(), String> {
    let content = render(report, format)?;
    let mut file =
        std::fs::File::create(path).map_err(|e| format!("Failed to create file: {}", e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| format!("Failed to write: {}", e))?;
    Ok(())
}

/// Render a scan report to a string in the given format.
pub fn render(report: &ScanReport<'_>, format: ExportFormat) -> Result<String, String> {
    Ok(match format {
        ExportFormat::Json => {
            let mut out = serde_json::to_string_pretty(report)
                .map_err(|e| format!("Failed to serialize report: {}", e))?;
            out.push('\n');
            out
        }
        ExportFormat::Csv => export_csv(report),
        ExportFormat::Text => export_text(report),
        ExportFormat::Markdown => export_markdown(report),
    })
}

fn csv_escape(s: &str) -> String {
    if s.contains('"') || s.contains(',') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn money(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn export_csv(report: &ScanReport<'_>) -> String {
    let mut out = String::from(
        "FileName,Success,DocumentType,Confidence,Wages,AdjustedGrossIncome,TaxableIncome,Year,EmployerName,EmployeeName\n",
    );
    for doc in &report.documents {
        let fields = doc.extracted_fields;
        out.push_str(&format!(
            "{},{},{},{:.2},{},{},{},{},{},{}\n",
            csv_escape(doc.file_name),
            doc.success,
            csv_escape(doc.document_type.as_str()),
            doc.confidence,
            money(fields.wages),
            money(fields.adjusted_gross_income),
            money(fields.taxable_income),
            fields.year.map(|y| y.to_string()).unwrap_or_default(),
            csv_escape(fields.employer_name.as_deref().unwrap_or("")),
            csv_escape(fields.employee_name.as_deref().unwrap_or("")),
        ));
    }
    out
}

fn export_text(report: &ScanReport<'_>) -> String {
    let mut out = String::from("Income Document Scan\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');

    for (i, doc) in report.documents.iter().enumerate() {
        if doc.success {
            out.push_str(&format!(
                "\n[{}] {} - {} ({:.0}% confidence)\n",
                i + 1,
                doc.file_name,
                doc.document_type,
                doc.confidence * 100.0,
            ));
            let fields = doc.extracted_fields;
            if let Some(wages) = fields.wages {
                out.push_str(&format!("      Wages: ${:.2}\n", wages));
            }
            if let Some(agi) = fields.adjusted_gross_income {
                out.push_str(&format!("      Adjusted gross income: ${:.2}\n", agi));
            }
            if let Some(taxable) = fields.taxable_income {
                out.push_str(&format!("      Taxable income: ${:.2}\n", taxable));
            }
            if let Some(year) = fields.year {
                out.push_str(&format!("      Year: {}\n", year));
            }
            if let Some(employer) = &fields.employer_name {
                out.push_str(&format!("      Employer: {}\n", employer));
            }
            if let Some(employee) = &fields.employee_name {
                out.push_str(&format!("      Employee: {}\n", employee));
            }
            if fields.is_empty() {
                out.push_str("      (no fields extracted)\n");
            }
        } else {
            out.push_str(&format!(
                "\n[{}] {} - could not be read\n",
                i + 1,
                doc.file_name,
            ));
        }
    }

    let summary = &report.summary;
    out.push_str(&format!("\n{}\n", "-".repeat(60)));
    out.push_str(&format!("Total wages: ${:.2}\n", summary.total_wages));
    out.push_str(&format!("Total AGI:   ${:.2}\n", summary.total_agi));
    if !summary.years.is_empty() {
        let years: Vec<String> = summary.years.iter().map(|y| y.to_string()).collect();
        out.push_str(&format!("Years:       {}\n", years.join(", ")));
    }
    let types: Vec<&str> = summary.document_types.iter().map(|t| t.as_str()).collect();
    if !types.is_empty() {
        out.push_str(&format!("Documents:   {}\n", types.join(", ")));
    }
    out
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

fn export_markdown(report: &ScanReport<'_>) -> String {
    let mut out = String::from("# Income Document Scan\n\n");
    out.push_str("| # | File | Type | Confidence | Wages | AGI | Year |\n");
    out.push_str("|---|------|------|------------|-------|-----|------|\n");
    for (i, doc) in report.documents.iter().enumerate() {
        let fields = doc.extracted_fields;
        let type_cell = if doc.success {
            doc.document_type.as_str().to_string()
        } else {
            "**unreadable**".to_string()
        };
        out.push_str(&format!(
            "| {} | {} | {} | {:.0}% | {} | {} | {} |\n",
            i + 1,
            md_escape(doc.file_name),
            type_cell,
            doc.confidence * 100.0,
            money(fields.wages),
            money(fields.adjusted_gross_income),
            fields.year.map(|y| y.to_string()).unwrap_or_default(),
        ));
    }

    let summary = &report.summary;
    out.push_str("\n## Summary\n\n");
    out.push_str(&format!("- **Total wages:** ${:.2}\n", summary.total_wages));
    out.push_str(&format!("- **Total AGI:** ${:.2}\n", summary.total_agi));
    let years: Vec<String> = summary.years.iter().map(|y| y.to_string()).collect();
    out.push_str(&format!("- **Years:** {}\n", years.join(", ")));
    let types: Vec<&str> = summary.document_types.iter().map(|t| t.as_str()).collect();
    out.push_str(&format!("- **Document types:** {}\n", types.join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use incomescan_core::{DocumentType, ExtractionResult, IncomeRecord};

    // ── helpers ──────────────────────────────────────────────────────

    fn w2_result() -> ExtractionResult {
        ExtractionResult {
            text: "Form W-2".to_string(),
            confidence: 1.0,
            document_type: DocumentType::W2,
            fields: IncomeRecord {
                wages: Some(75000.0),
                year: Some(2023),
                employer_name: Some("Acme Widgets Inc.".to_string()),
                ..Default::default()
            },
        }
    }

    // ── escaping ─────────────────────────────────────────────────────

    #[test]
    fn csv_escape_quotes_commas_newlines() {
        assert_eq!(csv_escape(r#"He said "hi""#), r#""He said ""hi""""#);
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("a\nb"), "\"a\nb\"");
        assert_eq!(csv_escape("clean"), "clean");
    }

    #[test]
    fn md_escape_pipe() {
        assert_eq!(md_escape("A | B"), "A \\| B");
    }

    #[test]
    fn money_formats_or_blanks() {
        assert_eq!(money(Some(75000.0)), "75000.00");
        assert_eq!(money(None), "");
    }

    // ── renderers ────────────────────────────────────────────────────

    #[test]
    fn json_export_shape() {
        let names = vec!["w2.pdf".to_string(), "corrupt.pdf".to_string()];
        let results = vec![w2_result(), ExtractionResult::error_sentinel()];
        let report = ScanReport::new(&names, &results);
        let rendered = render(&report, ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["documents"][0]["fileName"], "w2.pdf");
        assert_eq!(value["documents"][0]["success"], true);
        assert_eq!(value["documents"][0]["documentType"], "W-2");
        assert_eq!(value["documents"][0]["extractedFields"]["wages"], 75000.0);
        assert_eq!(value["documents"][1]["success"], false);
        assert_eq!(value["documents"][1]["documentType"], "Error");
        assert_eq!(value["summary"]["totalWages"], 75000.0);
        assert_eq!(value["summary"]["years"][0], 2023);
    }

    #[test]
    fn csv_export_rows_match_documents() {
        let names = vec!["w2.pdf".to_string(), "corrupt.pdf".to_string()];
        let results = vec![w2_result(), ExtractionResult::error_sentinel()];
        let report = ScanReport::new(&names, &results);
        let rendered = render(&report, ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FileName,Success,DocumentType"));
        assert!(lines[1].starts_with("w2.pdf,true,W-2,1.00,75000.00"));
        assert!(lines[2].starts_with("corrupt.pdf,false,Error,0.00"));
    }

    #[test]
    fn text_export_mentions_unreadable_documents() {
        let names = vec!["corrupt.pdf".to_string()];
        let results = vec![ExtractionResult::error_sentinel()];
        let report = ScanReport::new(&names, &results);
        let rendered = render(&report, ExportFormat::Text).unwrap();

        assert!(rendered.contains("could not be read"));
        assert!(rendered.contains("Total wages: $0.00"));
    }

    #[test]
    fn markdown_export_has_table_and_summary() {
        let names = vec!["w2.pdf".to_string()];
        let results = vec![w2_result()];
        let report = ScanReport::new(&names, &results);
        let rendered = render(&report, ExportFormat::Markdown).unwrap();

        assert!(rendered.contains("| 1 | w2.pdf | W-2 | 100% | 75000.00 |"));
        assert!(rendered.contains("- **Total wages:** $75000.00"));
    }

    #[test]
    fn export_writes_file() {
        let names = vec!["w2.pdf".to_string()];
        let results = vec![w2_result()];
        let report = ScanReport::new(&names, &results);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        export_results(&report, ExportFormat::Json, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"totalWages\": 75000.0"));
    }
}
