use std::str::FromStr;

use serde::Serialize;

use incomescan_core::{AggregateSummary, DocumentType, ExtractionResult, IncomeRecord, aggregate};

pub mod export;

pub use export::{export_results, render};

/// One processed document paired with the name it was supplied under.
///
/// `success` is false exactly when the document could not be read at all,
/// so consumers can distinguish "we found nothing useful" (a sparse or
/// empty record on a successful result) from "this file was unreadable".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport<'a> {
    pub file_name: &'a str,
    pub success: bool,
    pub document_type: DocumentType,
    pub confidence: f64,
    pub extracted_fields: &'a IncomeRecord,
}

impl<'a> DocumentReport<'a> {
    pub fn new(file_name: &'a str, result: &'a ExtractionResult) -> Self {
        Self {
            file_name,
            success: !result.is_error(),
            document_type: result.document_type,
            confidence: result.confidence,
            extracted_fields: &result.fields,
        }
    }
}

/// Full scan report: per-document rows plus the aggregate summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport<'a> {
    pub documents: Vec<DocumentReport<'a>>,
    pub summary: AggregateSummary,
}

impl<'a> ScanReport<'a> {
    /// Build a report from parallel slices of file names and results.
    pub fn new(file_names: &'a [String], results: &'a [ExtractionResult]) -> Self {
        let documents = file_names
            .iter()
            .zip(results)
            .map(|(name, result)| DocumentReport::new(name, result))
            .collect();
        Self {
            documents,
            summary: aggregate(results),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
    Markdown,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!(
                "unknown export format '{other}' (expected json, csv, text, or markdown)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn success_flag_tracks_error_sentinel() {
        let ok = ExtractionResult {
            text: "Form W-2".to_string(),
            confidence: 1.0,
            document_type: DocumentType::W2,
            fields: IncomeRecord::default(),
        };
        let failed = ExtractionResult::error_sentinel();

        assert!(DocumentReport::new("w2.pdf", &ok).success);
        assert!(!DocumentReport::new("corrupt.pdf", &failed).success);
    }

    #[test]
    fn report_pairs_names_with_results_in_order() {
        let names = vec!["a.pdf".to_string(), "b.png".to_string()];
        let results = vec![
            ExtractionResult::error_sentinel(),
            ExtractionResult {
                text: String::new(),
                confidence: 0.9,
                document_type: DocumentType::Paystub,
                fields: IncomeRecord::default(),
            },
        ];
        let report = ScanReport::new(&names, &results);

        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.documents[0].file_name, "a.pdf");
        assert!(!report.documents[0].success);
        assert_eq!(report.documents[1].file_name, "b.png");
        assert_eq!(report.documents[1].document_type, DocumentType::Paystub);
    }
}
