use serde::Serialize;

pub mod aggregate;
pub mod backend;
pub mod config_file;

// Re-export for convenience
pub use aggregate::{AggregateSummary, aggregate};
pub use backend::{BackendError, TextBackend, TextExtraction};

/// Document-type labels the classifier can assign.
///
/// A closed enumeration: `Unknown` is the fall-through when no
/// classification rule matches, `Error` is the sentinel type carried by
/// results for documents that could not be read at all. Serializes to the
/// human-facing label (`"W-2"`, `"Form 1040"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentType {
    #[serde(rename = "W-2")]
    W2,
    #[serde(rename = "Form 1040")]
    Form1040,
    #[serde(rename = "Schedule C")]
    ScheduleC,
    #[serde(rename = "Schedule E")]
    ScheduleE,
    #[serde(rename = "Form 1120")]
    Form1120,
    #[serde(rename = "Form 1065")]
    Form1065,
    #[serde(rename = "Schedule K-1")]
    ScheduleK1,
    #[serde(rename = "Paystub")]
    Paystub,
    #[serde(rename = "Bank Statement")]
    BankStatement,
    #[serde(rename = "Unknown")]
    Unknown,
    #[serde(rename = "Error")]
    Error,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W2 => "W-2",
            Self::Form1040 => "Form 1040",
            Self::ScheduleC => "Schedule C",
            Self::ScheduleE => "Schedule E",
            Self::Form1120 => "Form 1120",
            Self::Form1065 => "Form 1065",
            Self::ScheduleK1 => "Schedule K-1",
            Self::Paystub => "Paystub",
            Self::BankStatement => "Bank Statement",
            Self::Unknown => "Unknown",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse income data extracted from a single document.
///
/// Every field is optional: absence means "not found in this document",
/// never zero. Values are taken verbatim from the matched text with only
/// whitespace and thousands-separator normalization applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wages: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salaries: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_employment_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_gains: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_gross_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_ein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_ssn: Option<String>,
}

impl IncomeRecord {
    /// True when no field at all was extracted.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Result of processing one document through the pipeline.
///
/// Created fresh per invocation and never mutated afterwards. `confidence`
/// is always in `[0, 1]`: exactly 1.0 for a digital text layer, the OCR
/// engine's rescaled score for images, 0.0 for the error sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub text: String,
    pub confidence: f64,
    pub document_type: DocumentType,
    #[serde(rename = "extractedFields")]
    pub fields: IncomeRecord,
}

impl ExtractionResult {
    /// The sentinel emitted for a document that could not be read.
    ///
    /// Structurally valid so batch and aggregate operations stay total:
    /// empty text, zero confidence, `Error` type, no fields.
    pub fn error_sentinel() -> Self {
        Self {
            text: String::new(),
            confidence: 0.0,
            document_type: DocumentType::Error,
            fields: IncomeRecord::default(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.document_type == DocumentType::Error
    }
}

/// Immutable pipeline configuration, passed explicitly to every entry point.
///
/// There is deliberately no process-wide default instance: callers own the
/// value and the pipeline never mutates it.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Language model handed to the OCR engine.
    pub ocr_language: String,
    /// Results below this confidence are logged at warn level (the result
    /// itself is returned unchanged).
    pub low_confidence_warn: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ocr_language: "eng".to_string(),
            low_confidence_warn: 0.5,
        }
    }
}

impl ScanConfig {
    pub fn with_ocr_language(mut self, language: impl Into<String>) -> Self {
        self.ocr_language = language.into();
        self
    }

    pub fn with_low_confidence_warn(mut self, threshold: f64) -> Self {
        self.low_confidence_warn = threshold;
        self
    }
}
