use once_cell::sync::Lazy;
use regex::Regex;

use incomescan_core::{DocumentType, IncomeRecord};

use crate::amounts::{AMOUNT, captured_amount, captured_text, find_year};

/// Extract structured income fields for a classified document.
///
/// Each rule locates a labeled amount or name in the text; unmatched fields
/// stay absent. Types without extraction rules (Schedule C/E, 1120/1065,
/// K-1, Bank Statement, Unknown) yield an empty record, which is an
/// extensibility point rather than a failure. Rules never fabricate values:
/// a field is either verbatim from the text (modulo separator stripping)
/// or missing.
pub fn extract_fields(text: &str, document_type: DocumentType) -> IncomeRecord {
    match document_type {
        DocumentType::W2 => extract_w2(text),
        DocumentType::Form1040 => extract_form_1040(text),
        DocumentType::Paystub => extract_paystub(text),
        _ => IncomeRecord::default(),
    }
}

/// W-2: wages (Box 1), employer/employee names, tax year.
fn extract_w2(text: &str) -> IncomeRecord {
    static WAGES_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(r"(?i)(?:wages|box\s*1\b)[^\d]*({})", AMOUNT)).unwrap()
    });
    // Label matching is case-insensitive but the captured name line must
    // start with a capital letter.
    static EMPLOYER_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i:employer|company)[^\n]*\n([A-Z][A-Za-z &.,'-]+)").unwrap());
    static EMPLOYEE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i:employee|name)[^\n]*\n([A-Z][A-Za-z .,'-]+)").unwrap());

    IncomeRecord {
        wages: captured_amount(&WAGES_RE, text),
        employer_name: captured_text(&EMPLOYER_RE, text),
        employee_name: captured_text(&EMPLOYEE_RE, text),
        year: find_year(text),
        ..Default::default()
    }
}

/// Form 1040: wages (line 1), AGI (line 11), taxable income (line 15), year.
fn extract_form_1040(text: &str) -> IncomeRecord {
    static WAGES_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(r"(?i)(?:line\s*1\b|wages)[^\d]*({})", AMOUNT)).unwrap()
    });
    static AGI_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r"(?i)(?:adjusted\s*gross\s*income|line\s*11\b)[^\d]*({})",
            AMOUNT
        ))
        .unwrap()
    });
    static TAXABLE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r"(?i)(?:taxable\s*income|line\s*15\b)[^\d]*({})",
            AMOUNT
        ))
        .unwrap()
    });

    IncomeRecord {
        wages: captured_amount(&WAGES_RE, text),
        adjusted_gross_income: captured_amount(&AGI_RE, text),
        taxable_income: captured_amount(&TAXABLE_RE, text),
        year: find_year(text),
        ..Default::default()
    }
}

/// Paystub: gross pay (year-to-date amount takes precedence when present,
/// as the more representative figure) and the employer name from the first
/// standalone capitalized line.
fn extract_paystub(text: &str) -> IncomeRecord {
    static GROSS_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r"(?i)(?:gross\s*pay|gross\s*earnings)[^\d]*({})",
            AMOUNT
        ))
        .unwrap()
    });
    static YTD_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r"(?i)(?:ytd\s*gross|year\s*to\s*date)[^\d]*({})",
            AMOUNT
        ))
        .unwrap()
    });
    static EMPLOYER_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^([A-Z][A-Za-z &.,'-]+)$").unwrap());

    let mut record = IncomeRecord {
        wages: captured_amount(&GROSS_RE, text),
        employer_name: captured_text(&EMPLOYER_RE, text),
        ..Default::default()
    };
    if let Some(ytd) = captured_amount(&YTD_RE, text) {
        record.wages = Some(ytd);
    }
    record
}
