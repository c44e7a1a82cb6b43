use incomescan_core::DocumentType;

/// Ordered classification rules: `(label, trigger phrases)`.
///
/// Evaluated top to bottom against the lowercased text; the first label
/// with any contained trigger wins. First-match-wins means table order
/// encodes precedence when a document mentions several forms (a 1040
/// narrative quoting "schedule k-1" language still depends on this
/// ordering), so precedence is data here rather than scattered branches.
pub static RULES: &[(DocumentType, &[&str])] = &[
    (DocumentType::W2, &["form w-2", "wage and tax statement"]),
    (
        DocumentType::Form1040,
        &["form 1040", "u.s. individual income tax return"],
    ),
    (
        DocumentType::ScheduleC,
        &["schedule c", "profit or loss from business"],
    ),
    (
        DocumentType::ScheduleE,
        &["schedule e", "supplemental income and loss"],
    ),
    (
        DocumentType::Form1120,
        &["form 1120", "u.s. corporation income tax return"],
    ),
    (
        DocumentType::Form1065,
        &["form 1065", "u.s. return of partnership income"],
    ),
    (
        DocumentType::ScheduleK1,
        &["schedule k-1", "partner's share of income"],
    ),
    (
        DocumentType::Paystub,
        &["paystub", "pay stub", "earnings statement"],
    ),
    (DocumentType::BankStatement, &["bank statement"]),
];

/// Classify a document from its extracted text.
///
/// Pure function of the text; returns [`DocumentType::Unknown`] when no
/// trigger phrase matches.
pub fn classify(text: &str) -> DocumentType {
    let lower = text.to_lowercase();
    for (document_type, triggers) in RULES {
        if triggers.iter().any(|trigger| lower.contains(trigger)) {
            return *document_type;
        }
    }
    DocumentType::Unknown
}
