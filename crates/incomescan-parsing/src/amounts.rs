use once_cell::sync::Lazy;
use regex::Regex;

/// Sub-pattern for a monetary amount: thousands groups with optional cents,
/// e.g. `75,000.00`, `1,234`, `800`.
pub(crate) const AMOUNT: &str = r"\d{1,3}(?:,\d{3})*(?:\.\d{2})?";

/// Strip thousands separators and parse as a decimal number.
///
/// This is the only normalization applied to matched amounts; the digits
/// are otherwise taken verbatim from the source text.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse().ok()
}

/// First capture group of `re` in `text`, parsed as an amount.
pub(crate) fn captured_amount(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| parse_amount(caps.get(1)?.as_str()))
}

/// First capture group of `re` in `text`, trimmed; `None` when empty.
pub(crate) fn captured_text(re: &Regex, text: &str) -> Option<String> {
    let captured = re.captures(text)?.get(1)?.as_str().trim();
    if captured.is_empty() {
        None
    } else {
        Some(captured.to_string())
    }
}

/// First four-digit token of the form `20xx` anywhere in the text.
pub(crate) fn find_year(text: &str) -> Option<u16> {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b20\d{2}\b").unwrap());
    YEAR_RE.find(text).and_then(|m| m.as_str().parse().ok())
}
