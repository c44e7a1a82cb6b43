use serde::Serialize;

use crate::{DocumentType, ExtractionResult};

/// Cross-document income totals, derived from a batch of results.
///
/// A missing numeric field contributes 0 to the sums. This conflates "no
/// income of this type" with "not extracted"; preserved for compatibility
/// with the upstream calculation logic, so callers should keep the
/// distinction in mind when presenting totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSummary {
    #[serde(rename = "totalWages")]
    pub total_wages: f64,
    #[serde(rename = "totalAGI")]
    pub total_agi: f64,
    /// Deduplicated, ascending.
    pub years: Vec<u16>,
    /// Deduplicated, first-seen order.
    #[serde(rename = "documentTypes")]
    pub document_types: Vec<DocumentType>,
}

/// Fold a batch of per-document results into an [`AggregateSummary`].
///
/// Pure reduction: sums `wages` and `adjusted_gross_income` where present,
/// collects years and document types. Never fails; documents with no
/// extracted fields simply contribute nothing to the sums.
pub fn aggregate(results: &[ExtractionResult]) -> AggregateSummary {
    let mut total_wages = 0.0;
    let mut total_agi = 0.0;
    let mut years: Vec<u16> = Vec::new();
    let mut document_types: Vec<DocumentType> = Vec::new();

    for result in results {
        if let Some(wages) = result.fields.wages {
            total_wages += wages;
        }
        if let Some(agi) = result.fields.adjusted_gross_income {
            total_agi += agi;
        }
        if let Some(year) = result.fields.year {
            if !years.contains(&year) {
                years.push(year);
            }
        }
        if !document_types.contains(&result.document_type) {
            document_types.push(result.document_type);
        }
    }

    years.sort_unstable();

    AggregateSummary {
        total_wages,
        total_agi,
        years,
        document_types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IncomeRecord;

    fn result_with(document_type: DocumentType, fields: IncomeRecord) -> ExtractionResult {
        ExtractionResult {
            text: String::new(),
            confidence: 1.0,
            document_type,
            fields,
        }
    }

    fn w2(wages: f64, year: u16) -> ExtractionResult {
        result_with(
            DocumentType::W2,
            IncomeRecord {
                wages: Some(wages),
                year: Some(year),
                ..Default::default()
            },
        )
    }

    #[test]
    fn sums_wages_and_agi() {
        let results = vec![
            w2(50000.0, 2022),
            result_with(
                DocumentType::Form1040,
                IncomeRecord {
                    wages: Some(25000.0),
                    adjusted_gross_income: Some(80000.0),
                    year: Some(2023),
                    ..Default::default()
                },
            ),
        ];
        let summary = aggregate(&results);
        assert_eq!(summary.total_wages, 75000.0);
        assert_eq!(summary.total_agi, 80000.0);
    }

    #[test]
    fn missing_fields_contribute_zero() {
        let results = vec![w2(50000.0, 2023), result_with(DocumentType::Paystub, IncomeRecord::default())];
        let summary = aggregate(&results);
        assert_eq!(summary.total_wages, 50000.0);
        assert_eq!(summary.total_agi, 0.0);
    }

    #[test]
    fn years_deduplicated_ascending() {
        let results = vec![w2(1.0, 2023), w2(2.0, 2021), w2(3.0, 2023), w2(4.0, 2022)];
        let summary = aggregate(&results);
        assert_eq!(summary.years, vec![2021, 2022, 2023]);
    }

    #[test]
    fn document_types_deduplicated_first_seen() {
        let results = vec![
            w2(1.0, 2023),
            result_with(DocumentType::Paystub, IncomeRecord::default()),
            w2(2.0, 2023),
        ];
        let summary = aggregate(&results);
        assert_eq!(
            summary.document_types,
            vec![DocumentType::W2, DocumentType::Paystub]
        );
    }

    #[test]
    fn error_sentinels_appear_in_document_types() {
        let results = vec![w2(1.0, 2023), ExtractionResult::error_sentinel()];
        let summary = aggregate(&results);
        assert!(summary.document_types.contains(&DocumentType::Error));
        assert_eq!(summary.total_wages, 1.0);
    }

    #[test]
    fn order_independent_reduction() {
        let mut results = vec![
            w2(50000.0, 2022),
            result_with(
                DocumentType::Form1040,
                IncomeRecord {
                    adjusted_gross_income: Some(80000.0),
                    year: Some(2023),
                    ..Default::default()
                },
            ),
            ExtractionResult::error_sentinel(),
        ];
        let forward = aggregate(&results);
        results.reverse();
        let backward = aggregate(&results);

        assert_eq!(forward.total_wages, backward.total_wages);
        assert_eq!(forward.total_agi, backward.total_agi);
        assert_eq!(forward.years, backward.years);
        // Types are a set; first-seen order may differ after reordering.
        let mut a = forward.document_types.clone();
        let mut b = backward.document_types.clone();
        a.sort_by_key(|t| t.as_str());
        b.sort_by_key(|t| t.as_str());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_batch_yields_default() {
        assert_eq!(aggregate(&[]), AggregateSummary::default());
    }

    #[test]
    fn summary_json_field_names() {
        let summary = aggregate(&[w2(50000.0, 2023)]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalWages"], 50000.0);
        assert_eq!(json["totalAGI"], 0.0);
        assert_eq!(json["years"][0], 2023);
        assert_eq!(json["documentTypes"][0], "W-2");
    }
}
