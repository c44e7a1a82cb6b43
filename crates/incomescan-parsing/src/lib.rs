pub mod amounts;
pub mod classify;
pub mod fields;

pub use amounts::parse_amount;
pub use classify::{RULES, classify};
pub use fields::extract_fields;
// Re-export domain types from core (canonical definitions live there)
pub use incomescan_core::{DocumentType, IncomeRecord};
