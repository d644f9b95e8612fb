pub mod analyzer;
pub mod outcome;

pub use analyzer::{remove_all_duplicates_by_supplier, StatusFilter, TransactionAnalyzer};
pub use outcome::{DepositSummary, SalesSummary};
