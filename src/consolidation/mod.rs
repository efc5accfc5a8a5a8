//! Classification of balance records into BNM codes and consolidation by code

mod aggregate;
mod classifier;
mod code;
mod engine;
mod result;

pub use aggregate::Aggregator;
pub use classifier::{ClassifiedCode, Classification, Classifier};
pub use code::{BnmCode, CodeKind, IMPAIRED_ITEM, NON_RESIDENT_TOTAL, STATE_BREAKDOWN_ITEM};
pub use engine::ConsolidationEngine;
pub use result::{
    ConsolidationResult, ConsolidationSummary, IndicatorTotals, Reconciliation, ReportLine, RunStats,
};
