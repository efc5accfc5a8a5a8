//! BNM Reporting - Classification and consolidation of bank balance extracts
//!
//! This library provides:
//! - Balance record loading from account extracts (deposits, loans, hire purchase, NPL)
//! - Regulatory code mapping tables, built in or loaded from CSV
//! - Classification of records into BNM line-item codes with fan-out
//! - Order-independent aggregation and reconciliation by code
//! - Fixed-width ASA carriage-control report rendering

pub mod config;
pub mod consolidation;
pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod record;
pub mod report;

// Re-export commonly used types
pub use config::RunConfig;
pub use consolidation::{BnmCode, Classifier, CodeKind, ConsolidationEngine, ConsolidationResult, ReportLine};
pub use error::{ReportError, Result};
pub use mapping::MappingTables;
pub use pipeline::{ReportRunner, RunSummary};
pub use record::{AmountIndicator, BalanceRecord};
