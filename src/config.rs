//! Run configuration

use crate::report::{ReportHeader, DEFAULT_PAGE_LENGTH};
use chrono::NaiveDate;
use std::path::PathBuf;

pub const DEFAULT_DATASET_PATH: &str = "output/rdal.csv";
pub const DEFAULT_REPORT_PATH: &str = "output/rdal.txt";
pub const DEFAULT_BANK_NAME: &str = "PUBLIC BANK BERHAD";
pub const DEFAULT_REPORT_ID: &str = "BNMRDAL";
pub const DEFAULT_TITLE: &str = "REPORT ON DOMESTIC ASSETS AND LIABILITIES";

/// Everything one reporting run needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Account extracts to consolidate; missing files are treated as empty
    pub inputs: Vec<PathBuf>,

    /// Directory of mapping CSVs; built-in tables when absent
    pub mapping_dir: Option<PathBuf>,

    /// Aggregated BNMCODE,AMTIND,AMOUNT dataset
    pub dataset_path: PathBuf,

    /// ASA text report
    pub report_path: PathBuf,

    /// Reporting (as-at) date
    pub report_date: NaiveDate,

    /// Detail lines per printed page
    pub page_length: usize,

    pub bank_name: String,
    pub report_id: String,
    pub title: String,
}

impl RunConfig {
    pub fn new(inputs: Vec<PathBuf>, report_date: NaiveDate) -> Self {
        Self {
            inputs,
            mapping_dir: None,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            report_date,
            page_length: DEFAULT_PAGE_LENGTH,
            bank_name: DEFAULT_BANK_NAME.to_string(),
            report_id: DEFAULT_REPORT_ID.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn header(&self) -> ReportHeader {
        ReportHeader {
            bank_name: self.bank_name.clone(),
            report_id: self.report_id.clone(),
            title: self.title.clone(),
            report_date: self.report_date,
        }
    }
}
