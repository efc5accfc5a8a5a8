//! Report runner for complete batch runs
//!
//! Pre-loads mapping tables once, then runs load -> consolidate -> write
//! for one or more reporting configurations.

use crate::config::RunConfig;
use crate::consolidation::{ConsolidationEngine, ConsolidationResult, ConsolidationSummary};
use crate::error::Result;
use crate::mapping::MappingTables;
use crate::record::{load_extracts, BalanceRecord};
use crate::report::{count_pages, render_report, write_lines_csv, write_text};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of one run, printable as JSON
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub report_date: NaiveDate,
    pub inputs: Vec<PathBuf>,
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
    pub pages: usize,
    pub consolidation: ConsolidationSummary,
}

/// Pre-loaded runner for reporting batches
#[derive(Debug, Clone)]
pub struct ReportRunner {
    engine: ConsolidationEngine,
}

impl ReportRunner {
    /// Create runner with the built-in mapping tables
    pub fn new() -> Self {
        Self::with_tables(MappingTables::default_tables())
    }

    /// Create runner from a directory of mapping CSVs
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::with_tables(MappingTables::from_csv_path(path)?))
    }

    pub fn with_tables(tables: MappingTables) -> Self {
        Self {
            engine: ConsolidationEngine::new(tables),
        }
    }

    /// Runner for a config: its mapping directory if set, otherwise built-in tables
    pub fn for_config(config: &RunConfig) -> Result<Self> {
        match &config.mapping_dir {
            Some(dir) => {
                info!("loading mapping tables from {}", dir.display());
                Self::from_csv_path(dir)
            }
            None => Ok(Self::new()),
        }
    }

    pub fn engine(&self) -> &ConsolidationEngine {
        &self.engine
    }

    /// Consolidate records already in memory
    pub fn consolidate(&self, records: &[BalanceRecord]) -> Result<ConsolidationResult> {
        self.engine.consolidate(records)
    }

    /// Load the configured extracts, consolidate, and write the dataset and report
    pub fn run(&self, config: &RunConfig) -> Result<RunSummary> {
        let records = load_extracts(&config.inputs)?;
        info!("{} records from {} extracts", records.len(), config.inputs.len());

        let result = self.consolidate(&records)?;
        let consolidation = result.summary()?;

        write_lines_csv(&config.dataset_path, &result.lines)?;
        info!("dataset written to {}", config.dataset_path.display());

        let text = render_report(&config.header(), &result.lines, config.page_length)?;
        write_text(&config.report_path, &text)?;
        let pages = count_pages(&text);
        info!("report written to {} ({} pages)", config.report_path.display(), pages);

        Ok(RunSummary {
            report_date: config.report_date,
            inputs: config.inputs.clone(),
            dataset_path: config.dataset_path.clone(),
            report_path: config.report_path.clone(),
            pages,
            consolidation,
        })
    }
}

impl Default for ReportRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AmountIndicator;
    use rust_decimal_macros::dec;
    use std::fs;

    const DEPOSITS: &str = "\
ACCTNO,BRANCH,PRODUCT,CUSTCD,STATECD,AMTIND,CURBAL
1,1,10,77,01,D,1000.00
2,1,150,02,01,D,2500.50
3,2,250,86,14,F,300.00
4,2,150,77,01,D,0.00
";

    const LOANS: &str = "\
ACCTNO,BRANCH,PRODUCT,CUSTCD,STATECD,AMTIND,CURBAL,NPL
10,1,420,41,10,D,50000.00,N
11,1,610,77,J,I,20000.00,Y
12,1,999,77,J,D,1.00,N
";

    fn config(dir: &Path, inputs: Vec<PathBuf>) -> RunConfig {
        let mut config = RunConfig::new(inputs, NaiveDate::from_ymd_opt(2026, 9, 30).unwrap());
        config.dataset_path = dir.join("out").join("rdal.csv");
        config.report_path = dir.join("out").join("rdal.txt");
        config.page_length = 5;
        config
    }

    #[test]
    fn test_full_run() {
        let dir = tempfile::tempdir().unwrap();
        let deposits = dir.path().join("deposits.csv");
        let loans = dir.path().join("loans.csv");
        fs::write(&deposits, DEPOSITS).unwrap();
        fs::write(&loans, LOANS).unwrap();

        let config = config(dir.path(), vec![deposits, loans, dir.path().join("hp.csv")]);
        let summary = ReportRunner::new().run(&config).expect("run failed");

        assert_eq!(summary.consolidation.stats.records_read, 7);
        assert_eq!(summary.consolidation.stats.ineligible, 1);
        assert_eq!(summary.consolidation.stats.unmapped, 1);
        assert!(summary.consolidation.balanced);
        assert_eq!(
            summary.consolidation.reconciliation.by_indicator[&AmountIndicator::D].input,
            dec!(53500.50)
        );
        assert_eq!(summary.consolidation.totals[&AmountIndicator::I], dec!(60000.00));

        let dataset = fs::read_to_string(&config.dataset_path).unwrap();
        assert!(dataset.starts_with("BNMCODE,AMTIND,AMOUNT\n"));
        assert!(dataset.contains("3412077000000Y,I,20000.00"));
        assert!(dataset.contains("3460077J00000Y,I,20000.00"));
        assert!(dataset.contains("3470077000000Y,I,20000.00"));
        assert!(dataset.contains("4213080000000Y,F,300.00"));

        let report = fs::read_to_string(&config.report_path).unwrap();
        assert_eq!(count_pages(&report), summary.pages);
        // 9 lines + 3 totals at 5 per page
        assert_eq!(summary.pages, 3);
    }

    #[test]
    fn test_run_with_no_extracts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), vec![dir.path().join("absent.csv")]);
        let summary = ReportRunner::new().run(&config).unwrap();

        assert_eq!(summary.consolidation.line_count, 0);
        assert_eq!(summary.pages, 1);
        assert_eq!(
            fs::read_to_string(&config.dataset_path).unwrap(),
            "BNMCODE,AMTIND,AMOUNT\n"
        );
    }

    #[test]
    fn test_runner_from_exported_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = dir.path().join("mapping");
        MappingTables::default_tables().export_csv(&mapping).unwrap();

        let mut cfg = config(dir.path(), vec![]);
        cfg.mapping_dir = Some(mapping);
        let runner = ReportRunner::for_config(&cfg).unwrap();

        let records = vec![BalanceRecord::new(1, 420, "41", "10", AmountIndicator::D, dec!(10))];
        let from_files = runner.consolidate(&records).unwrap();
        let built_in = ReportRunner::new().consolidate(&records).unwrap();
        assert_eq!(from_files.lines, built_in.lines);
    }
}
