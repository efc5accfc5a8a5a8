//! Load balance records from CSV account extracts

use super::data::normalize_code;
use super::{AmountIndicator, BalanceRecord};
use crate::error::{ReportError, Result};
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Raw CSV row matching the extract columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ACCTNO")]
    acctno: u64,
    #[serde(rename = "BRANCH", default)]
    branch: u16,
    #[serde(rename = "PRODUCT")]
    product: u16,
    #[serde(rename = "CUSTCD")]
    custcd: String,
    #[serde(rename = "STATECD", default)]
    statecd: String,
    #[serde(rename = "AMTIND")]
    amtind: String,
    #[serde(rename = "CURBAL", with = "rust_decimal::serde::str")]
    curbal: Decimal,
    #[serde(rename = "NPL", default)]
    npl: Option<String>,
}

impl CsvRow {
    fn into_record(self) -> Result<BalanceRecord> {
        let amtind: AmountIndicator = self
            .amtind
            .parse()
            .map_err(|reason| ReportError::InvalidRecord { acctno: self.acctno, reason })?;

        let npl = match self.npl.as_deref().map(str::trim) {
            None | Some("") | Some("N") => false,
            Some("Y") => true,
            Some(other) => {
                return Err(ReportError::InvalidRecord {
                    acctno: self.acctno,
                    reason: format!("unknown NPL flag {:?}", other),
                })
            }
        };

        Ok(BalanceRecord {
            acctno: self.acctno,
            branch: self.branch,
            product: self.product,
            custcd: normalize_code(&self.custcd),
            statecd: normalize_code(&self.statecd),
            amtind,
            balance: self.curbal,
            npl,
        })
    }
}

/// Load all records from a CSV extract
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<BalanceRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| ReportError::io(path, e))?;
    load_records_from_reader(file)
}

/// Load records from any reader (e.g., string buffer)
pub fn load_records_from_reader<R: Read>(reader: R) -> Result<Vec<BalanceRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.into_record()?);
    }

    Ok(records)
}

/// Load an extract, substituting an empty table when the file is absent
pub fn load_records_or_empty<P: AsRef<Path>>(path: P) -> Result<Vec<BalanceRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("extract {} not found, using empty table", path.display());
        return Ok(Vec::new());
    }
    let records = load_records(path)?;
    info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Concatenate several extracts (deposits, loans, hire purchase, ...) into one table
pub fn load_extracts(paths: &[PathBuf]) -> Result<Vec<BalanceRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(load_records_or_empty(path)?);
    }
    Ok(records)
}
