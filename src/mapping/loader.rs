//! CSV-based mapping table loader
//!
//! Reads and writes the mapping tables as CSV files in data/mapping/ so they
//! can be versioned and changed between reporting periods without a rebuild.

use super::{CustomerClass, CustomerTable, ProductCategory, ProductClass, ProductRange, ProductTable, StateTable};
use crate::error::{ReportError, Result};
use csv::{ReaderBuilder, Trim, Writer};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Default path to mapping directory
pub const DEFAULT_MAPPING_PATH: &str = "data/mapping";

pub const PRODUCT_FILE: &str = "product_items.csv";
pub const CUSTOMER_FILE: &str = "customer_codes.csv";
pub const STATE_FILE: &str = "state_codes.csv";

#[derive(Debug, Serialize, Deserialize)]
struct ProductRow {
    #[serde(rename = "START")]
    start: u16,
    #[serde(rename = "END")]
    end: u16,
    #[serde(rename = "ITEM")]
    item: String,
    #[serde(rename = "CATEGORY")]
    category: ProductCategory,
    #[serde(rename = "BY_STATE")]
    by_state: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CustomerRow {
    #[serde(rename = "CUSTCD")]
    custcd: String,
    #[serde(rename = "REPORT_CODE")]
    report_code: String,
    #[serde(rename = "NON_RESIDENT")]
    non_resident: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateRow {
    #[serde(rename = "STATECD")]
    statecd: String,
    #[serde(rename = "STATE")]
    state: char,
}

fn parse_flag(table: &'static str, value: &str) -> Result<bool> {
    match value {
        "Y" => Ok(true),
        "N" | "" => Ok(false),
        other => Err(ReportError::table(table, format!("flag must be Y or N, got {:?}", other))),
    }
}

fn flag(value: bool) -> String {
    let flag = if value { "Y" } else { "N" };
    flag.to_string()
}

fn open(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
    Ok(ReaderBuilder::new().trim(Trim::All).from_reader(file))
}

/// Load product ranges from product_items.csv
pub fn load_product_table(dir: &Path) -> Result<ProductTable> {
    let mut reader = open(&dir.join(PRODUCT_FILE))?;
    let mut ranges = Vec::new();

    for result in reader.deserialize() {
        let row: ProductRow = result?;
        ranges.push(ProductRange {
            start: row.start,
            end: row.end,
            class: ProductClass {
                item: row.item,
                category: row.category,
                by_state: parse_flag("product", &row.by_state)?,
            },
        });
    }

    ProductTable::new(ranges)
}

/// Load customer groupings from customer_codes.csv
pub fn load_customer_table(dir: &Path) -> Result<CustomerTable> {
    let mut reader = open(&dir.join(CUSTOMER_FILE))?;
    let mut entries = Vec::new();

    for result in reader.deserialize() {
        let row: CustomerRow = result?;
        entries.push((
            row.custcd,
            CustomerClass {
                report_code: row.report_code,
                non_resident: parse_flag("customer", &row.non_resident)?,
            },
        ));
    }

    CustomerTable::new(entries)
}

/// Load state letters from state_codes.csv
pub fn load_state_table(dir: &Path) -> Result<StateTable> {
    let mut reader = open(&dir.join(STATE_FILE))?;
    let mut entries = Vec::new();

    for result in reader.deserialize() {
        let row: StateRow = result?;
        entries.push((row.statecd, row.state));
    }

    StateTable::new(entries)
}

fn create(path: &Path) -> Result<Writer<File>> {
    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    Ok(Writer::from_writer(file))
}

pub fn write_product_table(dir: &Path, table: &ProductTable) -> Result<()> {
    let path = dir.join(PRODUCT_FILE);
    let mut writer = create(&path)?;
    for range in table.ranges() {
        writer.serialize(ProductRow {
            start: range.start,
            end: range.end,
            item: range.class.item.clone(),
            category: range.class.category,
            by_state: flag(range.class.by_state),
        })?;
    }
    writer.flush().map_err(|e| ReportError::io(&path, e))
}

pub fn write_customer_table(dir: &Path, table: &CustomerTable) -> Result<()> {
    let path = dir.join(CUSTOMER_FILE);
    let mut writer = create(&path)?;
    for (custcd, class) in table.iter() {
        writer.serialize(CustomerRow {
            custcd: custcd.clone(),
            report_code: class.report_code.clone(),
            non_resident: flag(class.non_resident),
        })?;
    }
    writer.flush().map_err(|e| ReportError::io(&path, e))
}

pub fn write_state_table(dir: &Path, table: &StateTable) -> Result<()> {
    let path = dir.join(STATE_FILE);
    let mut writer = create(&path)?;
    for (statecd, state) in table.iter() {
        writer.serialize(StateRow {
            statecd: statecd.clone(),
            state: *state,
        })?;
    }
    writer.flush().map_err(|e| ReportError::io(&path, e))
}
