//! Regulatory code mapping tables: products, customer groups, and states

mod customer;
mod product;
mod state;
pub mod loader;

pub use customer::{CustomerClass, CustomerTable};
pub use product::{ProductCategory, ProductClass, ProductRange, ProductTable};
pub use state::StateTable;

use crate::error::{ReportError, Result};
use std::path::Path;

/// Container for all mapping tables used by a run
#[derive(Debug, Clone)]
pub struct MappingTables {
    pub product: ProductTable,
    pub customer: CustomerTable,
    pub state: StateTable,
}

impl MappingTables {
    /// Built-in tables for the current reporting period
    pub fn default_tables() -> Self {
        Self {
            product: ProductTable::default_table(),
            customer: CustomerTable::default_table(),
            state: StateTable::default_table(),
        }
    }

    /// Load tables from CSV files in the default location (data/mapping/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_MAPPING_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            product: loader::load_product_table(path)?,
            customer: loader::load_customer_table(path)?,
            state: loader::load_state_table(path)?,
        })
    }

    /// Write all tables as CSV files readable by `from_csv_path`
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| ReportError::io(path, e))?;
        loader::write_product_table(path, &self.product)?;
        loader::write_customer_table(path, &self.customer)?;
        loader::write_state_table(path, &self.state)?;
        Ok(())
    }
}

impl Default for MappingTables {
    fn default() -> Self {
        Self::default_tables()
    }
}
