//! Product code ranges and the BNM line items they report under

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// Balance sheet side of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    Deposit,
    Loan,
}

/// Reporting class of a product range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductClass {
    /// Five character BNM item code
    pub item: String,
    pub category: ProductCategory,
    /// Also reported in the loans-by-state breakdown
    pub by_state: bool,
}

/// Inclusive product code range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRange {
    pub start: u16,
    pub end: u16,
    pub class: ProductClass,
}

/// Product code ranges, sorted and non-overlapping
#[derive(Debug, Clone)]
pub struct ProductTable {
    ranges: Vec<ProductRange>,
}

impl ProductTable {
    /// Build from ranges; rejects inverted or overlapping ranges and malformed items
    pub fn new(mut ranges: Vec<ProductRange>) -> Result<Self> {
        ranges.sort_by_key(|r| r.start);

        for range in &ranges {
            if range.start > range.end {
                return Err(ReportError::table(
                    "product",
                    format!("range {}-{} is inverted", range.start, range.end),
                ));
            }
            if range.class.item.len() != 5 || !range.class.item.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ReportError::table(
                    "product",
                    format!("item {:?} must be five digits", range.class.item),
                ));
            }
        }

        for pair in ranges.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(ReportError::table(
                    "product",
                    format!(
                        "range {}-{} overlaps {}-{}",
                        pair[1].start, pair[1].end, pair[0].start, pair[0].end
                    ),
                ));
            }
        }

        Ok(Self { ranges })
    }

    /// Default product ranges
    pub fn default_table() -> Self {
        use ProductCategory::{Deposit, Loan};

        let range = |start, end, item: &str, category, by_state| ProductRange {
            start,
            end,
            class: ProductClass {
                item: item.to_string(),
                category,
                by_state,
            },
        };

        Self {
            ranges: vec![
                range(1, 99, "42110", Deposit, false),    // Current accounts
                range(100, 199, "42120", Deposit, false), // Savings
                range(200, 299, "42130", Deposit, false), // Fixed deposits
                range(300, 349, "42180", Deposit, false), // Islamic investment deposits
                range(400, 499, "34111", Loan, true),     // Term loans
                range(500, 549, "34130", Loan, false),    // Overdrafts
                range(550, 599, "34140", Loan, false),    // Revolving credit
                range(600, 699, "34120", Loan, true),     // Hire purchase
                range(700, 749, "34150", Loan, true),     // Housing loans
                range(750, 799, "34190", Loan, false),    // Staff loans
            ],
        }
    }

    pub fn lookup(&self, product: u16) -> Option<&ProductClass> {
        let idx = self.ranges.partition_point(|r| r.end < product);
        self.ranges
            .get(idx)
            .filter(|r| r.start <= product)
            .map(|r| &r.class)
    }

    pub fn ranges(&self) -> &[ProductRange] {
        &self.ranges
    }
}
