//! Customer code groupings

use crate::error::{ReportError, Result};
use crate::record::normalize_code;
use std::collections::BTreeMap;

/// Reporting group of a raw customer code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerClass {
    /// Two digit customer code used in the BNM code
    pub report_code: String,
    pub non_resident: bool,
}

/// Raw customer code -> reporting group
#[derive(Debug, Clone)]
pub struct CustomerTable {
    codes: BTreeMap<String, CustomerClass>,
}

impl CustomerTable {
    pub fn new(entries: impl IntoIterator<Item = (String, CustomerClass)>) -> Result<Self> {
        let mut codes = BTreeMap::new();
        for (raw, class) in entries {
            let raw = normalize_code(&raw);
            if !is_two_digits(&raw) || !is_two_digits(&class.report_code) {
                return Err(ReportError::table(
                    "customer",
                    format!("codes must be two digits: {:?} -> {:?}", raw, class.report_code),
                ));
            }
            if codes.insert(raw.clone(), class).is_some() {
                return Err(ReportError::table("customer", format!("duplicate code {:?}", raw)));
            }
        }
        Ok(Self { codes })
    }

    /// Default customer groupings
    pub fn default_table() -> Self {
        let groups: &[(&[u8], &str, bool)] = &[
            (&[1], "01", false),                             // Central bank
            (&[2, 3, 11, 12], "02", false),                  // Domestic banking institutions
            (&[13, 14, 15, 16, 17, 18, 19, 20], "13", false), // Non-bank financial institutions
            (&[41, 42, 43, 44], "41", false),                // Business enterprises, SME
            (&[46, 47, 48, 49, 51, 52, 53, 54], "46", false), // Business enterprises, non-SME
            (&[61, 62, 63, 64, 65, 66], "61", false),        // Government
            (&[71, 72, 73, 74], "71", false),                // Other domestic entities
            (&[76, 77, 78, 79], "77", false),                // Individuals
            (&[81, 82, 83, 84], "81", true),                 // Foreign banking institutions
            (&[85, 86, 87, 88, 89, 90], "85", true),         // Foreign non-bank entities
            (&[91, 92, 95, 96, 98, 99], "95", true),         // Foreign individuals and others
        ];

        let mut codes = BTreeMap::new();
        for (raw_codes, report_code, non_resident) in groups {
            for raw in *raw_codes {
                codes.insert(
                    format!("{:02}", raw),
                    CustomerClass {
                        report_code: report_code.to_string(),
                        non_resident: *non_resident,
                    },
                );
            }
        }
        Self { codes }
    }

    pub fn lookup(&self, custcd: &str) -> Option<&CustomerClass> {
        self.codes.get(custcd)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CustomerClass)> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn is_two_digits(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_digit())
}
