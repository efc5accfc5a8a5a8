//! Record classification into BNM codes
//!
//! A record fans out into zero or more codes:
//! - Primary: item + customer group
//! - State breakdown: by-state products with a known state
//! - Non-resident total: foreign customer groups
//! - Impaired: loans flagged in the NPL book
//!
//! Ineligible or unmapped records produce nothing and are never an error.

use super::code::{BnmCode, CodeKind, IMPAIRED_ITEM, NON_RESIDENT_TOTAL, STATE_BREAKDOWN_ITEM};
use crate::mapping::{MappingTables, ProductCategory};
use crate::record::BalanceRecord;
use log::debug;
use rust_decimal::Decimal;

/// A single code emitted for a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCode {
    pub code: BnmCode,
    pub kind: CodeKind,
}

/// Outcome of classifying one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Excluded by the eligibility filter
    Ineligible,
    /// Product or customer code has no mapping
    Unmapped,
    /// Codes to report the balance under; the first is always the primary code.
    /// `state_unmapped` is set when a by-state product lost its breakdown code.
    Mapped {
        codes: Vec<ClassifiedCode>,
        state_unmapped: bool,
    },
}

impl Classification {
    pub fn codes(&self) -> &[ClassifiedCode] {
        match self {
            Classification::Mapped { codes, .. } => codes,
            _ => &[],
        }
    }
}

/// Classifier over a fixed set of mapping tables
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    tables: &'a MappingTables,
}

impl<'a> Classifier<'a> {
    pub fn new(tables: &'a MappingTables) -> Self {
        Self { tables }
    }

    /// Zero, overdrawn and credit-balance rows are not reported
    pub fn is_eligible(record: &BalanceRecord) -> bool {
        record.balance > Decimal::ZERO
    }

    pub fn classify(&self, record: &BalanceRecord) -> Classification {
        if !Self::is_eligible(record) {
            return Classification::Ineligible;
        }

        let Some(product) = self.tables.product.lookup(record.product) else {
            debug!("account {}: product {} unmapped", record.acctno, record.product);
            return Classification::Unmapped;
        };
        let Some(customer) = self.tables.customer.lookup(&record.custcd) else {
            debug!("account {}: customer code {:?} unmapped", record.acctno, record.custcd);
            return Classification::Unmapped;
        };

        let mut codes = Vec::with_capacity(4);
        let mut push = |item: &str, cust: &str, qualifier: char, kind: CodeKind| {
            match BnmCode::compose(item, cust, qualifier) {
                Ok(code) => codes.push(ClassifiedCode { code, kind }),
                // validated tables never get here
                Err(e) => debug!("account {}: {}", record.acctno, e),
            }
        };

        push(&product.item, &customer.report_code, '0', CodeKind::Primary);

        let mut state_unmapped = false;
        if product.by_state {
            match self.tables.state.lookup(&record.statecd) {
                Some(state) => push(STATE_BREAKDOWN_ITEM, &customer.report_code, state, CodeKind::StateBreakdown),
                None => {
                    debug!("account {}: state {:?} unmapped", record.acctno, record.statecd);
                    state_unmapped = true;
                }
            }
        }

        if customer.non_resident {
            push(&product.item, NON_RESIDENT_TOTAL, '0', CodeKind::NonResidentTotal);
        }

        if record.npl && product.category == ProductCategory::Loan {
            push(IMPAIRED_ITEM, &customer.report_code, '0', CodeKind::Impaired);
        }

        Classification::Mapped {
            codes,
            state_unmapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AmountIndicator;
    use rust_decimal_macros::dec;

    fn record(product: u16, custcd: &str, statecd: &str, balance: Decimal) -> BalanceRecord {
        BalanceRecord::new(1, product, custcd, statecd, AmountIndicator::D, balance)
    }

    fn codes(c: &Classification) -> Vec<(&str, CodeKind)> {
        c.codes().iter().map(|c| (c.code.as_str(), c.kind)).collect()
    }

    #[test]
    fn test_savings_individual() {
        let tables = MappingTables::default_tables();
        let classifier = Classifier::new(&tables);

        let result = classifier.classify(&record(150, "78", "01", dec!(100)));
        assert_eq!(codes(&result), vec![("4212077000000Y", CodeKind::Primary)]);
    }

    #[test]
    fn test_term_loan_by_state() {
        let tables = MappingTables::default_tables();
        let classifier = Classifier::new(&tables);

        let result = classifier.classify(&record(420, "42", "10", dec!(5000)));
        assert_eq!(
            codes(&result),
            vec![
                ("3411141000000Y", CodeKind::Primary),
                ("3460041B00000Y", CodeKind::StateBreakdown),
            ]
        );
    }

    #[test]
    fn test_unknown_state_drops_only_breakdown() {
        let tables = MappingTables::default_tables();
        let classifier = Classifier::new(&tables);

        let result = classifier.classify(&record(650, "77", "99", dec!(10)));
        assert_eq!(codes(&result), vec![("3412077000000Y", CodeKind::Primary)]);
        assert!(matches!(result, Classification::Mapped { state_unmapped: true, .. }));

        // Products without a state breakdown never flag the state
        let savings = classifier.classify(&record(150, "77", "99", dec!(10)));
        assert!(matches!(savings, Classification::Mapped { state_unmapped: false, .. }));

        let known = classifier.classify(&record(650, "77", "14", dec!(10)));
        assert!(matches!(known, Classification::Mapped { state_unmapped: false, .. }));
    }

    #[test]
    fn test_non_resident_fans_out() {
        let tables = MappingTables::default_tables();
        let classifier = Classifier::new(&tables);

        let result = classifier.classify(&record(250, "86", "", dec!(1)));
        assert_eq!(
            codes(&result),
            vec![
                ("4213085000000Y", CodeKind::Primary),
                ("4213080000000Y", CodeKind::NonResidentTotal),
            ]
        );
    }

    #[test]
    fn test_npl_loan_impaired() {
        let tables = MappingTables::default_tables();
        let classifier = Classifier::new(&tables);

        let loan = record(510, "46", "", dec!(75)).with_npl(true);
        assert_eq!(
            codes(&classifier.classify(&loan)),
            vec![
                ("3413046000000Y", CodeKind::Primary),
                ("3470046000000Y", CodeKind::Impaired),
            ]
        );

        // NPL flag on a deposit has no effect
        let deposit = record(10, "46", "", dec!(75)).with_npl(true);
        assert_eq!(codes(&classifier.classify(&deposit)).len(), 1);
    }

    #[test]
    fn test_ineligible_and_unmapped() {
        let tables = MappingTables::default_tables();
        let classifier = Classifier::new(&tables);

        assert_eq!(classifier.classify(&record(150, "77", "", dec!(0))), Classification::Ineligible);
        assert_eq!(classifier.classify(&record(150, "77", "", dec!(-3.10))), Classification::Ineligible);
        assert_eq!(classifier.classify(&record(950, "77", "", dec!(1))), Classification::Unmapped);
        assert_eq!(classifier.classify(&record(150, "45", "", dec!(1))), Classification::Unmapped);
        assert!(classifier.classify(&record(950, "77", "", dec!(1))).codes().is_empty());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let tables = MappingTables::default_tables();
        let classifier = Classifier::new(&tables);

        for product in (0..900).step_by(7) {
            for custcd in ["02", "41", "77", "81", "91", "45"] {
                let rec = record(product, custcd, "14", dec!(12.34)).with_npl(product % 2 == 0);
                let first = classifier.classify(&rec);
                let second = classifier.classify(&rec);
                assert_eq!(first, second);
                if let Classification::Mapped { codes, .. } = &first {
                    assert_eq!(codes[0].kind, CodeKind::Primary);
                    assert_eq!(codes.iter().filter(|c| c.kind == CodeKind::Primary).count(), 1);
                }
            }
        }
    }
}
