//! Group-and-sum of classified balances

use super::code::BnmCode;
use super::result::ReportLine;
use crate::error::{ReportError, Result};
use crate::record::AmountIndicator;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Add `amount` into `total`, failing instead of panicking past the `Decimal` range
pub(crate) fn accumulate(total: &mut Decimal, amount: Decimal, what: impl FnOnce() -> String) -> Result<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| ReportError::Overflow(what()))?;
    Ok(())
}

/// Running sums keyed by (code, amount indicator)
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    sums: HashMap<(BnmCode, AmountIndicator), Decimal>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, code: BnmCode, amtind: AmountIndicator, amount: Decimal) -> Result<()> {
        let total = self.sums.entry((code.clone(), amtind)).or_insert(Decimal::ZERO);
        accumulate(total, amount, || format!("{} {}", code, amtind))
    }

    /// Fold another partial aggregation into this one
    pub fn merge(&mut self, other: Aggregator) -> Result<()> {
        for ((code, amtind), amount) in other.sums {
            let total = self.sums.entry((code.clone(), amtind)).or_insert(Decimal::ZERO);
            accumulate(total, amount, || format!("{} {}", code, amtind))?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Report lines ordered by code, then amount indicator
    pub fn into_lines(self) -> Vec<ReportLine> {
        let mut lines: Vec<ReportLine> = self
            .sums
            .into_iter()
            .map(|((bnm_code, amtind), amount)| ReportLine {
                bnm_code,
                amtind,
                amount,
            })
            .collect();
        lines.sort_by(|a, b| (&a.bnm_code, a.amtind).cmp(&(&b.bnm_code, b.amtind)));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn code(s: &str) -> BnmCode {
        BnmCode::parse(s).unwrap()
    }

    #[test]
    fn test_add_groups_by_code_and_indicator() {
        let mut agg = Aggregator::new();
        agg.add(code("4212077000000Y"), AmountIndicator::D, dec!(10.10)).unwrap();
        agg.add(code("4212077000000Y"), AmountIndicator::D, dec!(0.90)).unwrap();
        agg.add(code("4212077000000Y"), AmountIndicator::I, dec!(5)).unwrap();
        agg.add(code("4211002000000Y"), AmountIndicator::D, dec!(1)).unwrap();

        let lines = agg.into_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].bnm_code.as_str(), "4211002000000Y");
        assert_eq!(lines[1].amtind, AmountIndicator::D);
        assert_eq!(lines[1].amount, dec!(11.00));
        assert_eq!(lines[2].amtind, AmountIndicator::I);
        assert_eq!(lines[2].amount, dec!(5));
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let entries = [
            ("3411141000000Y", AmountIndicator::D, dec!(100.01)),
            ("3411141000000Y", AmountIndicator::F, dec!(3)),
            ("4213085000000Y", AmountIndicator::D, dec!(0.33)),
            ("3411141000000Y", AmountIndicator::D, dec!(0.99)),
        ];

        let mut single = Aggregator::new();
        for (c, ind, amt) in entries.iter() {
            single.add(code(c), *ind, *amt).unwrap();
        }

        let mut left = Aggregator::new();
        let mut right = Aggregator::new();
        for (i, (c, ind, amt)) in entries.iter().enumerate() {
            let target = if i % 2 == 0 { &mut left } else { &mut right };
            target.add(code(c), *ind, *amt).unwrap();
        }
        right.merge(left).unwrap();

        assert_eq!(single.into_lines(), right.into_lines());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let big = Decimal::from_str("50000000000000000000000000000").unwrap();
        let mut agg = Aggregator::new();
        agg.add(code("3411141000000Y"), AmountIndicator::D, big).unwrap();

        let err = agg.add(code("3411141000000Y"), AmountIndicator::D, big).unwrap_err();
        assert!(matches!(err, ReportError::Overflow(ref what) if what == "3411141000000Y D"));

        // Same sum reached through a merge
        let mut other = Aggregator::new();
        other.add(code("3411141000000Y"), AmountIndicator::D, big).unwrap();
        let mut agg = Aggregator::new();
        agg.add(code("3411141000000Y"), AmountIndicator::D, big).unwrap();
        assert!(matches!(agg.merge(other), Err(ReportError::Overflow(_))));
    }

    #[test]
    fn test_empty() {
        let agg = Aggregator::new();
        assert!(agg.is_empty());
        assert!(agg.into_lines().is_empty());
    }
}
