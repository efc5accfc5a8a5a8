//! Consolidation output structures

use super::aggregate::accumulate;
use super::code::BnmCode;
use crate::error::Result;
use crate::record::AmountIndicator;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One aggregated line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    #[serde(rename = "BNMCODE")]
    pub bnm_code: BnmCode,
    #[serde(rename = "AMTIND")]
    pub amtind: AmountIndicator,
    #[serde(rename = "AMOUNT")]
    pub amount: Decimal,
}

/// Row counts for a consolidation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub records_read: usize,
    pub ineligible: usize,
    pub unmapped: usize,
    pub mapped: usize,
    /// Mapped rows that lost their state breakdown code
    pub state_unmapped: usize,
    pub codes_emitted: usize,
}

impl RunStats {
    pub fn merge(&mut self, other: RunStats) {
        self.records_read += other.records_read;
        self.ineligible += other.ineligible;
        self.unmapped += other.unmapped;
        self.mapped += other.mapped;
        self.state_unmapped += other.state_unmapped;
        self.codes_emitted += other.codes_emitted;
    }
}

/// Input vs primary-output totals for one amount indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorTotals {
    /// Balances of eligible, mapped input rows
    pub input: Decimal,
    /// Sum of primary code amounts
    pub primary_output: Decimal,
}

impl IndicatorTotals {
    pub fn difference(&self) -> Decimal {
        self.primary_output - self.input
    }
}

/// Reconciliation of primary codes against contributing input balances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub by_indicator: BTreeMap<AmountIndicator, IndicatorTotals>,
}

impl Reconciliation {
    pub fn is_balanced(&self) -> bool {
        self.by_indicator.values().all(|t| t.difference().is_zero())
    }

    /// Indicators whose primary output does not match the input
    pub fn breaks(&self) -> Vec<(AmountIndicator, IndicatorTotals)> {
        self.by_indicator
            .iter()
            .filter(|(_, t)| !t.difference().is_zero())
            .map(|(ind, t)| (*ind, *t))
            .collect()
    }
}

/// Complete consolidation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationResult {
    /// Aggregated lines sorted by code then amount indicator
    pub lines: Vec<ReportLine>,

    pub stats: RunStats,

    /// Keys that received a primary code
    pub primary_keys: BTreeSet<(BnmCode, AmountIndicator)>,

    /// Balances of eligible, mapped input rows per amount indicator
    pub input_totals: BTreeMap<AmountIndicator, Decimal>,
}

impl ConsolidationResult {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every output line per amount indicator, fan-out codes included
    pub fn total_by_indicator(&self) -> Result<BTreeMap<AmountIndicator, Decimal>> {
        let mut totals = BTreeMap::new();
        for line in &self.lines {
            let total = totals.entry(line.amtind).or_insert(Decimal::ZERO);
            accumulate(total, line.amount, || format!("{} report total", line.amtind))?;
        }
        Ok(totals)
    }

    /// Compare the primary lines actually in `lines` against the input balances
    pub fn reconcile(&self) -> Result<Reconciliation> {
        let mut by_indicator: BTreeMap<AmountIndicator, IndicatorTotals> = self
            .input_totals
            .iter()
            .map(|(amtind, input)| {
                let totals = IndicatorTotals {
                    input: *input,
                    primary_output: Decimal::ZERO,
                };
                (*amtind, totals)
            })
            .collect();

        for line in &self.lines {
            if !self.primary_keys.contains(&(line.bnm_code.clone(), line.amtind)) {
                continue;
            }
            let totals = by_indicator.entry(line.amtind).or_insert(IndicatorTotals {
                input: Decimal::ZERO,
                primary_output: Decimal::ZERO,
            });
            accumulate(&mut totals.primary_output, line.amount, || {
                format!("{} primary total", line.amtind)
            })?;
        }

        Ok(Reconciliation { by_indicator })
    }

    pub fn summary(&self) -> Result<ConsolidationSummary> {
        let reconciliation = self.reconcile()?;
        Ok(ConsolidationSummary {
            line_count: self.lines.len(),
            stats: self.stats,
            totals: self.total_by_indicator()?,
            balanced: reconciliation.is_balanced(),
            reconciliation,
        })
    }
}

/// Summary statistics from a consolidation
#[derive(Debug, Clone, Serialize)]
pub struct ConsolidationSummary {
    pub line_count: usize,
    pub stats: RunStats,
    pub totals: BTreeMap<AmountIndicator, Decimal>,
    pub balanced: bool,
    pub reconciliation: Reconciliation,
}
