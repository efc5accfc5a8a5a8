//! Consolidation engine: classify every record, then group-and-sum by code

use super::aggregate::{accumulate, Aggregator};
use super::classifier::{Classification, Classifier};
use super::code::{BnmCode, CodeKind};
use super::result::{ConsolidationResult, RunStats};
use crate::error::Result;
use crate::mapping::MappingTables;
use crate::record::{AmountIndicator, BalanceRecord};
use log::{info, warn};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Per-thread partial state, merged pairwise
#[derive(Debug, Default)]
struct Partial {
    aggregator: Aggregator,
    stats: RunStats,
    primary_keys: BTreeSet<(BnmCode, AmountIndicator)>,
    input_totals: BTreeMap<AmountIndicator, Decimal>,
}

impl Partial {
    fn absorb(mut self, classifier: &Classifier<'_>, record: &BalanceRecord) -> Result<Self> {
        self.stats.records_read += 1;

        match classifier.classify(record) {
            Classification::Ineligible => self.stats.ineligible += 1,
            Classification::Unmapped => self.stats.unmapped += 1,
            Classification::Mapped { codes, state_unmapped } => {
                self.stats.mapped += 1;
                self.stats.codes_emitted += codes.len();
                if state_unmapped {
                    self.stats.state_unmapped += 1;
                }

                let input = self.input_totals.entry(record.amtind).or_insert(Decimal::ZERO);
                accumulate(input, record.balance, || format!("{} input total", record.amtind))?;

                for classified in codes {
                    if classified.kind == CodeKind::Primary {
                        self.primary_keys.insert((classified.code.clone(), record.amtind));
                    }
                    self.aggregator.add(classified.code, record.amtind, record.balance)?;
                }
            }
        }

        Ok(self)
    }

    fn merge(mut self, other: Partial) -> Result<Self> {
        self.aggregator.merge(other.aggregator)?;
        self.stats.merge(other.stats);
        self.primary_keys.extend(other.primary_keys);
        for (amtind, amount) in other.input_totals {
            let input = self.input_totals.entry(amtind).or_insert(Decimal::ZERO);
            accumulate(input, amount, || format!("{} input total", amtind))?;
        }
        Ok(self)
    }
}

/// Engine for consolidating balance records into report lines
#[derive(Debug, Clone)]
pub struct ConsolidationEngine {
    tables: MappingTables,
}

impl ConsolidationEngine {
    pub fn new(tables: MappingTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &MappingTables {
        &self.tables
    }

    pub fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.tables)
    }

    /// Classify and aggregate all records. Row order does not affect the result.
    ///
    /// Fails only when a sum leaves the `Decimal` range.
    pub fn consolidate(&self, records: &[BalanceRecord]) -> Result<ConsolidationResult> {
        let classifier = self.classifier();

        let partial = records
            .par_iter()
            .try_fold(Partial::default, |acc, record| acc.absorb(&classifier, record))
            .try_reduce(Partial::default, Partial::merge)?;

        let stats = partial.stats;
        info!(
            "consolidated {} records: {} mapped, {} ineligible, {} unmapped, {} codes",
            stats.records_read, stats.mapped, stats.ineligible, stats.unmapped, stats.codes_emitted
        );
        if stats.state_unmapped > 0 {
            warn!("{} records reported without a state breakdown", stats.state_unmapped);
        }

        let result = ConsolidationResult {
            lines: partial.aggregator.into_lines(),
            stats,
            primary_keys: partial.primary_keys,
            input_totals: partial.input_totals,
        };

        for (amtind, totals) in result.reconcile()?.breaks() {
            warn!(
                "reconciliation break on {}: input {} vs primary output {}",
                amtind, totals.input, totals.primary_output
            );
        }

        Ok(result)
    }
}

impl Default for ConsolidationEngine {
    fn default() -> Self {
        Self::new(MappingTables::default_tables())
    }
}
