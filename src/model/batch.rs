//! Combination of per-record metrics into one build-wide result.

use crate::Result;
use crate::model::record::Metrics;

use anyhow::bail;

impl Metrics {
    /// Fold another record in. Counters are summed whatever their
    /// within-record strategy; pass totals are summed (top heap takes the max).
    pub fn merge(&mut self, other: &Metrics) {
        for (key, totals) in &other.passes {
            self.passes.entry(*key).or_default().add(totals);
        }
        for (name, value) in &other.counters {
            let acc = self.counters.entry(*name).or_insert(0);
            *acc = acc.saturating_add(*value);
        }
    }
}

/// Combine all records of one build. An empty batch is an error.
pub fn aggregate<I>(records: I) -> Result<Metrics>
where
    I: IntoIterator<Item = Metrics>,
{
    let mut combined = Metrics::zeroed();
    let mut count = 0usize;
    for record in records {
        combined.merge(&record);
        count += 1;
    }
    if count == 0 {
        bail!("no profiling records to aggregate");
    }
    tracing::debug!(records = count, "batch.aggregated");
    Ok(combined)
}
