//! Reduction of one profiling record (one compilation unit).

use crate::profile::ProfileRow;
use crate::profile::scalar::{parse_counters, parse_duration, parse_size};
use crate::schema::{COUNTERS, PassKey, PassName, counter};

use std::collections::BTreeMap;

/// Accumulated resources for one key pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassTotals {
    pub time_secs: f64,
    pub alloc_bytes: u64,
    /// Peak heap; combined with `max`, never summed.
    pub top_heap_bytes: u64,
}

impl PassTotals {
    pub(crate) fn add(&mut self, other: &PassTotals) {
        self.time_secs += other.time_secs;
        self.alloc_bytes = self.alloc_bytes.saturating_add(other.alloc_bytes);
        self.top_heap_bytes = self.top_heap_bytes.max(other.top_heap_bytes);
    }
}

/// Per-pass totals plus configured counters.
///
/// Every key pass and every configured counter has an entry from construction
/// on, so consumers never see a sparse map.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub passes: BTreeMap<PassKey, PassTotals>,
    pub counters: BTreeMap<&'static str, u64>,
}

impl Metrics {
    pub fn zeroed() -> Self {
        Self {
            passes: PassKey::ALL
                .into_iter()
                .map(|k| (k, PassTotals::default()))
                .collect(),
            counters: COUNTERS.iter().map(|c| (c.name, 0)).collect(),
        }
    }

    pub fn pass(&self, key: PassKey) -> PassTotals {
        self.passes.get(&key).copied().unwrap_or_default()
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }
}

/// Reduce the rows of one record, in file order.
pub fn reduce_record(rows: &[ProfileRow]) -> Metrics {
    let mut metrics = Metrics::zeroed();

    for row in rows {
        match PassName::parse(&row.pass_name) {
            Some(name) => {
                if let Some(key) = PassKey::from_pass_name(&name) {
                    let totals = metrics.passes.entry(key).or_default();
                    if let Some(secs) = row.time.as_deref().and_then(parse_duration) {
                        totals.time_secs += secs;
                    }
                    if let Some(bytes) = row.alloc.as_deref().and_then(parse_size) {
                        totals.alloc_bytes = totals.alloc_bytes.saturating_add(bytes);
                    }
                    if let Some(bytes) = row.top_heap.as_deref().and_then(parse_size) {
                        totals.top_heap_bytes = totals.top_heap_bytes.max(bytes);
                    }
                }
            }
            None => {
                tracing::debug!(pass = %row.pass_name, "pass.unresolved");
            }
        }

        // Counters are pass-agnostic.
        let Some(list) = row.counters.as_deref() else {
            continue;
        };
        for (name, value) in parse_counters(list) {
            let Some(spec) = counter::lookup(&name) else {
                continue;
            };
            let acc = metrics.counters.entry(spec.name).or_insert(0);
            spec.strategy.fold(acc, value);
        }
    }

    metrics
}
