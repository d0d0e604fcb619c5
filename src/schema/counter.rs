//! Counter configuration: which counters we keep and how repeated values fold.

/// How repeated occurrences of a counter within one profiling record combine.
///
/// Across records, counters are always summed regardless of strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Accumulate every occurrence.
    Sum,
    /// The last occurrence in file order wins.
    Last,
}

impl Strategy {
    pub fn fold(self, acc: &mut u64, value: u64) {
        match self {
            Strategy::Sum => *acc = acc.saturating_add(value),
            Strategy::Last => *acc = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSpec {
    pub name: &'static str,
    pub strategy: Strategy,
}

/// Tracked counters, sorted by name (this is also the emission order).
pub const COUNTERS: [CounterSpec; 5] = [
    CounterSpec {
        name: "block",
        strategy: Strategy::Sum,
    },
    CounterSpec {
        name: "instruction",
        strategy: Strategy::Sum,
    },
    CounterSpec {
        name: "move",
        strategy: Strategy::Sum,
    },
    // Register allocator totals are reported cumulatively per unit.
    CounterSpec {
        name: "reload",
        strategy: Strategy::Last,
    },
    CounterSpec {
        name: "spill",
        strategy: Strategy::Last,
    },
];

pub fn lookup(name: &str) -> Option<&'static CounterSpec> {
    COUNTERS.iter().find(|c| c.name == name)
}
