//! Aggregation model: per-record reduction, then a build-wide merge.
//!
//! Within a record, counters fold by their configured strategy. Across
//! records everything is additive, so record order never matters.

pub mod batch;
pub mod record;

pub use batch::aggregate;
pub use record::{Metrics, reduce_record};
