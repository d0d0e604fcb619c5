//! Reading the per-unit profiling CSVs emitted by the compiler profiler.

pub mod parse;
pub mod row;
pub mod scalar;

pub use parse::parse_profile_file;
pub use row::ProfileRow;
