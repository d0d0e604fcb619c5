//! Output side: flatten metrics into rows and write them as CSV.

pub mod rows;
pub mod writer;

pub use rows::{EmitOptions, profile_rows};
pub use writer::write_rows_atomic;
