//! Schema layer: the fixed allow-lists and the output row shape.
//!
//! It owns:
//! - pass names and the key-pass allow-list
//! - counter configuration
//! - metric rows and their metadata

pub mod counter;
pub mod pass;
pub mod row;

pub use counter::COUNTERS;
pub use pass::{PassKey, PassName};
pub use row::{HEADER, Metadata, MetricKind, MetricRow};

/// Artifact extensions whose sizes are aggregated, in emission order.
pub const TARGET_EXTENSIONS: [&str; 13] = [
    "exe", "opt", "a", "cmxa", "cma", "cmi", "cmx", "cmo", "cms", "cmsi", "cmt", "cmti", "o",
];
