//! Artifact sizes: raw per-file sizes grouped into per-extension totals.
//!
//! Input (one row per installed file):
//! timestamp,commit_hash,pr_number,kind,name,value
//! 2025-11-18T09:34:49Z,d72de38c,5004,size_in_bytes,bin/ocamlc.opt,26251088

use crate::Result;
use crate::schema::{Metadata, MetricRow, TARGET_EXTENSIONS};

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct RawArtifact {
    timestamp: String,
    commit_hash: String,
    pr_number: String,
    kind: String,
    name: String,
    value: u64,
}

/// Per-extension size rows plus the metadata they were tagged with.
#[derive(Debug, Clone)]
pub struct SizeRows {
    pub meta: Metadata,
    pub rows: Vec<MetricRow>,
}

pub fn convert_artifact_file(path: &Path) -> Result<SizeRows> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("read artifact sizes {}", path.display()))?;
    convert_artifact_sizes(file).with_context(|| format!("convert {}", path.display()))
}

/// Sum sizes per target extension. Metadata and kind come from the first row.
pub fn convert_artifact_sizes<R: Read>(input: R) -> Result<SizeRows> {
    let mut reader = csv::Reader::from_reader(input);

    let mut first: Option<RawArtifact> = None;
    let mut totals: BTreeMap<&'static str, u64> =
        TARGET_EXTENSIONS.iter().map(|ext| (*ext, 0)).collect();

    for (lineno, row) in reader.deserialize::<RawArtifact>().enumerate() {
        let row = row.with_context(|| format!("bad artifact row at line {}", lineno + 2))?;
        if let Some(total) = extension(&row.name).and_then(|ext| totals.get_mut(ext)) {
            *total = total.saturating_add(row.value);
        }
        if first.is_none() {
            first = Some(row);
        }
    }

    let Some(first) = first else {
        bail!("no data found in artifact sizes");
    };
    let meta = Metadata {
        timestamp: first.timestamp,
        commit_hash: first.commit_hash,
        pr_number: first.pr_number,
    };

    let rows = TARGET_EXTENSIONS
        .iter()
        .map(|ext| MetricRow::new(&meta, first.kind.as_str(), ext, totals[ext].to_string()))
        .collect();

    Ok(SizeRows { meta, rows })
}

/// Text after the last `.` of the file name, if any.
fn extension(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|e| e.to_str())
}
