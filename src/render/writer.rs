use crate::Result;
use crate::schema::{HEADER, MetricRow};

use anyhow::Context;
use std::io::Write;
use std::path::Path;

/// Write rows with the six-column header.
pub fn write_rows<W: Write>(out: W, rows: &[MetricRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write rows to `path`, replacing it only once everything is written.
///
/// Rows go to a temporary file next to the target which is renamed into
/// place on success; on failure the temporary file is removed.
pub fn write_rows_atomic(path: &Path, rows: &[MetricRow]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temporary output in {}", dir.display()))?;
    write_rows(&mut tmp, rows)?;
    tmp.persist(path)
        .with_context(|| format!("write output file {}", path.display()))?;
    Ok(())
}
