//! Monthly roll-up: merge the per-build metrics files of one month.

use crate::Result;

use anyhow::{Context, bail};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-build files for `year`/`month` in `data_dir`, sorted by name.
///
/// Matches `metrics-YYYY-MM-*.csv` but not the monthly file itself.
pub fn monthly_inputs(data_dir: &Path, year: u16, month: u8) -> Result<Vec<PathBuf>> {
    let pattern = format!(r"^metrics-{:04}-{:02}-.+\.csv$", year, month);
    let re = Regex::new(&pattern)?;

    let mut files = Vec::new();
    for entry in
        fs::read_dir(data_dir).with_context(|| format!("read dir {}", data_dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        if entry.file_type()?.is_file() && name.to_str().is_some_and(|n| re.is_match(n)) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Write `metrics-YYYY-MM.csv` and return its path and the number of data rows.
///
/// The header of the first input is written once; every data row of every
/// input follows in file-name order.
pub fn concat_month(data_dir: &Path, year: u16, month: u8) -> Result<(PathBuf, usize)> {
    let inputs = monthly_inputs(data_dir, year, month)?;
    if inputs.is_empty() {
        bail!(
            "no files found matching {}/metrics-{:04}-{:02}-*.csv",
            data_dir.display(),
            year,
            month
        );
    }
    tracing::info!(files = inputs.len(), "concat.inputs");

    let output = data_dir.join(format!("metrics-{:04}-{:02}.csv", year, month));
    let mut tmp = tempfile::NamedTempFile::new_in(data_dir)
        .with_context(|| format!("create temporary output in {}", data_dir.display()))?;

    let mut rows = 0usize;
    {
        let mut writer = csv::Writer::from_writer(&mut tmp);
        let mut header_written = false;
        for input in &inputs {
            let mut reader = csv::ReaderBuilder::new()
                .flexible(true)
                .from_path(input)
                .with_context(|| format!("read {}", input.display()))?;
            if !header_written {
                writer.write_record(reader.headers()?)?;
                header_written = true;
            }
            for record in reader.records() {
                writer.write_record(&record?)?;
                rows += 1;
            }
        }
        writer.flush()?;
    }

    tmp.persist(&output)
        .with_context(|| format!("write output file {}", output.display()))?;
    Ok((output, rows))
}
