use crate::Result;
use crate::profile::row::ProfileRow;

use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column positions resolved from the header row.
struct Columns {
    pass_name: usize,
    time: Option<usize>,
    alloc: Option<usize>,
    top_heap: Option<usize>,
    counters: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Option<Columns> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Some(Columns {
            pass_name: find("pass name")?,
            time: find("time"),
            alloc: find("alloc"),
            top_heap: find("top-heap"),
            counters: find("counters"),
        })
    }
}

/// Read one profiling CSV (one compilation unit) in file order.
pub fn parse_profile_file(path: &Path) -> Result<Vec<ProfileRow>> {
    let file =
        File::open(path).with_context(|| format!("read profile file {}", path.display()))?;
    parse_profile(file).with_context(|| format!("profile parse error in {}", path.display()))
}

/// Read profiling rows from any CSV source with a header row.
///
/// Short rows yield `None` for the missing cells. A file without a
/// `pass name` column (including an empty file) yields no rows.
pub fn parse_profile<R: Read>(input: R) -> Result<Vec<ProfileRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let Some(cols) = Columns::resolve(&headers) else {
        // Empty or foreign files count as a unit with nothing to report.
        tracing::warn!(header = ?headers, "profile.no_pass_name_column");
        return Ok(Vec::new());
    };

    let cell = |record: &csv::StringRecord, idx: Option<usize>| {
        idx.and_then(|i| record.get(i)).map(str::to_string)
    };

    let mut out = Vec::new();
    for (lineno, record) in reader.records().enumerate() {
        // Header is line 1.
        let record = record.with_context(|| format!("bad csv record at line {}", lineno + 2))?;
        let Some(pass_name) = record.get(cols.pass_name) else {
            tracing::debug!(line = lineno + 2, "profile.row_without_pass_name");
            continue;
        };
        out.push(ProfileRow {
            pass_name: pass_name.to_string(),
            time: cell(&record, cols.time),
            alloc: cell(&record, cols.alloc),
            top_heap: cell(&record, cols.top_heap),
            counters: cell(&record, cols.counters),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_resolved_by_name() {
        let text = "\
time,pass name,counters,alloc
1.000s,file=a.ml//parsing,[spill = 2],1MB
";
        let rows = parse_profile(text.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![ProfileRow {
                pass_name: "file=a.ml//parsing".into(),
                time: Some("1.000s".into()),
                alloc: Some("1MB".into()),
                top_heap: None,
                counters: Some("[spill = 2]".into()),
            }]
        );
    }

    #[test]
    fn missing_optional_columns_are_absent() {
        let text = "pass name\nfile=a.ml/\n";
        let rows = parse_profile(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, None);
        assert_eq!(rows[0].alloc, None);
        assert_eq!(rows[0].counters, None);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let text = "pass name,time,alloc\nfile=a.ml//typing,0.5s\n";
        let rows = parse_profile(text.as_bytes()).unwrap();
        assert_eq!(rows[0].time.as_deref(), Some("0.5s"));
        assert_eq!(rows[0].alloc, None);
    }

    #[test]
    fn file_without_pass_name_column_has_no_rows() {
        let text = "time,alloc\n1.0s,1MB\n";
        assert_eq!(parse_profile(text.as_bytes()).unwrap(), vec![]);
    }

    #[test]
    fn empty_file_has_no_rows() {
        assert_eq!(parse_profile(&b""[..]).unwrap(), vec![]);
    }
}
