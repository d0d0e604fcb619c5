//! Parsers for the human-readable cells of a profiling row.
//!
//! None of these fail hard: a cell that does not parse is simply absent.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)s$").expect("duration regex"));

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s*(B|[kK]B|MB|GB)?$").expect("size regex")
});

/// Parse `"1.234s"` into seconds.
pub fn parse_duration(s: &str) -> Option<f64> {
    let caps = DURATION_RE.captures(s.trim())?;
    caps.get(1)?.as_str().parse().ok()
}

/// Parse `"12kB"`, `"3.5MB"`, `"500"` into bytes (1024-based units).
///
/// Fractional bytes left over from the scaling are truncated.
pub fn parse_size(s: &str) -> Option<u64> {
    let caps = SIZE_RE.captures(s.trim())?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let scale: u64 = match caps.get(2).map(|m| m.as_str()) {
        None | Some("B") => 1,
        Some("kB") | Some("KB") => 1 << 10,
        Some("MB") => 1 << 20,
        Some("GB") => 1 << 30,
        Some(_) => return None,
    };
    Some((value * scale as f64) as u64)
}

/// Parse `"[reload = 10; spill = 5]"` into a name -> value map.
///
/// Pairs without `=` or with a non-integer value are skipped. A name seen
/// twice keeps its last value.
pub fn parse_counters(s: &str) -> BTreeMap<String, u64> {
    let body = s
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();

    let mut out = BTreeMap::new();
    if body.is_empty() {
        return out;
    }
    for pair in body.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        match value.trim().parse::<u64>() {
            Ok(v) => {
                out.insert(name.to_string(), v);
            }
            Err(_) => {
                tracing::trace!(pair = %pair.trim(), "counter.skipped");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duration_takes_leading_number() {
        assert_eq!(parse_duration("1.000s"), Some(1.0));
        assert_eq!(parse_duration("0.125s"), Some(0.125));
        assert_eq!(parse_duration("42s"), Some(42.0));
        assert_eq!(parse_duration(" 2.5s "), Some(2.5));
    }

    #[test]
    fn duration_absent_on_bad_input() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("1.0"), None);
        assert_eq!(parse_duration("1.0ms"), None);
        assert_eq!(parse_duration("fast"), None);
    }

    #[test]
    fn size_uses_binary_units() {
        assert_eq!(parse_size("1024B"), Some(1024));
        assert_eq!(parse_size("1kB"), Some(1024));
        assert_eq!(parse_size("1MB"), Some(1_048_576));
        assert_eq!(parse_size("1GB"), Some(1_073_741_824));
        assert_eq!(parse_size("500"), Some(500));
    }

    #[test]
    fn size_truncates_fractional_bytes() {
        assert_eq!(parse_size("1.5kB"), Some(1536));
        assert_eq!(parse_size("0.001kB"), Some(1));
        assert_eq!(parse_size("12.34 MB"), Some(12_939_427));
    }

    #[test]
    fn size_absent_on_bad_input() {
        assert_eq!(parse_size(""), None);
        assert_eq!(parse_size("lots"), None);
        assert_eq!(parse_size("12TB"), None);
    }

    #[test]
    fn counters_parse_pairs() {
        let got = parse_counters("[reload = 10; spill = 5]");
        let want: BTreeMap<String, u64> =
            [("reload".to_string(), 10), ("spill".to_string(), 5)].into();
        assert_eq!(got, want);
    }

    #[test]
    fn counters_skip_malformed_pairs() {
        assert!(parse_counters("[foo]").is_empty());
        assert!(parse_counters("[]").is_empty());
        assert!(parse_counters("  [ ]  ").is_empty());
        assert!(parse_counters("").is_empty());

        let got = parse_counters("[foo; move = 3; bar = x]");
        assert_eq!(got.get("move"), Some(&3));
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn counters_keep_last_duplicate() {
        let got = parse_counters("[spill = 1; spill = 7]");
        assert_eq!(got.get("spill"), Some(&7));
    }
}
