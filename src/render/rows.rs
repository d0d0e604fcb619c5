use crate::model::Metrics;
use crate::schema::{COUNTERS, Metadata, MetricKind, MetricRow, PassKey};

#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    /// Also emit `top_heap_in_bytes` rows.
    pub top_heap: bool,
}

/// Flatten combined metrics into rows.
///
/// Order: time per key pass, alloc per key pass, (top heap per key pass),
/// then one row per configured counter by name. Pass order is the allow-list
/// order, independent of what the build actually reported.
pub fn profile_rows(metrics: &Metrics, meta: &Metadata, opts: EmitOptions) -> Vec<MetricRow> {
    let mut rows = Vec::new();

    for key in PassKey::ALL {
        let secs = metrics.pass(key).time_secs;
        rows.push(MetricRow::new(
            meta,
            MetricKind::TimeInSeconds,
            key.as_str(),
            format!("{:.3}", secs),
        ));
    }
    for key in PassKey::ALL {
        rows.push(MetricRow::new(
            meta,
            MetricKind::AllocInBytes,
            key.as_str(),
            metrics.pass(key).alloc_bytes.to_string(),
        ));
    }
    if opts.top_heap {
        for key in PassKey::ALL {
            rows.push(MetricRow::new(
                meta,
                MetricKind::TopHeapInBytes,
                key.as_str(),
                metrics.pass(key).top_heap_bytes.to_string(),
            ));
        }
    }
    for spec in COUNTERS {
        rows.push(MetricRow::new(
            meta,
            MetricKind::Counter,
            spec.name,
            metrics.counter(spec.name).to_string(),
        ));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta() -> Metadata {
        Metadata {
            timestamp: "2025-11-18T09:34:49Z".into(),
            commit_hash: "d72de38c".into(),
            pr_number: "5004".into(),
        }
    }

    fn names_of(rows: &[MetricRow], kind: MetricKind) -> Vec<String> {
        rows.iter()
            .filter(|r| r.kind == kind.as_str())
            .map(|r| r.name.clone())
            .collect()
    }

    #[test]
    fn zero_metrics_still_emit_every_row() {
        let rows = profile_rows(&Metrics::zeroed(), &meta(), EmitOptions::default());
        assert_eq!(rows.len(), 2 * PassKey::ALL.len() + COUNTERS.len());
        assert_eq!(
            names_of(&rows, MetricKind::TimeInSeconds),
            vec![
                "<all>",
                "parsing",
                "typing",
                "generate/flambda2",
                "generate/compile_phrases/cfg",
                "generate/assemble",
            ]
        );
        assert_eq!(
            names_of(&rows, MetricKind::Counter),
            vec!["block", "instruction", "move", "reload", "spill"]
        );
        assert_eq!(rows[0].value, "0.000");
        assert!(names_of(&rows, MetricKind::TopHeapInBytes).is_empty());
    }

    #[test]
    fn sections_come_in_fixed_order() {
        let rows = profile_rows(&Metrics::zeroed(), &meta(), EmitOptions { top_heap: true });
        let kinds: Vec<&str> = rows.iter().map(|r| r.kind.as_str()).collect();
        let n = PassKey::ALL.len();
        assert!(kinds[..n].iter().all(|k| *k == "time_in_seconds"));
        assert!(kinds[n..2 * n].iter().all(|k| *k == "alloc_in_bytes"));
        assert!(kinds[2 * n..3 * n].iter().all(|k| *k == "top_heap_in_bytes"));
        assert!(kinds[3 * n..].iter().all(|k| *k == "counter"));
    }

    #[test]
    fn time_is_rounded_to_milliseconds() {
        let mut m = Metrics::zeroed();
        m.passes.get_mut(&PassKey::Typing).unwrap().time_secs = 0.1 + 0.2;
        let rows = profile_rows(&m, &meta(), EmitOptions::default());
        let typing = rows
            .iter()
            .find(|r| r.kind == "time_in_seconds" && r.name == "typing")
            .unwrap();
        assert_eq!(typing.value, "0.300");
        assert_eq!(typing.commit_hash, "d72de38c");
    }
}
