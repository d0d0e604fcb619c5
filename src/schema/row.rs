use serde::Serialize;

/// Header of every metrics CSV we read or write.
pub const HEADER: [&str; 6] = [
    "timestamp",
    "commit_hash",
    "pr_number",
    "kind",
    "name",
    "value",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    TimeInSeconds,
    AllocInBytes,
    TopHeapInBytes,
    Counter,
}

/// Build metadata shared by every row of one conversion. Treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub timestamp: String,
    pub commit_hash: String,
    pub pr_number: String,
}

/// One output row. `kind` stays a string so artifact rows can carry whatever
/// kind the raw input declared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub timestamp: String,
    pub commit_hash: String,
    pub pr_number: String,
    pub kind: String,
    pub name: String,
    pub value: String,
}

impl MetricRow {
    pub fn new(meta: &Metadata, kind: impl Into<String>, name: &str, value: String) -> Self {
        Self {
            timestamp: meta.timestamp.clone(),
            commit_hash: meta.commit_hash.clone(),
            pr_number: meta.pr_number.clone(),
            kind: kind.into(),
            name: name.to_string(),
            value,
        }
    }
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::TimeInSeconds => "time_in_seconds",
            MetricKind::AllocInBytes => "alloc_in_bytes",
            MetricKind::TopHeapInBytes => "top_heap_in_bytes",
            MetricKind::Counter => "counter",
        }
    }
}

impl From<MetricKind> for String {
    fn from(kind: MetricKind) -> String {
        kind.as_str().to_string()
    }
}
