/// One row of a per-unit profiling CSV, cells still in their raw text form.
///
/// Optional columns that are missing from the file are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRow {
    pub pass_name: String,
    pub time: Option<String>,
    pub alloc: Option<String>,
    pub top_heap: Option<String>,
    pub counters: Option<String>,
}
