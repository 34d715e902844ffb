use serde::{Deserialize, Serialize};

/// Body of a Serper `/search` request.
#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub(crate) q: &'a str,
    pub(crate) gl: &'a str,
    pub(crate) hl: &'a str,
    pub(crate) num: u32,
    /// Google time filter, `qdr:d<days>`.
    pub(crate) tbs: String,
}

/// The parts of a Serper response the pipeline reads.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub news: Vec<RawResult>,
    #[serde(default)]
    pub organic: Vec<RawResult>,
}

impl SearchResponse {
    /// News results first, then organic web results.
    #[must_use]
    pub fn into_results(self) -> Vec<RawResult> {
        let mut results = self.news;
        results.extend(self.organic);
        results
    }
}

/// One provider result before flattening into a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawResult {
    pub link: Option<String>,
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub date: Option<String>,
    pub source: Option<String>,
}
