//! The investigation stage: five searches, four of them deduplicated.

use crate::client::SerperClient;
use crate::dedup::{dedupe, SeenUrls};
use crate::error::SearchError;
use crate::query::{NewsSlot, QueryPlan};

/// Block text used when a query returns nothing usable.
pub const NO_RESULTS_SENTINEL: &str = "Google no encontró noticias recientes.";

/// Source of record blocks, one per query.
#[allow(async_fn_in_trait)]
pub trait SearchProvider {
    /// Fetch the record block for `query` over the last `window_days` days.
    async fn fetch_block(&self, query: &str, window_days: u32) -> Result<String, SearchError>;
}

impl SearchProvider for SerperClient {
    async fn fetch_block(&self, query: &str, window_days: u32) -> Result<String, SearchError> {
        self.search_block(query, window_days).await
    }
}

/// Output of the investigation stage, ready for the report prompt.
#[derive(Debug, Clone)]
pub struct Investigation {
    /// The four deduplicated news blocks under their section banners.
    pub news_text: String,
    /// The social block, not deduplicated.
    pub social_text: String,
    /// URLs accepted across the news blocks.
    pub seen: SeenUrls,
}

impl Investigation {
    /// Number of unique news sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.seen.len()
    }
}

/// Run every query of `plan` in order and assemble the prompt input.
///
/// Provider failures never abort the run: a failed or empty query is
/// replaced by a sentinel line and the remaining queries still execute.
pub async fn investigate<P: SearchProvider>(
    provider: &P,
    plan: &QueryPlan,
    window_days: u32,
) -> Investigation {
    let mut seen = SeenUrls::new();
    let mut sections = Vec::with_capacity(NewsSlot::ALL.len());

    for slot in NewsSlot::ALL {
        let query = plan.news_query(slot);
        tracing::info!(slot = %slot, query, "searching news");
        let raw = fetch_or_sentinel(provider, query, window_days).await;
        let before = seen.len();
        let cleaned = dedupe(&raw, &mut seen);
        tracing::info!(
            slot = %slot,
            new_urls = seen.len() - before,
            total_urls = seen.len(),
            "news block deduplicated"
        );
        sections.push(format!("{}\n{cleaned}", slot.banner()));
    }

    tracing::info!(query = %plan.social, "searching social");
    let social_text = fetch_or_sentinel(provider, &plan.social, window_days).await;

    Investigation {
        news_text: sections.join("\n\n"),
        social_text,
        seen,
    }
}

async fn fetch_or_sentinel<P: SearchProvider>(
    provider: &P,
    query: &str,
    window_days: u32,
) -> String {
    match provider.fetch_block(query, window_days).await {
        Ok(block) => block,
        Err(SearchError::NoResults { .. }) => NO_RESULTS_SENTINEL.to_string(),
        Err(e) => {
            tracing::warn!(query, error = %e, "search failed; substituting sentinel");
            format!("Error Serper: {e}")
        }
    }
}

#[cfg(test)]
#[path = "investigate_test.rs"]
mod tests;
