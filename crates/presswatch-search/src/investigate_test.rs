use std::cell::RefCell;
use std::collections::HashMap;

use presswatch_core::{CompanyProfile, ReportTheme, TrackedBrand};

use super::*;
use crate::record::format_block;
use crate::types::RawResult;

enum Canned {
    Block(String),
    Empty,
    Fail,
}

/// Serves canned blocks by query and records the call order.
struct FakeProvider {
    responses: HashMap<String, Canned>,
    calls: RefCell<Vec<String>>,
}

impl FakeProvider {
    fn new(responses: Vec<(String, Canned)>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl SearchProvider for FakeProvider {
    async fn fetch_block(&self, query: &str, window_days: u32) -> Result<String, SearchError> {
        assert_eq!(window_days, 2);
        self.calls.borrow_mut().push(query.to_string());
        match self.responses.get(query) {
            Some(Canned::Block(b)) => Ok(b.clone()),
            Some(Canned::Empty) | None => Err(SearchError::NoResults {
                query: query.to_string(),
            }),
            Some(Canned::Fail) => Err(SearchError::UnexpectedStatus {
                status: 500,
                url: "http://serper.test/search".to_string(),
            }),
        }
    }
}

fn profile() -> CompanyProfile {
    CompanyProfile {
        name: "Adecoagro".to_string(),
        country: "Argentina".to_string(),
        international_keywords: "stock".to_string(),
        subsidiaries: vec!["Pilagá S.A.".to_string()],
        subsidiary_query_limit: 4,
        sector_terms: vec!["Sancor crisis".to_string()],
        tracked_brands: vec![TrackedBrand {
            label: "Adecoagro".to_string(),
            color: "#1976D2".to_string(),
        }],
        theme: ReportTheme::default(),
    }
}

fn block(urls: &[&str]) -> String {
    let results: Vec<RawResult> = urls
        .iter()
        .map(|u| RawResult {
            link: Some((*u).to_string()),
            title: Some(format!("nota {u}")),
            ..RawResult::default()
        })
        .collect();
    format_block(&results, 30)
}

#[tokio::test]
async fn repeated_urls_across_news_blocks_are_removed() {
    let plan = QueryPlan::from_profile(&profile());
    let provider = FakeProvider::new(vec![
        (
            plan.international.clone(),
            Canned::Block(block(&["https://1.test", "https://2.test"])),
        ),
        // one repeat from block 1, two new
        (
            plan.national_brand.clone(),
            Canned::Block(block(&["https://2.test", "https://3.test", "https://4.test"])),
        ),
        // one repeat from block 2
        (
            plan.national_subsidiaries.clone(),
            Canned::Block(block(&["https://4.test", "https://5.test"])),
        ),
        (plan.sector.clone(), Canned::Block(block(&["https://6.test"]))),
        (plan.social.clone(), Canned::Block(block(&["https://1.test"]))),
    ]);

    let result = investigate(&provider, &plan, 2).await;

    assert_eq!(result.source_count(), 6);
    let url_lines: Vec<&str> = result
        .news_text
        .lines()
        .filter(|l| l.starts_with("URL_REAL:"))
        .collect();
    assert_eq!(url_lines.len(), 6);
    let unique: std::collections::HashSet<&str> = url_lines.iter().copied().collect();
    assert_eq!(unique.len(), url_lines.len(), "duplicate URL_REAL line in news text");
}

#[tokio::test]
async fn social_block_bypasses_dedup() {
    let plan = QueryPlan::from_profile(&profile());
    let provider = FakeProvider::new(vec![
        (plan.international.clone(), Canned::Block(block(&["https://1.test"]))),
        (plan.social.clone(), Canned::Block(block(&["https://1.test"]))),
    ]);

    let result = investigate(&provider, &plan, 2).await;

    assert!(result.social_text.contains("URL_REAL: https://1.test"));
    assert_eq!(result.source_count(), 1);
}

#[tokio::test]
async fn queries_run_in_fixed_order() {
    let plan = QueryPlan::from_profile(&profile());
    let provider = FakeProvider::new(vec![]);

    investigate(&provider, &plan, 2).await;

    assert_eq!(
        *provider.calls.borrow(),
        vec![
            plan.international.clone(),
            plan.national_brand.clone(),
            plan.national_subsidiaries.clone(),
            plan.sector.clone(),
            plan.social.clone(),
        ]
    );
}

#[tokio::test]
async fn failures_become_sentinels_and_run_continues() {
    let plan = QueryPlan::from_profile(&profile());
    let provider = FakeProvider::new(vec![
        (plan.international.clone(), Canned::Fail),
        (plan.national_brand.clone(), Canned::Empty),
        (plan.sector.clone(), Canned::Block(block(&["https://9.test"]))),
        (plan.social.clone(), Canned::Fail),
    ]);

    let result = investigate(&provider, &plan, 2).await;

    assert!(result.news_text.contains(
        "=== BLOQUE INTERNACIONAL ===\nError Serper: unexpected HTTP status 500"
    ));
    assert!(result
        .news_text
        .contains(&format!("=== BLOQUE NACIONAL (MARCA) ===\n{NO_RESULTS_SENTINEL}")));
    assert!(result.news_text.contains("URL_REAL: https://9.test"));
    assert!(result.social_text.starts_with("Error Serper:"));
    assert_eq!(result.source_count(), 1);
}

#[tokio::test]
async fn news_text_keeps_sections_in_order() {
    let plan = QueryPlan::from_profile(&profile());
    let provider = FakeProvider::new(vec![]);

    let result = investigate(&provider, &plan, 2).await;

    let positions: Vec<usize> = NewsSlot::ALL
        .iter()
        .map(|s| result.news_text.find(s.banner()).expect("banner present"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(result.news_text.starts_with("=== BLOQUE INTERNACIONAL ===\n"));
}

#[tokio::test]
async fn each_run_starts_with_an_empty_seen_set() {
    let plan = QueryPlan::from_profile(&profile());
    let provider = FakeProvider::new(vec![(
        plan.international.clone(),
        Canned::Block(block(&["https://1.test"])),
    )]);

    let first = investigate(&provider, &plan, 2).await;
    let second = investigate(&provider, &plan, 2).await;

    assert_eq!(first.source_count(), 1);
    assert_eq!(second.source_count(), 1);
    assert_eq!(first.news_text, second.news_text);
}
