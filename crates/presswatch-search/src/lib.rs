//! Search stage of the presswatch pipeline.
//!
//! Plans the five company queries, fetches each from Serper, flattens the
//! results into the `ITEM_` record text the report prompt consumes, and
//! removes records whose URL already appeared in an earlier news block.

pub mod client;
pub mod dedup;
pub mod error;
pub mod investigate;
pub mod query;
pub mod record;
pub mod types;

pub use client::{SearchOptions, SerperClient};
pub use dedup::{dedupe, SeenUrls};
pub use error::SearchError;
pub use investigate::{investigate, Investigation, SearchProvider};
pub use query::{NewsSlot, QueryPlan};
pub use record::{extract_url, format_block, ResultItem};
pub use types::{RawResult, SearchResponse};
