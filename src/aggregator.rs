//! Fan-out across the source adapters, merge, dedupe, fallback.
//!
//! The entry point is total: whatever the adapters do, the caller gets a
//! non-empty, well-formed batch. Degradation to sample data is carried on
//! the batch itself rather than in shared mutable state, so concurrent and
//! repeated invocations cannot observe each other.

use serde::Serialize;
use tokio::join;
use tracing::{info, warn};

use crate::article::Article;
use crate::config::Config;
use crate::dedup::dedupe;
use crate::fallback::sample_batch;
use crate::sources::{fetch_api_news, fetch_rss_news, FetchReport};
use crate::TARGET_AGGREGATE;

/// Where a batch came from. `Sample` is the consumer-visible advisory
/// that live sources produced nothing this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOrigin {
    Live,
    Sample,
}

/// One aggregation cycle's output.
#[derive(Debug, Clone, Serialize)]
pub struct NewsBatch {
    pub origin: BatchOrigin,
    pub articles: Vec<Article>,
}

impl NewsBatch {
    pub fn is_live(&self) -> bool {
        self.origin == BatchOrigin::Live
    }
}

/// Runs one full aggregation cycle. Never fails; stateless apart from the
/// configuration it is handed, so it can be re-invoked freely.
pub async fn fetch_all_news(config: &Config) -> NewsBatch {
    let (api, rss) = join!(fetch_api_news(config), fetch_rss_news(config));

    info!(
        target: TARGET_AGGREGATE,
        "Cycle fetched {} API + {} RSS articles ({}/{} API and {}/{} RSS requests failed)",
        api.articles.len(),
        rss.articles.len(),
        api.failed,
        api.attempted,
        rss.failed,
        rss.attempted
    );

    assemble(api, rss)
}

/// Merge, dedupe, sort and, when everything came back empty, substitute
/// the sample batch. Split from the fetch so the policy is testable
/// without a network.
fn assemble(api: FetchReport, rss: FetchReport) -> NewsBatch {
    let mut merged = api.articles;
    merged.extend(rss.articles);

    let before = merged.len();
    let mut articles = dedupe(merged);
    if before > articles.len() {
        info!(
            target: TARGET_AGGREGATE,
            "Deduplication dropped {} near-duplicate articles", before - articles.len()
        );
    }

    if articles.is_empty() {
        warn!(
            target: TARGET_AGGREGATE,
            "All sources empty, substituting sample data"
        );
        return NewsBatch {
            origin: BatchOrigin::Sample,
            articles: sample_batch(),
        };
    }

    // Recency-first: consumers render newest at the top.
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    NewsBatch {
        origin: BatchOrigin::Live,
        articles,
    }
}
