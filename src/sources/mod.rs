//! Source adapters and per-item normalization.
//!
//! Two adapters feed the aggregator: the news API (JSON headlines per
//! topic) and the relayed RSS feeds. Both absorb their own failures and
//! report explicitly instead of raising.

mod api;
mod client;
mod images;
mod parser;
mod rss;
mod types;
mod util;

pub use self::api::fetch_api_news;
pub use self::images::{topic_placeholder, validate_defaults};
pub use self::parser::{normalize_api_article, normalize_rss_entry, FeedContext};
pub use self::rss::fetch_rss_news;
pub use self::types::{ApiArticle, ApiSource, FeedSpec, FetchReport, HeadlinesResponse};
pub use self::util::{is_valid_url, normalize_source_name, parse_date, strip_html};
