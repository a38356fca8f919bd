//! Type definitions shared by the source adapters.

use serde::Deserialize;
use tokio::time::Duration;

use crate::article::Article;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One configured RSS feed: where to fetch it and which topic its items
/// belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSpec {
    pub url: String,
    pub topic: String,
}

/// Explicit outcome of one adapter invocation. Replaces hidden
/// circuit-breaker state: the aggregator decides about degradation from
/// these numbers, not from a module-level flag.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub articles: Vec<Article>,
    /// Requests issued (one per topic or per feed).
    pub attempted: usize,
    /// Requests that produced no articles because of a transport or parse
    /// failure.
    pub failed: usize,
}

impl FetchReport {
    pub fn failed_entirely(&self) -> bool {
        self.attempted > 0 && self.failed == self.attempted
    }
}

/// Headlines endpoint response body.
#[derive(Debug, Deserialize)]
pub struct HeadlinesResponse {
    pub status: String,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<ApiArticle>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One article as the news API reports it. Everything beyond the title is
/// optional in practice, whatever the documentation promises.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiArticle {
    #[serde(default)]
    pub source: ApiSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "urlToImage", default)]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_article_tolerates_missing_fields() {
        let json = r#"{"source": {"id": null, "name": "Reuters"}, "title": "Headline"}"#;
        let article: ApiArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.title.as_deref(), Some("Headline"));
        assert_eq!(article.source.name.as_deref(), Some("Reuters"));
        assert!(article.description.is_none());
        assert!(article.url_to_image.is_none());
    }

    #[test]
    fn headlines_response_defaults_articles_to_empty() {
        let json = r#"{"status": "error", "code": "apiKeyInvalid", "message": "bad key"}"#;
        let body: HeadlinesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.status, "error");
        assert!(body.articles.is_empty());
        assert_eq!(body.code.as_deref(), Some("apiKeyInvalid"));
    }

    #[test]
    fn report_failure_accounting() {
        let report = FetchReport {
            articles: Vec::new(),
            attempted: 3,
            failed: 3,
        };
        assert!(report.failed_entirely());

        let partial = FetchReport {
            articles: Vec::new(),
            attempted: 3,
            failed: 2,
        };
        assert!(!partial.failed_entirely());
        assert!(!FetchReport::default().failed_entirely());
    }
}
