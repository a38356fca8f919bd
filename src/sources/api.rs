//! News API adapter: one headlines request per topic, plus one
//! region-specific request, all issued concurrently.

use anyhow::{bail, Result};
use futures::future::join_all;
use tracing::{debug, info, warn};

use super::client::http_client;
use super::parser::normalize_api_article;
use super::types::{FetchReport, HeadlinesResponse};
use crate::article::Article;
use crate::config::Config;
use crate::TARGET_WEB_REQUEST;

/// Region special case: one extra request for India's headlines, filed
/// under its own topic.
const REGION_COUNTRY: &str = "in";
const REGION_TOPIC: &str = "india";
const DEFAULT_COUNTRY: &str = "us";

/// Fetches every configured topic. Per-topic failures are absorbed and
/// counted; this function itself cannot fail.
pub async fn fetch_api_news(config: &Config) -> FetchReport {
    if config.api_key.trim().is_empty() {
        warn!(target: TARGET_WEB_REQUEST, "No API key configured, skipping API source");
        return FetchReport::default();
    }

    let client = match http_client() {
        Ok(client) => client,
        Err(err) => {
            warn!(target: TARGET_WEB_REQUEST, "Failed to build API client: {}", err);
            return FetchReport {
                articles: Vec::new(),
                attempted: config.topics.len() + 1,
                failed: config.topics.len() + 1,
            };
        }
    };

    let mut requests: Vec<(String, Option<String>, &str)> = config
        .topics
        .iter()
        .map(|topic| (topic.clone(), Some(topic.clone()), DEFAULT_COUNTRY))
        .collect();
    requests.push((REGION_TOPIC.to_string(), None, REGION_COUNTRY));

    let futures = requests.into_iter().map(|(topic, category, country)| {
        let client = client.clone();
        async move {
            match fetch_topic(&client, config, country, category.as_deref(), &topic).await {
                Ok(articles) => {
                    debug!(
                        target: TARGET_WEB_REQUEST,
                        "API topic {}: {} articles", topic, articles.len()
                    );
                    Ok(articles)
                }
                Err(err) => {
                    // Zero articles for this topic, never a batch failure.
                    warn!(target: TARGET_WEB_REQUEST, "API topic {} failed: {}", topic, err);
                    Err(err)
                }
            }
        }
    });

    let outcomes = join_all(futures).await;
    let attempted = outcomes.len();
    let mut articles = Vec::new();
    let mut failed = 0usize;
    for outcome in outcomes {
        match outcome {
            Ok(mut batch) => articles.append(&mut batch),
            Err(_) => failed += 1,
        }
    }

    info!(
        target: TARGET_WEB_REQUEST,
        "API source: {} articles from {} requests ({} failed)",
        articles.len(),
        attempted,
        failed
    );

    FetchReport {
        articles,
        attempted,
        failed,
    }
}

/// One headlines request. A non-success status, an error body or a
/// transport failure all surface as `Err` for the caller to count.
async fn fetch_topic(
    client: &reqwest::Client,
    config: &Config,
    country: &str,
    category: Option<&str>,
    topic: &str,
) -> Result<Vec<Article>> {
    let mut query: Vec<(&str, String)> = vec![
        ("country", country.to_string()),
        ("pageSize", config.feed_item_limit.to_string()),
        ("apiKey", config.api_key.clone()),
    ];
    if let Some(category) = category {
        query.push(("category", category.to_string()));
    }

    let url = format!("{}/top-headlines", config.api_url.trim_end_matches('/'));
    let response = client.get(&url).query(&query).send().await?;

    let status = response.status();
    if !status.is_success() {
        bail!("status {}", status);
    }

    let body: HeadlinesResponse = response.json().await?;
    if body.status != "ok" {
        bail!(
            "API error {}: {}",
            body.code.unwrap_or_else(|| "unknown".to_string()),
            body.message.unwrap_or_else(|| "no message".to_string())
        );
    }

    Ok(body
        .articles
        .into_iter()
        .map(|raw| normalize_api_article(raw, topic))
        .collect())
}
