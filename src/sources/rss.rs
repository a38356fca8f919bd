//! RSS adapter: fetches each configured feed through the relay endpoint
//! and normalizes a bounded number of items per feed.

use anyhow::{anyhow, Result};
use feed_rs::parser;
use futures::future::join_all;
use tracing::{debug, info, warn};

use super::client::{fetch_relayed_body, http_client};
use super::parser::{normalize_rss_entry, FeedContext};
use super::types::{FeedSpec, FetchReport};
use super::util::{cleanup_xml, is_valid_url};
use crate::article::Article;
use crate::config::Config;
use crate::TARGET_WEB_REQUEST;

/// Fetches every configured feed. Per-feed failures are absorbed and
/// counted; this function itself cannot fail.
pub async fn fetch_rss_news(config: &Config) -> FetchReport {
    let client = match http_client() {
        Ok(client) => client,
        Err(err) => {
            warn!(target: TARGET_WEB_REQUEST, "Failed to build RSS client: {}", err);
            return FetchReport {
                articles: Vec::new(),
                attempted: config.feeds.len(),
                failed: config.feeds.len(),
            };
        }
    };

    let futures = config.feeds.iter().map(|feed| {
        let client = client.clone();
        async move {
            match fetch_feed(&client, config, feed).await {
                Ok(articles) => {
                    debug!(
                        target: TARGET_WEB_REQUEST,
                        "Feed {}: {} articles", feed.url, articles.len()
                    );
                    Ok(articles)
                }
                Err(err) => {
                    warn!(target: TARGET_WEB_REQUEST, "Feed {} failed: {}", feed.url, err);
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
        "RSS source: {} articles from {} feeds ({} failed)",
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

/// Fetches and parses one feed, returning its first N items normalized.
async fn fetch_feed(
    client: &reqwest::Client,
    config: &Config,
    feed: &FeedSpec,
) -> Result<Vec<Article>> {
    if !is_valid_url(&feed.url) {
        return Err(anyhow!("invalid feed URL"));
    }

    let body = fetch_relayed_body(client, &config.relay_url, &feed.url).await?;
    let parsed = parse_feed_body(&body, &feed.url)?;

    let channel_title = parsed.title.as_ref().map(|t| t.content.clone());
    let ctx = FeedContext {
        feed_url: &feed.url,
        channel_title: channel_title.as_deref(),
    };

    Ok(parsed
        .entries
        .iter()
        .take(config.feed_item_limit)
        .map(|entry| normalize_rss_entry(entry, ctx, &feed.topic))
        .collect())
}

/// Parses a feed body, retrying once on cleaned-up XML when the strict
/// parse fails. Feeds in the wild ship BOMs, stray bytes and bare
/// entities often enough that the retry earns its keep.
fn parse_feed_body(body: &str, feed_url: &str) -> Result<feed_rs::model::Feed> {
    match parser::parse(body.as_bytes()) {
        Ok(feed) => Ok(feed),
        Err(first_err) => {
            let cleaned = cleanup_xml(body);
            if cleaned.contains("<rss") || cleaned.contains("<feed") {
                match parser::parse(cleaned.as_bytes()) {
                    Ok(feed) => {
                        debug!(
                            target: TARGET_WEB_REQUEST,
                            "Feed {} parsed after XML cleanup", feed_url
                        );
                        Ok(feed)
                    }
                    Err(second_err) => Err(anyhow!(
                        "parse failed even after cleanup: {} (then {})",
                        first_err,
                        second_err
                    )),
                }
            } else {
                Err(anyhow!("body is not RSS or Atom: {}", first_err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feed_body_accepts_clean_rss() {
        let xml = r#"<?xml version="1.0"?>
            <rss version="2.0"><channel><title>T</title>
              <item><title>One</title></item>
              <item><title>Two</title></item>
            </channel></rss>"#;
        let feed = parse_feed_body(xml, "test").unwrap();
        assert_eq!(feed.entries.len(), 2);
    }

    #[test]
    fn parse_feed_body_recovers_from_leading_garbage() {
        let xml = "\u{FEFF}noise before the document<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>T</title><item><title>One</title></item></channel></rss>";
        let feed = parse_feed_body(xml, "test").unwrap();
        assert_eq!(feed.entries.len(), 1);
    }

    #[test]
    fn parse_feed_body_rejects_non_feed_content() {
        assert!(parse_feed_body("<html><body>404</body></html>", "test").is_err());
        assert!(parse_feed_body("plain text error page", "test").is_err());
    }
}
