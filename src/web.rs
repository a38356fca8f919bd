//! HTTP surface for the presentation layer.
//!
//! Holds the latest batch behind a read-write lock, refreshed on a fixed
//! interval and on demand. Refreshes are single-flight: a cycle already
//! in progress makes a second trigger a no-op instead of a racing fetch.

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use crate::aggregator::{fetch_all_news, BatchOrigin, NewsBatch};
use crate::article::{Article, Sentiment};
use crate::config::Config;
use crate::summary::{summarize, TopicSentimentSummary};
use crate::TARGET_AGGREGATE;

struct AppState {
    config: Config,
    batch: RwLock<NewsBatch>,
    refresh_gate: Mutex<()>,
}

#[derive(Debug, Default, Deserialize)]
struct ArticlesQuery {
    topic: Option<String>,
    sentiment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryQuery {
    topic: Option<String>,
}

#[derive(Serialize)]
struct ArticlesResponse {
    origin: BatchOrigin,
    count: usize,
    articles: Vec<Article>,
}

/// Runs the API server plus the scheduled refresh loop until the process
/// exits.
pub async fn serve(config: Config) -> Result<()> {
    let initial = fetch_all_news(&config).await;
    info!(
        target: TARGET_AGGREGATE,
        "Initial cycle loaded {} articles ({:?})",
        initial.articles.len(),
        initial.origin
    );

    let port = config.port;
    let refresh_interval = config.refresh_interval;
    let state = Arc::new(AppState {
        config,
        batch: RwLock::new(initial),
        refresh_gate: Mutex::new(()),
    });

    let ticker_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        // The first tick fires immediately and the initial fetch already
        // ran, so consume it.
        interval.tick().await;
        loop {
            interval.tick().await;
            refresh(&ticker_state).await;
        }
    });

    let app = Router::new()
        .route("/articles", get(list_articles))
        .route("/summary", get(topic_summary))
        .route("/refresh", post(trigger_refresh))
        .route("/status", get(status_check))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Runs one refresh cycle unless one is already in flight. Returns whether
/// this call did the work.
async fn refresh(state: &AppState) -> bool {
    let Ok(_guard) = state.refresh_gate.try_lock() else {
        info!(target: TARGET_AGGREGATE, "Refresh already in flight, skipping");
        return false;
    };

    let batch = fetch_all_news(&state.config).await;
    if !batch.is_live() {
        error!(target: TARGET_AGGREGATE, "Refresh produced sample data only");
    }
    *state.batch.write().await = batch;
    true
}

async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<ArticlesResponse>, StatusCode> {
    let sentiment = match query.sentiment.as_deref() {
        Some(label) => Some(Sentiment::from_label(label).ok_or(StatusCode::BAD_REQUEST)?),
        None => None,
    };

    let batch = state.batch.read().await;
    let articles = filter_articles(&batch.articles, query.topic.as_deref(), sentiment);

    Ok(Json(ArticlesResponse {
        origin: batch.origin,
        count: articles.len(),
        articles,
    }))
}

async fn topic_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SummaryQuery>,
) -> Json<TopicSentimentSummary> {
    let batch = state.batch.read().await;
    Json(summarize(&batch.articles, query.topic.as_deref()))
}

async fn trigger_refresh(State(state): State<Arc<AppState>>) -> StatusCode {
    if refresh(&state).await {
        StatusCode::OK
    } else {
        StatusCode::CONFLICT
    }
}

async fn status_check() -> &'static str {
    "OK"
}

/// Topic and sentiment filtering over a batch. Topic comparison uses the
/// same lowercase keys the pipeline guarantees on every article.
fn filter_articles(
    articles: &[Article],
    topic: Option<&str>,
    sentiment: Option<Sentiment>,
) -> Vec<Article> {
    let topic_key = topic.map(|t| t.trim().to_lowercase());
    articles
        .iter()
        .filter(|a| topic_key.as_deref().map_or(true, |t| a.topic == t))
        .filter(|a| sentiment.map_or(true, |s| a.sentiment == s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleSeed;

    fn article(topic: &str, text: &str) -> Article {
        Article::new(
            "test",
            topic,
            ArticleSeed {
                title: text.to_string(),
                description: String::new(),
                content: String::new(),
                source: "example.com".to_string(),
                author: None,
                url: "#".to_string(),
                image_url: "https://placehold.co/600x400".to_string(),
                published_at: chrono::Utc::now(),
            },
        )
    }

    #[test]
    fn filter_by_topic_is_case_insensitive() {
        let articles = vec![article("technology", "a"), article("health", "b")];
        let filtered = filter_articles(&articles, Some("Technology"), None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].topic, "technology");
    }

    #[test]
    fn filter_by_sentiment() {
        let articles = vec![
            article("world", "great amazing wonderful success"),
            article("world", "war death crisis disaster"),
            article("world", "markets were open"),
        ];
        let filtered = filter_articles(&articles, None, Some(Sentiment::Negative));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].sentiment, Sentiment::Negative);
    }

    #[test]
    fn filters_compose() {
        let articles = vec![
            article("world", "great amazing wonderful success"),
            article("health", "great amazing wonderful success"),
            article("health", "war death crisis disaster"),
        ];
        let filtered = filter_articles(&articles, Some("health"), Some(Sentiment::Positive));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].topic, "health");
        assert_eq!(filtered[0].sentiment, Sentiment::Positive);
    }

    #[test]
    fn no_filters_returns_everything() {
        let articles = vec![article("world", "a"), article("health", "b")];
        assert_eq!(filter_articles(&articles, None, None).len(), 2);
    }
}
