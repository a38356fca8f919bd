//! Canonical article schema shared by every pipeline stage.
//!
//! Articles are rebuilt wholesale on each aggregation cycle and are
//! immutable once produced. All construction funnels through
//! [`Article::new`], which is where the lowercase-topic invariant and
//! sentiment assignment live.

use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sentiment::classify;

/// Coarse emotional tone of an article, lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Fixed per-label score. Precision is intentionally coarse: the score
    /// tracks the label, not the raw word counts.
    pub fn score(self) -> f64 {
        match self {
            Sentiment::Positive => 0.8,
            Sentiment::Neutral => 0.5,
            Sentiment::Negative => 0.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Parses a lowercase label as used in query strings and JSON.
    pub fn from_label(label: &str) -> Option<Sentiment> {
        match label.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized news article. Field names follow the presentation
/// contract on the wire (`imageUrl`, `publishedAt`, `sentimentScore`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub source: String,
    pub author: String,
    pub url: String,
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    pub topic: String,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
}

/// Field bundle handed to [`Article::new`] by the normalizer and the
/// sample-data generator. Missing-field degradation happens before this
/// point; every field here is already populated.
#[derive(Debug, Clone)]
pub struct ArticleSeed {
    pub title: String,
    pub description: String,
    pub content: String,
    pub source: String,
    pub author: Option<String>,
    pub url: String,
    pub image_url: String,
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// Central constructor. The topic is lowercased here, and only here,
    /// so every source kind produces the same filter keys downstream.
    /// Sentiment is classified from the title and description.
    pub fn new(kind: &str, topic: &str, seed: ArticleSeed) -> Article {
        let topic = topic.trim().to_lowercase();
        let (sentiment, sentiment_score) =
            classify(&format!("{} {}", seed.title, seed.description));

        Article {
            id: article_id(kind, &topic),
            title: seed.title,
            description: seed.description,
            content: seed.content,
            author: seed.author.unwrap_or_else(|| seed.source.clone()),
            source: seed.source,
            url: seed.url,
            image_url: seed.image_url,
            published_at: seed.published_at,
            topic,
            sentiment,
            sentiment_score,
        }
    }

    /// True when the article carries no usable link. Consumers must not
    /// render `"#"` as a real destination.
    pub fn has_link(&self) -> bool {
        self.url != "#"
    }
}

/// Advisory rendering key: source kind, topic, millisecond timestamp and a
/// short random suffix. Collisions are acceptable; this is not an identity.
fn article_id(kind: &str, topic: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(7)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!(
        "{}-{}-{}-{}",
        kind,
        topic,
        Utc::now().timestamp_millis(),
        suffix
    )
}
