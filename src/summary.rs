//! Sentiment-count reduction over an article collection.

use serde::Serialize;

use crate::article::{Article, Sentiment};

/// Sentiment counts for a topic (or the whole collection). The three
/// counts partition the considered articles exactly, so
/// `positive + neutral + negative == total` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSentimentSummary {
    pub topic: String,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub total: usize,
}

/// Reduces `articles`, optionally restricted to one topic, into sentiment
/// counts. Pure and deterministic; no article is counted twice and none is
/// skipped.
pub fn summarize(articles: &[Article], topic: Option<&str>) -> TopicSentimentSummary {
    let topic_key = topic.map(|t| t.trim().to_lowercase());
    let mut summary = TopicSentimentSummary {
        topic: topic_key.clone().unwrap_or_else(|| "all".to_string()),
        positive: 0,
        neutral: 0,
        negative: 0,
        total: 0,
    };

    for article in articles {
        if let Some(ref key) = topic_key {
            if article.topic != *key {
                continue;
            }
        }
        match article.sentiment {
            Sentiment::Positive => summary.positive += 1,
            Sentiment::Neutral => summary.neutral += 1,
            Sentiment::Negative => summary.negative += 1,
        }
        summary.total += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{Article, ArticleSeed};

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

    fn positive(topic: &str) -> Article {
        article(topic, "great amazing wonderful success")
    }

    fn negative(topic: &str) -> Article {
        article(topic, "war death crisis disaster")
    }

    fn neutral(topic: &str) -> Article {
        article(topic, "markets were open on tuesday")
    }

    #[test]
    fn counts_partition_the_collection() {
        let articles = vec![
            positive("technology"),
            positive("technology"),
            positive("health"),
            negative("technology"),
            negative("world"),
            neutral("health"),
        ];

        let summary = summarize(&articles, None);
        assert_eq!(summary.positive, 3);
        assert_eq!(summary.neutral, 1);
        assert_eq!(summary.negative, 2);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.total, articles.len());
        assert_eq!(
            summary.positive + summary.neutral + summary.negative,
            summary.total
        );
    }

    #[test]
    fn topic_filter_counts_only_that_topic() {
        let articles = vec![
            positive("technology"),
            negative("technology"),
            positive("health"),
            neutral("health"),
            neutral("health"),
        ];

        let summary = summarize(&articles, Some("health"));
        assert_eq!(summary.topic, "health");
        assert_eq!(summary.positive, 1);
        assert_eq!(summary.neutral, 2);
        assert_eq!(summary.negative, 0);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn topic_filter_is_case_insensitive() {
        let articles = vec![positive("sports"), neutral("world")];
        let summary = summarize(&articles, Some("  Sports "));
        assert_eq!(summary.total, 1);
        assert_eq!(summary.positive, 1);
    }

    #[test]
    fn empty_collection_summarizes_to_zero() {
        let summary = summarize(&[], None);
        assert_eq!(summary.topic, "all");
        assert_eq!(summary.total, 0);
        assert_eq!(
            summary.positive + summary.neutral + summary.negative,
            summary.total
        );
    }

    #[test]
    fn summarize_is_idempotent_over_input() {
        let articles = vec![positive("world"), negative("world"), neutral("india")];
        assert_eq!(summarize(&articles, None), summarize(&articles, None));
    }
}
