//! Near-duplicate story suppression.
//!
//! Titles are lowercased, stripped of punctuation and compared as word
//! sets with Jaccard similarity. A candidate whose similarity to any
//! already-accepted title exceeds the threshold is dropped; the first
//! occurrence in concatenation order wins. The scan is quadratic over the
//! batch, which is fine at the tens-to-hundreds volume one cycle produces;
//! anything much larger would want an index here.

use std::collections::HashSet;
use tracing::debug;

use crate::article::Article;
use crate::TARGET_AGGREGATE;

/// Word-set overlap above which two titles count as the same story.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Lowercased, punctuation-free word set of a title.
fn title_words(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of two word sets. Two empty sets are treated as
/// identical so that degenerate titles still collapse.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Drops articles whose titles near-duplicate an earlier article's title.
/// Stable: surviving articles keep their input order.
pub fn dedupe(articles: Vec<Article>) -> Vec<Article> {
    let mut kept: Vec<Article> = Vec::with_capacity(articles.len());
    let mut accepted: Vec<HashSet<String>> = Vec::new();

    for article in articles {
        let words = title_words(&article.title);
        let duplicate = accepted
            .iter()
            .any(|seen| jaccard(seen, &words) > SIMILARITY_THRESHOLD);
        if duplicate {
            debug!(
                target: TARGET_AGGREGATE,
                "Dropping near-duplicate title: {}", article.title
            );
            continue;
        }
        accepted.push(words);
        kept.push(article);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleSeed;

    fn article(title: &str, source: &str) -> Article {
        Article::new(
            "test",
            "politics",
            ArticleSeed {
                title: title.to_string(),
                description: "desc".to_string(),
                content: "content".to_string(),
                source: source.to_string(),
                author: None,
                url: "https://example.com/a".to_string(),
                image_url: "https://placehold.co/600x400".to_string(),
                published_at: chrono::Utc::now(),
            },
        )
    }

    #[test]
    fn casing_and_punctuation_variants_collapse() {
        let articles = vec![
            article("Senate Passes Climate Bill", "nytimes.com"),
            article("senate passes climate bill!!", "npr.org"),
        ];
        let deduped = dedupe(articles);
        assert_eq!(deduped.len(), 1);
        // First-seen wins: no quality scoring between duplicates.
        assert_eq!(deduped[0].source, "nytimes.com");
    }

    #[test]
    fn distinct_stories_survive() {
        let articles = vec![
            article("Senate Passes Climate Bill", "nytimes.com"),
            article("Markets Rally After Rate Decision", "reuters.com"),
            article("New Telescope Spots Distant Galaxy", "npr.org"),
        ];
        assert_eq!(dedupe(articles).len(), 3);
    }

    #[test]
    fn dedupe_is_idempotent() {
        let articles = vec![
            article("Senate Passes Climate Bill", "nytimes.com"),
            article("senate passes climate bill!!", "npr.org"),
            article("Markets Rally After Rate Decision", "reuters.com"),
            article("Markets rally after rate decision", "cnbc.com"),
            article("New Telescope Spots Distant Galaxy", "npr.org"),
        ];
        let once = dedupe(articles);
        let titles: Vec<String> = once.iter().map(|a| a.title.clone()).collect();
        let twice = dedupe(once);
        assert_eq!(
            titles,
            twice.iter().map(|a| a.title.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn partial_overlap_below_threshold_is_kept() {
        // Shares two of five words; similarity well under the threshold.
        let articles = vec![
            article("Senate Passes Climate Bill", "nytimes.com"),
            article("House Rejects Climate Bill Amendment", "npr.org"),
        ];
        assert_eq!(dedupe(articles).len(), 2);
    }

    #[test]
    fn jaccard_of_identical_sets_is_one() {
        let a = title_words("Senate Passes Climate Bill");
        let b = title_words("senate passes climate bill!!");
        assert_eq!(jaccard(&a, &b), 1.0);
    }

    #[test]
    fn jaccard_of_disjoint_sets_is_zero() {
        let a = title_words("alpha beta");
        let b = title_words("gamma delta");
        assert_eq!(jaccard(&a, &b), 0.0);
    }
}
