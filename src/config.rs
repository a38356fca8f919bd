//! Runtime configuration, read once from the environment at startup.
//!
//! Every knob has a default so the binary runs with no environment at
//! all; anything can be overridden to substitute sources without code
//! changes.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;
use tracing::warn;

use crate::sources::{is_valid_url, validate_defaults, FeedSpec};

/// The fixed topic vocabulary. Filtering and charting key on these exact
/// lowercase strings.
pub const TOPIC_VOCABULARY: &[&str] = &[
    "business",
    "technology",
    "health",
    "science",
    "sports",
    "entertainment",
    "politics",
    "general",
    "world",
    "india",
    "lifestyle",
];

const DEFAULT_API_URL: &str = "https://newsapi.org/v2";
const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/raw?url=";
const DEFAULT_TOPICS: &str = "business;technology;health;science;sports;entertainment";
const DEFAULT_FEEDS: &str = "\
https://rss.nytimes.com/services/xml/rss/nyt/World.xml|world;\
https://rss.nytimes.com/services/xml/rss/nyt/Technology.xml|technology;\
https://rss.nytimes.com/services/xml/rss/nyt/Business.xml|business;\
https://feeds.npr.org/1001/rss.xml|politics;\
https://feeds.npr.org/1007/rss.xml|science;\
https://feeds.npr.org/1048/rss.xml|sports;\
https://www.espn.com/espn/rss/news|sports;\
https://www.theverge.com/rss/index.xml|technology;\
https://timesofindia.indiatimes.com/rssfeedstopstories.cms|india;\
https://feeds.feedburner.com/ndtvnews-top-stories|india";
const DEFAULT_FEED_ITEM_LIMIT: usize = 5;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub relay_url: String,
    pub topics: Vec<String>,
    pub feeds: Vec<FeedSpec>,
    pub feed_item_limit: usize,
    pub refresh_interval: Duration,
    pub port: u16,
}

impl Config {
    /// Reads and validates the full configuration from the environment.
    pub fn from_env() -> Result<Config> {
        let topics = get_env_var_as_vec("TOPICS", ';')
            .unwrap_or_else(|| split_list(DEFAULT_TOPICS, ';'))
            .into_iter()
            .map(|t| t.to_lowercase())
            .collect::<Vec<_>>();

        let feeds = match env::var("RSS_FEEDS") {
            Ok(raw) => parse_feed_list(&raw)?,
            Err(_) => parse_feed_list(DEFAULT_FEEDS)?,
        };

        let config = Config {
            api_key: env::var("NEWS_API_KEY").unwrap_or_default(),
            api_url: env::var("NEWS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            relay_url: env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()),
            topics,
            feeds,
            feed_item_limit: parse_env("FEED_ITEM_LIMIT", DEFAULT_FEED_ITEM_LIMIT)?,
            refresh_interval: Duration::from_secs(parse_env(
                "REFRESH_INTERVAL",
                DEFAULT_REFRESH_INTERVAL_SECS,
            )?),
            port: parse_env("PORT", DEFAULT_PORT)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.feed_item_limit == 0 {
            bail!("FEED_ITEM_LIMIT must be at least 1");
        }
        if self.refresh_interval.is_zero() {
            bail!("REFRESH_INTERVAL must be at least 1 second");
        }
        for feed in &self.feeds {
            if !is_valid_url(&feed.url) {
                bail!("invalid feed URL in RSS_FEEDS: {}", feed.url);
            }
        }
        for topic in self.topics.iter().chain(self.feeds.iter().map(|f| &f.topic)) {
            if !TOPIC_VOCABULARY.contains(&topic.as_str()) {
                warn!("topic {} is outside the known vocabulary", topic);
            }
        }
        validate_defaults()
    }
}

/// Splits an environment variable into a trimmed, non-empty list.
/// `None` when the variable is unset or blank, so defaults apply.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Option<Vec<String>> {
    let raw = env::var(var).ok()?;
    let items = split_list(&raw, delimiter);
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn split_list(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a `url|topic;url|topic` feed list. Topics are lowercased here
/// as well as at article construction; the config is the first line of
/// defense against mixed-case hints.
fn parse_feed_list(raw: &str) -> Result<Vec<FeedSpec>> {
    let mut feeds = Vec::new();
    for item in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (url, topic) = item
            .split_once('|')
            .with_context(|| format!("feed entry missing '|topic' suffix: {}", item))?;
        feeds.push(FeedSpec {
            url: url.trim().to_string(),
            topic: topic.trim().to_lowercase(),
        });
    }
    Ok(feeds)
}

fn parse_env<T: std::str::FromStr>(var: &str, default: T) -> Result<T> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} is not a valid value for {}", raw, var)),
        Err(_) => Ok(default),
    }
}
