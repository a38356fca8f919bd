//! Per-item normalization: one raw upstream item in, exactly one
//! [`Article`] out, never an error.
//!
//! Every field degrades through an ordered fallback chain instead of
//! failing the batch. The chains are the contract here; reordering them
//! changes what consumers see for malformed feeds.

use chrono::Utc;
use feed_rs::model::Entry;

use super::images;
use super::types::ApiArticle;
use super::util::{extract_embedded_image, normalize_source_host, normalize_source_name, parse_date, strip_html};
use crate::article::{Article, ArticleSeed};

pub const NO_TITLE: &str = "No title";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_CONTENT: &str = "No content available";

/// Feed-level context an RSS item is normalized against.
#[derive(Debug, Clone, Copy)]
pub struct FeedContext<'a> {
    pub feed_url: &'a str,
    pub channel_title: Option<&'a str>,
}

/// Normalizes one news API article. `topic` is the category the request
/// was issued for, not anything the payload claims.
pub fn normalize_api_article(raw: ApiArticle, topic: &str) -> Article {
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_TITLE)
        .to_string();
    let description = raw
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(NO_DESCRIPTION)
        .to_string();
    let content = raw
        .content
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| description.clone());

    let source = raw
        .source
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string();

    let image_url = raw
        .url_to_image
        .as_deref()
        .filter(|u| images::usable_image(u))
        .map(str::to_string)
        .or_else(|| embedded_image(&content))
        .or_else(|| embedded_image(&description))
        .or_else(|| images::source_default(&source).map(str::to_string))
        .unwrap_or_else(|| images::topic_placeholder(topic));

    let published_at = raw
        .published_at
        .as_deref()
        .and_then(parse_date)
        .unwrap_or_else(Utc::now);

    Article::new(
        "api",
        topic,
        ArticleSeed {
            title: strip_html(&title),
            description: strip_html(&description),
            content: strip_html(&content),
            author: raw
                .author
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            source,
            url: raw
                .url
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or("#")
                .to_string(),
            image_url,
            published_at,
        },
    )
}

/// Normalizes one RSS/Atom entry with its feed's topic hint.
pub fn normalize_rss_entry(entry: &Entry, ctx: FeedContext<'_>, topic: &str) -> Article {
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let description = entry
        .summary
        .as_ref()
        .map(|t| t.content.clone())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    // content:encoded where present, otherwise the description carries the
    // body as well.
    let content = entry
        .content
        .as_ref()
        .and_then(|c| c.body.clone())
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| description.clone());

    let source = normalize_source_name(ctx.feed_url, ctx.channel_title);

    let image_url = media_image(entry)
        .or_else(|| embedded_image(&content))
        .or_else(|| embedded_image(&description))
        .or_else(|| static_default(&source, ctx.feed_url))
        .unwrap_or_else(|| images::topic_placeholder(topic));

    let published_at = entry.published.or(entry.updated).unwrap_or_else(Utc::now);

    Article::new(
        "rss",
        topic,
        ArticleSeed {
            title: strip_html(&title),
            description: strip_html(&description),
            content: strip_html(&content),
            author: entry
                .authors
                .first()
                .map(|p| p.name.trim().to_string())
                .filter(|a| !a.is_empty()),
            source,
            url: entry
                .links
                .first()
                .map(|link| link.href.clone())
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| "#".to_string()),
            image_url,
            published_at,
        },
    )
}

/// First usable image from the entry's media objects: thumbnails first
/// (the feed-native image), then enclosure/media content URLs.
fn media_image(entry: &Entry) -> Option<String> {
    for media in &entry.media {
        for thumbnail in &media.thumbnails {
            if images::usable_image(&thumbnail.image.uri) {
                return Some(thumbnail.image.uri.clone());
            }
        }
        for content in &media.content {
            if let Some(url) = &content.url {
                let url = url.to_string();
                if images::usable_image(&url) {
                    return Some(url);
                }
            }
        }
    }
    None
}

fn embedded_image(html: &str) -> Option<String> {
    extract_embedded_image(html).filter(|u| images::usable_image(u))
}

/// Static per-source default, matched against the source name and the
/// feed host so either form of the key resolves.
fn static_default(source: &str, feed_url: &str) -> Option<String> {
    images::source_default(source).map(str::to_string).or_else(|| {
        normalize_source_host(feed_url)
            .and_then(|host| images::source_default(&host))
            .map(str::to_string)
    })
}
