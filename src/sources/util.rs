//! Text and URL helpers shared by the source adapters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Hostname prefixes that carry no identity: `www.nytimes.com`,
/// `rss.nytimes.com` and `feeds.npr.org` all name the outlet itself.
const GENERIC_HOST_PREFIXES: &[&str] = &["www.", "rss.", "feeds.", "feed."];

/// Redirector and aggregator hosts whose hostname says nothing about the
/// outlet. For these the channel title is the better source name.
const REDIRECTOR_HOSTS: &[&str] = &[
    "feedburner.com",
    "feedproxy.google.com",
    "news.google.com",
];

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

static IMG_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img[^>]+src=["']([^"'>]+)["']"#).expect("img regex"));

/// Helper to validate a URL before spending a request on it.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.scheme() == "http" || parsed.scheme() == "https",
        Err(_) => false,
    }
}

/// Parses a date string in the formats the upstream sources actually emit.
/// RFC 3339 first (the API), then RFC 2822 (RSS pubDate), then a few
/// zone-less shapes interpreted as UTC.
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(date) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(date.with_timezone(&Utc));
    }

    for format in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

/// Removes tag markup and trims. Entities are left as-is: the upstream
/// pipeline never decoded them, and changing that silently would alter
/// stored text for every consumer.
pub fn strip_html(text: &str) -> String {
    TAG_RE.replace_all(text, "").trim().to_string()
}

/// First `<img src>` found in an HTML fragment, case-insensitive.
pub fn extract_embedded_image(html: &str) -> Option<String> {
    IMG_SRC_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Lowercased hostname of a feed URL with generic prefixes stripped.
pub fn normalize_source_host(feed_url: &str) -> Option<String> {
    let parsed = Url::parse(feed_url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    for prefix in GENERIC_HOST_PREFIXES {
        if let Some(stripped) = host.strip_prefix(prefix) {
            if !stripped.is_empty() {
                return Some(stripped.to_string());
            }
        }
    }
    Some(host)
}

/// Human-readable source name for a feed. Normally the normalized host;
/// for redirector hosts the channel title is preferred when present.
pub fn normalize_source_name(feed_url: &str, channel_title: Option<&str>) -> String {
    let title = channel_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match normalize_source_host(feed_url) {
        Some(host) => {
            let redirector = REDIRECTOR_HOSTS
                .iter()
                .any(|r| host == *r || host.ends_with(&format!(".{}", r)));
            if redirector {
                title.unwrap_or(host)
            } else {
                host
            }
        }
        None => title.unwrap_or_else(|| "unknown".to_string()),
    }
}

/// Clean up malformed feed XML enough for a second parse attempt: strip a
/// BOM and any garbage before the document start, repair the entities that
/// trip strict parsers, and drop characters XML 1.0 forbids.
pub fn cleanup_xml(xml: &str) -> String {
    let mut cleaned = xml.trim().trim_start_matches('\u{FEFF}').to_string();

    let start = cleaned
        .find("<?xml")
        .or_else(|| cleaned.find("<rss"))
        .or_else(|| cleaned.find("<feed"));
    if let Some(idx) = start {
        cleaned = cleaned[idx..].to_string();
    }

    cleaned = cleaned
        .replace("&nbsp;", "&#160;")
        .replace("&ndash;", "&#8211;")
        .replace("&mdash;", "&#8212;")
        .replace("&rsquo;", "&#8217;")
        .replace("&lsquo;", "&#8216;")
        .replace("&rdquo;", "&#8221;")
        .replace("&ldquo;", "&#8220;")
        .replace("&amp;amp;", "&amp;");

    cleaned = cleaned
        .chars()
        .filter(|&c| {
            matches!(c,
                '\u{0009}' | '\u{000A}' | '\u{000D}' |
                '\u{0020}'..='\u{D7FF}' |
                '\u{E000}'..='\u{FFFD}' |
                '\u{10000}'..='\u{10FFFF}'
            )
        })
        .collect();

    if !cleaned.starts_with("<?xml") {
        cleaned = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", cleaned);
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_source_formats() {
        assert!(parse_date("2024-05-01T12:30:00Z").is_some());
        assert!(parse_date("2024-05-01T12:30:00+05:30").is_some());
        assert!(parse_date("Wed, 01 May 2024 12:30:00 GMT").is_some());
        assert!(parse_date("2024-05-01 12:30:00").is_some());
        assert!(parse_date("2024-05-01").is_some());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("01/05/2024 noon").is_none());
    }

    #[test]
    fn parse_date_converts_to_utc() {
        let date = parse_date("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn strip_html_removes_tags_but_not_entities() {
        assert_eq!(
            strip_html("<p>Hello <b>world</b></p>"),
            "Hello world"
        );
        assert_eq!(strip_html("A &amp; B"), "A &amp; B");
        assert_eq!(strip_html("  <div>padded</div>  "), "padded");
    }

    #[test]
    fn extract_embedded_image_finds_first_src() {
        let html = r#"<p>text</p><IMG SRC="https://example.com/a.jpg"><img src="https://example.com/b.jpg">"#;
        assert_eq!(
            extract_embedded_image(html).as_deref(),
            Some("https://example.com/a.jpg")
        );
        assert!(extract_embedded_image("<p>no image</p>").is_none());
    }

    #[test]
    fn host_normalization_strips_known_prefixes() {
        assert_eq!(
            normalize_source_host("https://rss.nytimes.com/services/xml/rss/nyt/World.xml"),
            Some("nytimes.com".to_string())
        );
        assert_eq!(
            normalize_source_host("https://feeds.npr.org/1001/rss.xml"),
            Some("npr.org".to_string())
        );
        assert_eq!(
            normalize_source_host("https://www.espn.com/espn/rss/news"),
            Some("espn.com".to_string())
        );
        assert_eq!(
            normalize_source_host("https://timesofindia.indiatimes.com/rss.cms"),
            Some("timesofindia.indiatimes.com".to_string())
        );
    }

    #[test]
    fn redirector_hosts_prefer_channel_title() {
        assert_eq!(
            normalize_source_name(
                "https://feeds.feedburner.com/ndtvnews-top-stories",
                Some("NDTV News")
            ),
            "NDTV News"
        );
        // Without a title the host is still better than nothing.
        assert_eq!(
            normalize_source_name("https://feeds.feedburner.com/ndtvnews-top-stories", None),
            "feedburner.com"
        );
        // Regular hosts ignore the channel title.
        assert_eq!(
            normalize_source_name(
                "https://www.theverge.com/rss/index.xml",
                Some("The Verge - All Posts")
            ),
            "theverge.com"
        );
    }

    #[test]
    fn cleanup_xml_strips_bom_and_leading_garbage() {
        let dirty = "\u{FEFF}garbage<?xml version=\"1.0\"?><rss></rss>";
        let cleaned = cleanup_xml(dirty);
        assert!(cleaned.starts_with("<?xml"));
        assert!(!cleaned.contains("garbage"));
    }

    #[test]
    fn cleanup_xml_repairs_common_entities() {
        let cleaned = cleanup_xml("<rss><title>A &nbsp; B &amp;amp; C</title></rss>");
        assert!(cleaned.contains("&#160;"));
        assert!(cleaned.contains("&amp;"));
        assert!(!cleaned.contains("&amp;amp;"));
    }

    #[test]
    fn url_validation() {
        assert!(is_valid_url("https://example.com/feed.xml"));
        assert!(is_valid_url("http://example.com"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("not a url"));
    }
}
