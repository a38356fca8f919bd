//! Static image resolution.
//!
//! Last two rungs of the image fallback ladder: a per-source default table
//! for outlets whose feeds rarely carry usable images, and the generic
//! topic-keyed placeholder. Also owns the blocklist of image hosts that
//! serve through unreliable syndication relays.

use anyhow::{bail, Result};
use url::Url;

/// Static default images keyed on a normalized source key. A key matches
/// when it appears in the candidate's normalized source name or host, so
/// `timesofindia.indiatimes.com` and a "Times of India" channel title both
/// resolve to the same default.
const SOURCE_IMAGE_DEFAULTS: &[(&str, &str)] = &[
    ("ndtv", "https://cdn.ndtv.com/common/images/ogndtv.png"),
    (
        "timesofindia",
        "https://static.toiimg.com/photo/msid-47529300/47529300.jpg",
    ),
    (
        "thehindu",
        "https://www.thehindu.com/theme/images/th-online/logo.png",
    ),
];

/// Image hosts served through syndication relays that routinely break.
/// Candidates on these hosts are skipped so the fallback ladder continues.
const BLOCKED_IMAGE_HOSTS: &[&str] = &[
    "feedburner.com",
    "feedproxy.google.com",
    "feedsportal.com",
];

/// Looks up a static default image for a normalized source key. The
/// haystack is typically the source name plus the feed host.
pub fn source_default(source_key: &str) -> Option<&'static str> {
    let key = source_key.to_lowercase();
    SOURCE_IMAGE_DEFAULTS
        .iter()
        .find(|(needle, _)| key.contains(needle))
        .map(|(_, image)| *image)
}

/// True when the candidate image URL lives on a blocklisted host.
pub fn is_blocklisted(candidate: &str) -> bool {
    let Ok(parsed) = Url::parse(candidate) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_lowercase();
    BLOCKED_IMAGE_HOSTS
        .iter()
        .any(|blocked| host == *blocked || host.ends_with(&format!(".{}", blocked)))
}

/// A candidate is usable when present, parseable and not blocklisted.
pub fn usable_image(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    !trimmed.is_empty() && !is_blocklisted(trimmed)
}

/// Generic placeholder, keyed by topic so the tile still reads sensibly.
pub fn topic_placeholder(topic: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(topic.as_bytes()).collect();
    format!("https://placehold.co/600x400?text={}", encoded)
}

/// Startup validation of the defaults table: every URL must parse as http
/// or https and must not itself sit on a blocklisted host.
pub fn validate_defaults() -> Result<()> {
    for (key, image) in SOURCE_IMAGE_DEFAULTS {
        let parsed = Url::parse(image)
            .map_err(|e| anyhow::anyhow!("bad default image for {}: {}", key, e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            bail!("default image for {} has scheme {}", key, parsed.scheme());
        }
        if is_blocklisted(image) {
            bail!("default image for {} is on a blocklisted host", key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_table_passes_validation() {
        validate_defaults().unwrap();
    }

    #[test]
    fn source_default_matches_host_and_name() {
        assert!(source_default("timesofindia.indiatimes.com").is_some());
        assert!(source_default("NDTV News").is_some());
        assert!(source_default("nytimes.com").is_none());
    }

    #[test]
    fn blocklist_matches_host_and_subdomains() {
        assert!(is_blocklisted("https://feedproxy.google.com/img/x.jpg"));
        assert!(is_blocklisted("https://img.feedburner.com/x.png"));
        assert!(!is_blocklisted("https://static.toiimg.com/photo/1.jpg"));
        // Substring of an unrelated host must not match.
        assert!(!is_blocklisted("https://notfeedburner.com/x.png"));
    }

    #[test]
    fn unusable_candidates_are_rejected() {
        assert!(!usable_image(""));
        assert!(!usable_image("   "));
        assert!(!usable_image("https://feedburner.com/x.jpg"));
        assert!(usable_image("https://example.com/x.jpg"));
    }

    #[test]
    fn placeholder_is_topic_keyed_and_encoded() {
        assert_eq!(
            topic_placeholder("technology"),
            "https://placehold.co/600x400?text=technology"
        );
        assert_eq!(
            topic_placeholder("top stories"),
            "https://placehold.co/600x400?text=top+stories"
        );
    }
}
