//! HTTP client construction and relayed feed retrieval.

use anyhow::{anyhow, bail, Result};
use reqwest::header;
use std::io::Read;
use tracing::debug;

use super::types::REQUEST_TIMEOUT;
use crate::TARGET_WEB_REQUEST;

/// Builds the shared client used by both adapters.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .gzip(true)
        .timeout(REQUEST_TIMEOUT)
        .redirect(reqwest::redirect::Policy::default())
        .build()
        .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))
}

/// Wraps a feed URL in the cross-origin relay endpoint. The relay takes
/// the target URL as a single urlencoded parameter appended to its base.
pub fn relay_url(relay_base: &str, feed_url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(feed_url.as_bytes()).collect();
    format!("{}{}", relay_base, encoded)
}

/// Fetches one feed's raw body through the relay and returns it as text.
///
/// Relays occasionally hand back bodies that are still compressed despite
/// the transfer headers, so the bytes go through decompression probes
/// before decoding. Decoding is lossy: a few replacement characters beat
/// dropping a whole feed over one stray byte.
pub async fn fetch_relayed_body(
    client: &reqwest::Client,
    relay_base: &str,
    feed_url: &str,
) -> Result<String> {
    let request_url = relay_url(relay_base, feed_url);
    debug!(target: TARGET_WEB_REQUEST, "Loading feed via relay: {}", request_url);

    let response = client
        .get(&request_url)
        .header(
            header::ACCEPT,
            "application/rss+xml, application/atom+xml, application/xml, text/xml, */*;q=0.9",
        )
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        bail!("relay returned status {} for {}", status, feed_url);
    }

    let bytes = response.bytes().await?;
    let decompressed = try_decompressions(&bytes, feed_url);
    Ok(String::from_utf8_lossy(&decompressed).into_owned())
}

/// Probes gzip, zlib and deflate in turn; the original bytes win when no
/// probe yields anything.
fn try_decompressions(bytes: &[u8], feed_url: &str) -> Vec<u8> {
    let mut decoder = flate2::read::GzDecoder::new(bytes);
    let mut decoded = Vec::new();
    if decoder.read_to_end(&mut decoded).is_ok() && !decoded.is_empty() {
        debug!(target: TARGET_WEB_REQUEST, "Decompressed gzip body from {}", feed_url);
        return decoded;
    }

    let mut decoder = flate2::read::ZlibDecoder::new(bytes);
    let mut decoded = Vec::new();
    if decoder.read_to_end(&mut decoded).is_ok() && !decoded.is_empty() {
        debug!(target: TARGET_WEB_REQUEST, "Decompressed zlib body from {}", feed_url);
        return decoded;
    }

    let mut decoder = flate2::read::DeflateDecoder::new(bytes);
    let mut decoded = Vec::new();
    if decoder.read_to_end(&mut decoded).is_ok() && !decoded.is_empty() {
        debug!(target: TARGET_WEB_REQUEST, "Decompressed deflate body from {}", feed_url);
        return decoded;
    }

    bytes.to_vec()
}
