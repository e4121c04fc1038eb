//! Page rendering boundary.
//!
//! The pipeline only needs "URL in, HTML out"; everything behind that —
//! cookies, headers, challenge walls — lives behind the [`PageRenderer`]
//! trait so a headless-browser implementation can be swapped in without
//! touching the extraction code.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use url::Url;

use crate::error::{RatesError, Result};

/// Marker present once the cheapest-price overview has rendered.
const READY_MARKER: &str = "overview_cheapest_price";
/// Marker of the anti-bot challenge widget.
const CHALLENGE_MARKER: &str = "aws-captcha";

const MAX_ATTEMPTS: usize = 3;
const RETRY_WAIT: Duration = Duration::from_secs(5);

pub trait PageRenderer: Send + Sync {
    fn name(&self) -> &'static str;
    fn render(&self, url: &str) -> Result<String>;
}

/// Plain HTTP renderer.
///
/// Fetches the page with a browser-like profile and waits out transient
/// not-ready states with a bounded retry window. A challenge wall on the
/// final attempt is a hard error — solving it is out of scope. A page
/// that never shows the readiness marker but is not blocked is returned
/// as-is; the extractor treats a listing-less document softly.
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new() -> Result<Self> {
        // HTTP/1.1 + keep-alive; some WAFs expect exactly that.
        let client = Client::builder()
            .http1_only()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }

    fn fetch_once(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .headers(browser_headers())
            .send()?
            .error_for_status()?;
        Ok(resp.text()?)
    }
}

impl PageRenderer for HttpRenderer {
    fn name(&self) -> &'static str {
        "http-renderer"
    }

    fn render(&self, url: &str) -> Result<String> {
        Url::parse(url).map_err(|_| RatesError::MalformedUrl(url.to_string()))?;

        let mut last_body = String::new();
        for attempt in 1..=MAX_ATTEMPTS {
            let body = self.fetch_once(url)?;
            if page_is_ready(&body) {
                return Ok(body);
            }
            if attempt < MAX_ATTEMPTS {
                std::thread::sleep(RETRY_WAIT);
            }
            last_body = body;
        }

        if challenge_shown(&last_body) {
            return Err(RatesError::ChallengeBlocked(url.to_string()));
        }
        Ok(last_body)
    }
}

pub(crate) fn page_is_ready(body: &str) -> bool {
    body.contains(READY_MARKER)
}

pub(crate) fn challenge_shown(body: &str) -> bool {
    body.contains(CHALLENGE_MARKER)
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0",
        ),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_marker_detection() {
        let ready = r#"<div data-testid="overview_cheapest_price">IDR 1000000</div>"#;
        assert!(page_is_ready(ready));
        assert!(!page_is_ready("<div>loading…</div>"));
    }

    #[test]
    fn challenge_marker_detection() {
        let blocked = r#"<div id="aws-captcha"></div>"#;
        assert!(challenge_shown(blocked));
        assert!(!challenge_shown("<div>room list</div>"));
    }
}
