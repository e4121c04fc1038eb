use thiserror::Error;

pub type Result<T> = std::result::Result<T, RatesError>;

#[derive(Debug, Error)]
pub enum RatesError {
    /// Hotel URL has too few path segments to yield the domain/locale triple.
    #[error("malformed hotel url: {0}")]
    MalformedUrl(String),

    /// Stay date that does not parse as DD-MM-YYYY.
    #[error("invalid stay date: {0}")]
    InvalidDate(String),

    /// Checkout must be strictly after checkin.
    #[error("invalid date range: check-out {check_out} is not after check-in {check_in}")]
    InvalidDateRange { check_in: String, check_out: String },

    /// Sitemap traversal produced no usable hotel URL.
    #[error("sitemap lookup failed: {0}")]
    SitemapNotFound(String),

    /// Renderer gave up behind an anti-bot challenge.
    #[error("page blocked by challenge: {0}")]
    ChallengeBlocked(String),

    /// Positional room/price lists diverged, or a price failed to parse.
    #[error("data integrity: {0}")]
    DataIntegrity(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
