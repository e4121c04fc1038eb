//! Pipeline facade: sitemap → deep link → render → extract → persist.

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::extract_room_offers;
use crate::link::{build_deep_link, decompose};
use crate::log::ScrapeLogger;
use crate::render::{HttpRenderer, PageRenderer};
use crate::sitemap::SitemapLocator;
use crate::store::RatesStore;
use crate::types::StayQuery;

/* ------------ public facade components ------------ */

pub struct Components {
    pub renderer: Box<dyn PageRenderer>,
}
impl Default for Components {
    fn default() -> Self {
        let renderer = HttpRenderer::new().expect("failed to init http client");
        Self {
            renderer: Box::new(renderer),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeParams {
    pub sitemap_index: String,
    pub stay: StayQuery,
    pub out_path: PathBuf,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub hotel_url: String,
    pub deep_link: String,
    pub offers_saved: usize,
    pub out_path: String,
}

/* ------------ pipeline entrypoints ------------ */

/// Run the whole single-hotel pipeline.
///
/// Structural failures (malformed URL, bad dates) abort before the page
/// fetch; an empty or listing-less page completes the run with zero
/// persisted offers and a warning.
pub fn scrape_hotel(
    logger: &ScrapeLogger,
    components: &Components,
    params: &ScrapeParams,
) -> Result<ScrapeOutcome> {
    let start = Instant::now();
    logger.info("starting scrape", Some(&params.sitemap_index))?;

    let locator = SitemapLocator::new()?;
    let hotel_url = locator.locate_first_hotel(&params.sitemap_index)?;
    logger.info("hotel url located", Some(&hotel_url))?;

    // Fail fast on structure before touching the detail page.
    let parts = decompose(&hotel_url)?;
    let deep_link = build_deep_link(&parts, &params.stay)?;
    logger.info("deep link built", Some(&deep_link))?;

    let html = components.renderer.render(&deep_link)?;
    let offers = extract_room_offers(&html, &deep_link)?;
    if offers.is_empty() {
        logger.warn("no rooms found on page", Some(&deep_link))?;
    }

    let store = RatesStore::new(&params.out_path);
    store.save(&offers)?;

    let details = format!(
        "{} offers saved to {} in {}ms",
        offers.len(),
        params.out_path.display(),
        start.elapsed().as_millis()
    );
    logger.info("scrape completed", Some(&details))?;

    Ok(ScrapeOutcome {
        hotel_url,
        deep_link,
        offers_saved: offers.len(),
        out_path: params.out_path.display().to_string(),
    })
}

/// Build a deep link for an already-known hotel URL.
pub fn build_link(hotel_url: &str, stay: &StayQuery) -> Result<String> {
    let parts = decompose(hotel_url)?;
    build_deep_link(&parts, stay)
}

/// Extract offers from an HTML file on disk and persist them.
///
/// `page_url` must be the deep link that produced the page; the extractor
/// reads the guest count from its tail.
pub fn extract_file(
    logger: &ScrapeLogger,
    html_path: &std::path::Path,
    page_url: &str,
    out_path: &std::path::Path,
) -> Result<ScrapeOutcome> {
    let html = std::fs::read_to_string(html_path)?;
    let offers = extract_room_offers(&html, page_url)?;
    if offers.is_empty() {
        logger.warn("no rooms found on page", Some(&html_path.display().to_string()))?;
    }

    RatesStore::new(out_path).save(&offers)?;
    logger.info(
        "extraction completed",
        Some(&format!("{} offers saved to {}", offers.len(), out_path.display())),
    )?;

    Ok(ScrapeOutcome {
        hotel_url: String::new(),
        deep_link: page_url.to_string(),
        offers_saved: offers.len(),
        out_path: out_path.display().to_string(),
    })
}
