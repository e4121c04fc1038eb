//! Sitemap-index traversal yielding a single hotel detail URL.
//!
//! The booking site publishes a gzip-compressed XML sitemap index; one of
//! its entries points at the accommodation detail sitemap, whose first
//! `<url><loc>` is the hotel page we scrape. XML traversal is separated
//! from fetching so it can be exercised offline.

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::blocking::Client;

use crate::error::{RatesError, Result};

const HOTEL_DETAIL_MARKER: &str = "/sitemap/accommodation/hotel-detail/";

pub struct SitemapLocator {
    client: Client,
}

impl SitemapLocator {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    /// Walk the sitemap index down to the first hotel detail URL.
    pub fn locate_first_hotel(&self, index_url: &str) -> Result<String> {
        let index_xml = self.fetch_xml(index_url)?;
        let detail_sitemap = find_hotel_detail_sitemap(&index_xml)?;

        let detail_xml = self.fetch_xml(&detail_sitemap)?;
        first_hotel_url(&detail_xml)
    }

    /// GET a sitemap document, decompressing the body when it is a
    /// gzip payload (the compression is in the body itself, not the
    /// transfer encoding).
    fn fetch_xml(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?.error_for_status()?;
        let bytes = resp.bytes()?;
        decode_sitemap_body(&bytes)
    }
}

fn decode_sitemap_body(bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        let mut xml = String::new();
        GzDecoder::new(bytes).read_to_string(&mut xml)?;
        Ok(xml)
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Pick the accommodation detail sitemap out of a `<sitemapindex>`.
pub fn find_hotel_detail_sitemap(index_xml: &str) -> Result<String> {
    collect_locs(index_xml, "sitemap")?
        .into_iter()
        .find(|loc| loc.contains(HOTEL_DETAIL_MARKER))
        .ok_or_else(|| {
            RatesError::SitemapNotFound("no hotel-detail sitemap in index".to_string())
        })
}

/// First `<url><loc>` of a detail sitemap — the run scrapes one hotel.
pub fn first_hotel_url(sitemap_xml: &str) -> Result<String> {
    collect_locs(sitemap_xml, "url")?
        .into_iter()
        .next()
        .ok_or_else(|| RatesError::SitemapNotFound("no hotel URLs found".to_string()))
}

/// Collect `<loc>` texts nested under `parent_tag` entries.
fn collect_locs(xml: &str, parent_tag: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut locs = Vec::new();
    let mut in_parent = false;
    let mut in_loc = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == parent_tag {
                    in_parent = true;
                } else if name == "loc" && in_parent {
                    in_loc = true;
                }
            }
            Event::End(e) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == parent_tag {
                    in_parent = false;
                } else if name == "loc" {
                    in_loc = false;
                }
            }
            Event::Text(e) => {
                if in_loc {
                    let loc = e.unescape().unwrap_or_default().trim().to_string();
                    if !loc.is_empty() {
                        locs.push(loc);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(locs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sitemap><loc>https://www.traveloka.com/sitemap/flight/index.xml.gz</loc></sitemap>
            <sitemap><loc>https://www.traveloka.com/sitemap/accommodation/hotel-detail/en-en.xml.gz</loc></sitemap>
            <sitemap><loc>https://www.traveloka.com/sitemap/activity/index.xml.gz</loc></sitemap>
        </sitemapindex>"#;

    const DETAIL_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>https://www.traveloka.com/en-en/hotel/indonesia/the-grand-hotel-12345</loc></url>
            <url><loc>https://www.traveloka.com/en-en/hotel/indonesia/other-place-67890</loc></url>
        </urlset>"#;

    #[test]
    fn picks_the_hotel_detail_sitemap_from_the_index() {
        let loc = find_hotel_detail_sitemap(INDEX_XML).unwrap();
        assert_eq!(
            loc,
            "https://www.traveloka.com/sitemap/accommodation/hotel-detail/en-en.xml.gz"
        );
    }

    #[test]
    fn index_without_hotel_detail_entry_is_not_found() {
        let xml = r#"<sitemapindex>
            <sitemap><loc>https://example.com/sitemap/flight.xml.gz</loc></sitemap>
        </sitemapindex>"#;
        assert!(matches!(
            find_hotel_detail_sitemap(xml),
            Err(RatesError::SitemapNotFound(_))
        ));
    }

    #[test]
    fn takes_only_the_first_hotel_url() {
        let url = first_hotel_url(DETAIL_XML).unwrap();
        assert_eq!(
            url,
            "https://www.traveloka.com/en-en/hotel/indonesia/the-grand-hotel-12345"
        );
    }

    #[test]
    fn empty_urlset_is_not_found() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#;
        assert!(matches!(
            first_hotel_url(xml),
            Err(RatesError::SitemapNotFound(_))
        ));
    }

    #[test]
    fn plain_xml_body_passes_through_undecoded() {
        let xml = decode_sitemap_body(DETAIL_XML.as_bytes()).unwrap();
        assert!(xml.contains("the-grand-hotel-12345"));
    }
}
