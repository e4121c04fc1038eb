//! Hotel URL decomposition and deep-link construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{RatesError, Result};
use crate::types::{HotelUriParts, StayQuery};

/// Percent-encoding set matching urllib's `quote` defaults: alphanumerics
/// plus `-._~` and `/` stay literal, everything else (spaces included)
/// is escaped.
const QUOTE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Split a hotel detail URL into reusable parts.
///
/// The URL is split on `/`; positions 0..=4 (scheme marker, empty, host,
/// locale-prefix segment, locale) rebuild `base_url`, and the final
/// segment is the slug. A URL too short to address those positions fails
/// with [`RatesError::MalformedUrl`].
///
/// Degenerate slug policy: a slug with no hyphen yields the whole slug as
/// `hotel_id` and an empty `hotel_name`.
pub fn decompose(hotel_url: &str) -> Result<HotelUriParts> {
    let parts: Vec<&str> = hotel_url.split('/').collect();
    if parts.len() < 6 {
        return Err(RatesError::MalformedUrl(hotel_url.to_string()));
    }

    let base_url = format!("{}//{}/{}/{}/", parts[0], parts[2], parts[3], parts[4]);
    let locale = parts[3].to_string();

    let slug = parts[parts.len() - 1];
    let mut tokens: Vec<&str> = slug.split('-').collect();
    let hotel_id = tokens.pop().unwrap_or_default().to_string();
    let hotel_name = tokens
        .iter()
        .map(|t| title_case(t))
        .collect::<Vec<_>>()
        .join(" ");

    Ok(HotelUriParts {
        base_url,
        locale,
        hotel_id,
        hotel_name,
    })
}

/// Build the deep-link URL for a hotel detail page with stay parameters
/// pre-filled.
///
/// The night count is validated (checkout strictly after checkin) but is
/// not embedded in the spec string. Dates pass through in their original
/// DD-MM-YYYY text; only the hotel name is percent-encoded.
pub fn build_deep_link(parts: &HotelUriParts, stay: &StayQuery) -> Result<String> {
    stay.nights()?;

    let encoded_name = utf8_percent_encode(&parts.hotel_name, QUOTE_SET);
    let spec = format!(
        "{}.{}.{}.{}.HOTEL.{}.{}.{}",
        stay.check_in, stay.check_out, stay.adults, stay.rooms, parts.hotel_id, encoded_name, stay.adults
    );

    Ok(format!("{}detail?spec={}", parts.base_url, spec))
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOTEL_URL: &str = "https://www.traveloka.com/en-en/hotel/indonesia/the-grand-hotel-12345";

    fn stay() -> StayQuery {
        StayQuery {
            check_in: "16-12-2025".into(),
            check_out: "18-12-2025".into(),
            adults: "2".into(),
            rooms: "1".into(),
        }
    }

    #[test]
    fn decompose_splits_slug_at_id_boundary() {
        let parts = decompose(HOTEL_URL).unwrap();
        assert_eq!(parts.base_url, "https://www.traveloka.com/en-en/hotel/");
        assert_eq!(parts.locale, "en-en");
        assert_eq!(parts.hotel_id, "12345");
        assert_eq!(parts.hotel_name, "The Grand Hotel");
    }

    #[test]
    fn decompose_is_lossless_over_the_slug() {
        let parts = decompose(HOTEL_URL).unwrap();
        let rebuilt = format!(
            "{}-{}",
            parts.hotel_name.to_lowercase().replace(' ', "-"),
            parts.hotel_id
        );
        assert_eq!(rebuilt, "the-grand-hotel-12345");
    }

    #[test]
    fn decompose_rejects_short_urls() {
        for url in ["https://example.com", "foo/bar", "https://www.traveloka.com/en-en"] {
            assert!(matches!(
                decompose(url),
                Err(RatesError::MalformedUrl(_))
            ));
        }
    }

    #[test]
    fn decompose_handles_hyphenless_slug() {
        let parts =
            decompose("https://www.traveloka.com/en-en/hotel/indonesia/12345").unwrap();
        assert_eq!(parts.hotel_id, "12345");
        assert_eq!(parts.hotel_name, "");
    }

    #[test]
    fn build_embeds_spec_with_encoded_name() {
        let parts = decompose(HOTEL_URL).unwrap();
        let link = build_deep_link(&parts, &stay()).unwrap();
        assert_eq!(
            link,
            "https://www.traveloka.com/en-en/hotel/detail?spec=16-12-2025.18-12-2025.2.1.HOTEL.12345.The%20Grand%20Hotel.2"
        );
    }

    #[test]
    fn build_rejects_non_positive_night_count() {
        let parts = decompose(HOTEL_URL).unwrap();
        let mut bad = stay();
        bad.check_out = bad.check_in.clone();
        assert!(matches!(
            build_deep_link(&parts, &bad),
            Err(RatesError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn build_keeps_dates_textually_untouched() {
        let parts = decompose(HOTEL_URL).unwrap();
        let link = build_deep_link(&parts, &stay()).unwrap();
        assert!(link.contains("16-12-2025.18-12-2025"));
        // The adult count is repeated as the final spec token.
        assert!(link.ends_with(".2"));
    }
}
