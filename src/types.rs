use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RatesError, Result};

/// Stay dates arrive and leave in this textual form; they are never reformatted.
pub const STAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Reusable components of a hotel detail URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelUriParts {
    /// Scheme + host + locale-prefixed path, always with a trailing `/`.
    pub base_url: String,
    /// Locale path segment, e.g. `en-en`.
    pub locale: String,
    /// Final hyphen-delimited token of the slug.
    pub hotel_id: String,
    /// Slug tokens preceding the id, hyphens replaced by spaces, title-cased.
    pub hotel_name: String,
}

/// Stay parameters for a deep link. Counts stay as strings because the
/// spec string embeds them verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayQuery {
    pub check_in: String,
    pub check_out: String,
    pub adults: String,
    pub rooms: String,
}

impl StayQuery {
    /// Number of nights between check-in and check-out.
    ///
    /// Validation-only: the value never appears in the deep link, but an
    /// unparseable date or a non-positive range aborts before any fetch.
    pub fn nights(&self) -> Result<i64> {
        let d_in = parse_stay_date(&self.check_in)?;
        let d_out = parse_stay_date(&self.check_out)?;
        let nights = (d_out - d_in).num_days();
        if nights <= 0 {
            return Err(RatesError::InvalidDateRange {
                check_in: self.check_in.clone(),
                check_out: self.check_out.clone(),
            });
        }
        Ok(nights)
    }
}

fn parse_stay_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, STAY_DATE_FORMAT)
        .map_err(|_| RatesError::InvalidDate(raw.to_string()))
}

/// One bookable room row from the detail page listing.
///
/// All fields are strings; a missing node degrades to `""` rather than
/// aborting the extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOffer {
    pub room_name: String,
    pub rate_name: String,
    pub shown_currency: String,
    pub net_price: String,
    pub original_price: String,
    pub total_price_per_stay: String,
    pub shown_price_per_stay: String,
    pub taxes_amount: String,
    pub cancellation_policy: String,
    pub breakfast: String,
    pub number_of_guests: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stay(check_in: &str, check_out: &str) -> StayQuery {
        StayQuery {
            check_in: check_in.into(),
            check_out: check_out.into(),
            adults: "2".into(),
            rooms: "1".into(),
        }
    }

    #[test]
    fn nights_counts_calendar_days() {
        assert_eq!(stay("16-12-2025", "18-12-2025").nights().unwrap(), 2);
    }

    #[test]
    fn nights_rejects_same_day() {
        let err = stay("16-12-2025", "16-12-2025").nights().unwrap_err();
        assert!(matches!(err, RatesError::InvalidDateRange { .. }));
    }

    #[test]
    fn nights_rejects_inverted_range() {
        let err = stay("18-12-2025", "16-12-2025").nights().unwrap_err();
        assert!(matches!(err, RatesError::InvalidDateRange { .. }));
    }

    #[test]
    fn nights_rejects_garbage_date() {
        let err = stay("2025-12-16", "18-12-2025").nights().unwrap_err();
        assert!(matches!(err, RatesError::InvalidDate(_)));
    }
}
