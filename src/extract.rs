//! Rate extraction from a rendered hotel detail page.
//!
//! Pure transform of (HTML, page URL) into a list of [`RoomOffer`]s. The
//! page URL doubles as the guest-count source: its final dot-delimited
//! token is the adult count the deep-link builder embedded, and the
//! extractor trusts that the URL it was given produced the page.

use scraper::{ElementRef, Html, Node};

use crate::error::{RatesError, Result};
use crate::selectors::*;
use crate::types::RoomOffer;

const EXCLUDING_TAX_LABEL: &str = "Price excluding tax";
const TOTAL_PAYMENT_LABEL: &str = "Total payment";

/// Extract all room offers from a rendered detail page.
///
/// Empty HTML or a page without the room-listing container yields
/// `Ok(vec![])` — the page may be malformed or still loading, and the
/// caller decides how loudly to report that. Individual missing nodes
/// degrade to empty strings. Diverging positional lists (room rows vs.
/// the page-wide price lists) are a hard [`RatesError::DataIntegrity`]
/// failure instead of a silent misalignment.
pub fn extract_room_offers(html: &str, page_url: &str) -> Result<Vec<RoomOffer>> {
    if html.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc = Html::parse_document(html);
    let rooms: Vec<ElementRef> = doc.select(&ROOM_ROW_SELECTOR).collect();
    if rooms.is_empty() {
        return Ok(Vec::new());
    }

    // Page-level fields, shared by every offer on the page.
    let number_of_guests = page_url.rsplit('.').next().unwrap_or_default().to_string();
    let rate_name = doc
        .select(&RATE_DISPLAY_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("value"))
        .unwrap_or_default()
        .to_string();
    // Currency is read once from the page's first original-rate node, so
    // a multi-currency listing would be mis-tagged. Documented limitation.
    let shown_currency = first_token(&select_text(&doc.root_element(), &ORIGINAL_RATE_SELECTOR));

    let excluding_tax = texts_following_label(&doc, EXCLUDING_TAX_LABEL);
    let total_payment = texts_following_label(&doc, TOTAL_PAYMENT_LABEL);

    let priced_rooms = pair_rows(&rooms, &excluding_tax, &total_payment)?;

    let mut offers = Vec::with_capacity(priced_rooms.len());
    for (room, excl_text, total_text) in priced_rooms {
        let net_price = last_token(&select_text(&room, &CHEAPEST_RATE_SELECTOR));
        let original_price = last_token(&select_text(&room, &ORIGINAL_RATE_SELECTOR));
        let shown_price_per_stay = last_token(excl_text);
        let total_price_per_stay = last_token(total_text);
        let taxes_amount = derive_taxes(&total_price_per_stay, &shown_price_per_stay)?;

        offers.push(RoomOffer {
            room_name: select_text(&room, &ROOM_NAME_SELECTOR),
            rate_name: rate_name.clone(),
            shown_currency: shown_currency.clone(),
            net_price,
            original_price,
            total_price_per_stay,
            shown_price_per_stay,
            taxes_amount,
            cancellation_policy: select_text(&room, &CANCELLATION_SELECTOR),
            breakfast: select_text(&room, &BREAKFAST_SELECTOR),
            number_of_guests: number_of_guests.clone(),
        });
    }

    Ok(offers)
}

/// Pair each room row with its i-th entries from the two page-wide price
/// lists, refusing to pair when the counts diverge.
fn pair_rows<'a, 'b>(
    rooms: &'a [ElementRef<'a>],
    excluding_tax: &'b [String],
    total_payment: &'b [String],
) -> Result<Vec<(ElementRef<'a>, &'b str, &'b str)>> {
    if rooms.len() != excluding_tax.len() || rooms.len() != total_payment.len() {
        return Err(RatesError::DataIntegrity(format!(
            "positional lists diverge: {} room rows, {} excluding-tax values, {} total-payment values",
            rooms.len(),
            excluding_tax.len(),
            total_payment.len()
        )));
    }
    Ok(rooms
        .iter()
        .zip(excluding_tax)
        .zip(total_payment)
        .map(|((room, excl), total)| (*room, excl.as_str(), total.as_str()))
        .collect())
}

fn derive_taxes(total: &str, excluding: &str) -> Result<String> {
    let total: f64 = parse_price(total)?;
    let excluding: f64 = parse_price(excluding)?;
    Ok(format_tax(total - excluding))
}

fn parse_price(raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| RatesError::DataIntegrity(format!("unparseable price value: {raw:?}")))
}

/// Round to 2 decimals and render with at least one decimal digit, so an
/// integral tax comes out as `100000.0` rather than `100000`.
fn format_tax(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        rounded.to_string()
    }
}

/// First trimmed direct-text content of the first match under `scope`,
/// or `""` when absent.
fn select_text(scope: &ElementRef, selector: &scraper::Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(|el| direct_text(&el))
        .unwrap_or_default()
}

/// Text of an element's own text-node children (not descendants), trimmed.
fn direct_text(el: &ElementRef) -> String {
    let mut out = String::new();
    for child in el.children() {
        if let Node::Text(text) = child.value() {
            out.push_str(text);
        }
    }
    out.trim().to_string()
}

/// Document-order texts of the first `<div>` following each element whose
/// own text contains `label`. Mirrors how the price summary renders the
/// label and its value as adjacent nodes.
fn texts_following_label(doc: &Html, label: &str) -> Vec<String> {
    let nodes: Vec<_> = doc.root_element().descendants().collect();
    let mut out = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        let Some(el) = ElementRef::wrap(*node) else {
            continue;
        };
        if !direct_text(&el).contains(label) {
            continue;
        }
        for later in &nodes[i + 1..] {
            if let Some(candidate) = ElementRef::wrap(*later) {
                if candidate.value().name() == "div" {
                    out.push(direct_text(&candidate));
                    break;
                }
            }
        }
    }
    out
}

fn last_token(text: &str) -> String {
    text.split_whitespace().last().unwrap_or_default().to_string()
}

fn first_token(text: &str) -> String {
    text.split_whitespace().next().unwrap_or_default().to_string()
}
