//! Shared Selectors
//!
//! Test-identifier selectors for the hotel detail page markup. These are
//! stable attributes meant for structured extraction, independent of
//! styling.

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for the room rows: direct children of the listing container.
pub static ROOM_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid="room-list-tray"] > div"#).expect("valid room row selector")
});

/// Selector for the room name node (suffixed with a per-room id).
pub static ROOM_NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid^="room-name-"]"#).expect("valid room name selector")
});

/// Selector for the breakfast-inclusion label.
pub static BREAKFAST_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid="room_inventory_breakfast"]"#)
        .expect("valid breakfast selector")
});

/// Selector for the cancellation-policy label.
pub static CANCELLATION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid="text_cancellation_policy"]"#)
        .expect("valid cancellation selector")
});

/// Selector for the struck-through original rate (suffixed per room).
pub static ORIGINAL_RATE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid^="inv-original-rate-"]"#)
        .expect("valid original rate selector")
});

/// Selector for the cheapest shown rate.
pub static CHEAPEST_RATE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid="room_inventory_cheapest_rate"]"#)
        .expect("valid cheapest rate selector")
});

/// Selector for the rate-display configuration control.
pub static RATE_DISPLAY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid="price-display-config-selector"]"#)
        .expect("valid rate selector selector")
});
