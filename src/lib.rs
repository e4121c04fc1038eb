#![doc = include_str!("../README.md")]

pub mod api;
pub mod cli;
pub mod error;
pub mod extract;
pub mod link;
pub mod log;
pub mod render;
pub mod selectors;
pub mod sitemap;
pub mod store;
pub mod types;

pub use error::{RatesError, Result};
pub use extract::extract_room_offers;
pub use link::{build_deep_link, decompose};
pub use types::*;
