//! Persistence sink for extracted offers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::RoomOffer;

/// Writes the full offer list as a pretty-printed JSON array, replacing
/// any previous run's output.
pub struct RatesStore {
    path: PathBuf,
}

impl RatesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, offers: &[RoomOffer]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, offers)?;
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<RoomOffer>> {
        let file = fs::File::open(&self.path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_offer(name: &str) -> RoomOffer {
        RoomOffer {
            room_name: name.to_string(),
            rate_name: "Total price".into(),
            shown_currency: "IDR".into(),
            net_price: "1000000".into(),
            original_price: "1200000".into(),
            total_price_per_stay: "1100000".into(),
            shown_price_per_stay: "1000000".into(),
            taxes_amount: "100000.0".into(),
            cancellation_policy: "Free cancellation".into(),
            breakfast: "Breakfast included".into(),
            number_of_guests: "2".into(),
        }
    }

    fn temp_store(label: &str) -> RatesStore {
        let path = std::env::temp_dir().join(format!("ratelink-{label}-{}.json", std::process::id()));
        RatesStore::new(path)
    }

    #[test]
    fn save_then_load_round_trips_field_for_field() {
        let store = temp_store("roundtrip");
        let offers = vec![sample_offer("Deluxe Twin"), sample_offer("Suite")];
        store.save(&offers).unwrap();
        assert_eq!(store.load().unwrap(), offers);
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn save_overwrites_previous_run() {
        let store = temp_store("overwrite");
        store.save(&[sample_offer("First"), sample_offer("Second")]).unwrap();
        store.save(&[sample_offer("Only")]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].room_name, "Only");
        let _ = fs::remove_file(store.path());
    }
}
