use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::settings::SettingsConfig;

/// One distributor's movement for the day: units taken out, units brought
/// back, and cash handed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub delivered: u32,
    pub returned: u32,
    pub paid: f64,
}

impl DistributionEntry {
    /// Units kept by the distributor. Negative when returns exceed
    /// deliveries, which models a correction of an earlier day.
    pub fn net(&self) -> i64 {
        i64::from(self.delivered) - i64::from(self.returned)
    }
}

/// The working record for a single bakery day.
///
/// Rows are keyed by name so iteration order is stable. Recording replaces
/// the whole row for that name; there is no increment semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLedger {
    pub date: NaiveDate,
    pub flour_bags: u32,
    pub distribution: BTreeMap<String, DistributionEntry>,
    pub other_sales: BTreeMap<String, u32>,
}

impl DailyLedger {
    /// Starts an empty day with no rows at all.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            flour_bags: 0,
            distribution: BTreeMap::new(),
            other_sales: BTreeMap::new(),
        }
    }

    /// Starts a day pre-seeded with a zero row for every rostered
    /// distributor and every priced side item.
    pub fn for_settings(date: NaiveDate, settings: &SettingsConfig) -> Self {
        let mut day = Self::new(date);
        day.sync_with(settings);
        day
    }

    /// Records how many flour bags were baked. Overwrites any earlier
    /// figure for the day.
    pub fn record_production(&mut self, flour_bags: u32) {
        self.flour_bags = flour_bags;
    }

    /// Returns the row for `name`, inserting a zero row first if the name
    /// has never been recorded today.
    pub fn entry_mut(&mut self, name: &str) -> &mut DistributionEntry {
        self.distribution.entry(name.to_string()).or_default()
    }

    /// Replaces the full movement row for one distributor.
    pub fn record_distribution(&mut self, name: &str, delivered: u32, returned: u32, paid: f64) {
        let entry = self.entry_mut(name);
        entry.delivered = delivered;
        entry.returned = returned;
        entry.paid = paid;
    }

    /// Replaces the quantity sold for one side item.
    pub fn record_other_sale(&mut self, item: &str, quantity: u32) {
        self.other_sales.insert(item.to_string(), quantity);
    }

    pub fn entry(&self, name: &str) -> Option<&DistributionEntry> {
        self.distribution.get(name)
    }

    /// Quantity sold for a side item, zero when nothing was recorded.
    pub fn quantity(&self, item: &str) -> u32 {
        self.other_sales.get(item).copied().unwrap_or(0)
    }

    /// Adds zero rows for names and items the settings know but the day
    /// does not. Existing rows are left untouched, and rows for names no
    /// longer in the settings stay as recorded.
    pub fn sync_with(&mut self, settings: &SettingsConfig) {
        for name in &settings.distributors {
            self.distribution.entry(name.clone()).or_default();
        }
        for item in settings.other_prices.keys() {
            self.other_sales.entry(item.clone()).or_insert(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DailyLedger {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).expect("valid date");
        DailyLedger::for_settings(date, &SettingsConfig::default())
    }

    #[test]
    fn for_settings_seeds_zero_rows() {
        let day = day();
        let defaults = SettingsConfig::default();
        assert_eq!(
            day.distribution.len(),
            defaults.distributors.len(),
            "every rostered distributor should get a row"
        );
        assert_eq!(
            day.other_sales.len(),
            defaults.other_prices.len(),
            "every priced side item should get a row"
        );
        assert!(
            day.distribution.values().all(|entry| *entry == DistributionEntry::default()),
            "seeded rows should all be zero"
        );
    }

    #[test]
    fn net_goes_negative_when_returns_exceed_deliveries() {
        let entry = DistributionEntry {
            delivered: 10,
            returned: 25,
            paid: 0.0,
        };
        assert_eq!(entry.net(), -15, "net should carry the sign of the correction");
    }

    #[test]
    fn entry_mut_inserts_a_zero_row_lazily() {
        let mut day = day();
        assert!(day.entry("زائر").is_none(), "unrecorded name should have no row");
        day.entry_mut("زائر").paid = 500.0;
        let entry = day.entry("زائر").expect("row inserted on first access");
        assert_eq!(entry.delivered, 0);
        assert_eq!(entry.paid, 500.0);
    }

    #[test]
    fn recording_replaces_the_previous_row() {
        let mut day = day();
        day.record_distribution("هيثم", 100, 10, 1_000.0);
        day.record_distribution("هيثم", 80, 5, 900.0);
        let entry = day.entry("هيثم").expect("row exists");
        assert_eq!(entry.delivered, 80, "second recording should overwrite the first");
        assert_eq!(entry.returned, 5);
        assert_eq!(entry.paid, 900.0);

        day.record_other_sale("كيك", 3);
        day.record_other_sale("كيك", 7);
        assert_eq!(day.quantity("كيك"), 7, "side sales should also overwrite");
    }

    #[test]
    fn sync_with_only_adds_missing_rows() {
        let mut day = day();
        day.record_distribution("هيثم", 100, 10, 1_000.0);

        let mut settings = SettingsConfig::default();
        settings.update_roster(["هيثم", "سمير"]);
        day.sync_with(&settings);

        let kept = day.entry("هيثم").expect("existing row kept");
        assert_eq!(kept.delivered, 100, "sync must not reset recorded rows");
        assert!(day.entry("سمير").is_some(), "new roster name should gain a row");
        assert!(
            day.entry("وجيه").is_some(),
            "rows for names dropped from the roster stay recorded"
        );
    }
}
