//! Persistent bakery settings: unit economics, the two price lists, the
//! distributor roster, and fixed daily costs.

mod store;

pub use store::SettingsStore;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unit price assigned to a distributor that has no explicit entry yet.
pub const DEFAULT_UNIT_PRICE: f64 = 16.0;

const DEFAULT_UNITS_PER_BAG: u32 = 1600;

/// Which price list a price edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceKind {
    Distributor,
    OtherItem,
}

/// Which fixed cost a cost edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostKind {
    Labor,
    Wood,
    MiscPerBag,
}

/// Fixed daily costs. Labor and wood are flat per day; the misc line
/// scales with the number of flour bags used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    pub labor: f64,
    pub wood: f64,
    pub misc_per_bag: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            labor: 53_000.0,
            wood: 20_000.0,
            misc_per_bag: 1_000.0,
        }
    }
}

/// The full persistent configuration record.
///
/// `distributor_prices` is keyed by a superset of `distributors`: entries
/// outlive roster removal so a returning name keeps its old price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_units_per_bag")]
    pub units_per_bag: u32,
    #[serde(default)]
    pub distributor_prices: BTreeMap<String, f64>,
    #[serde(default)]
    pub other_prices: BTreeMap<String, f64>,
    #[serde(default)]
    pub costs: CostConfig,
    #[serde(default)]
    pub distributors: Vec<String>,
}

fn default_units_per_bag() -> u32 {
    DEFAULT_UNITS_PER_BAG
}

impl Default for SettingsConfig {
    fn default() -> Self {
        let distributors: Vec<String> = ["هيثم", "وجيه", "المفرش", "علي", "درهم", "كاش"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let distributor_prices = distributors
            .iter()
            .map(|name| (name.clone(), DEFAULT_UNIT_PRICE))
            .collect();
        let other_prices = BTreeMap::from([
            ("روتي طويل".to_string(), 50.0),
            ("كيك".to_string(), 100.0),
            ("خبز".to_string(), 30.0),
            ("فحم".to_string(), 200.0),
        ]);
        Self {
            units_per_bag: DEFAULT_UNITS_PER_BAG,
            distributor_prices,
            other_prices,
            costs: CostConfig::default(),
            distributors,
        }
    }
}

impl SettingsConfig {
    /// Unit price for `name`, falling back to [`DEFAULT_UNIT_PRICE`] when
    /// the distributor has no entry.
    pub fn price_for(&self, name: &str) -> f64 {
        self.distributor_prices
            .get(name)
            .copied()
            .unwrap_or(DEFAULT_UNIT_PRICE)
    }

    /// Mean unit price over every known entry, including those kept for
    /// names no longer on the roster. Falls back to
    /// [`DEFAULT_UNIT_PRICE`] when no entries exist at all.
    pub fn average_distributor_price(&self) -> f64 {
        if self.distributor_prices.is_empty() {
            return DEFAULT_UNIT_PRICE;
        }
        let total: f64 = self.distributor_prices.values().sum();
        total / self.distributor_prices.len() as f64
    }

    /// Replaces the roster with `names`, trimming whitespace, dropping
    /// blanks, and deduplicating while keeping first-occurrence order.
    /// Every new name gets a [`DEFAULT_UNIT_PRICE`] entry; departed names
    /// keep theirs.
    pub fn update_roster<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster: Vec<String> = Vec::new();
        for name in names {
            let trimmed = name.as_ref().trim();
            if trimmed.is_empty() || roster.iter().any(|existing| existing.as_str() == trimmed) {
                continue;
            }
            roster.push(trimmed.to_string());
        }
        for name in &roster {
            self.distributor_prices
                .entry(name.clone())
                .or_insert(DEFAULT_UNIT_PRICE);
        }
        self.distributors = roster;
    }
}
