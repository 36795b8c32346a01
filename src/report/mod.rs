//! Derived daily figures. Everything here is recomputed from the settings
//! and the day record on each call; nothing is cached or stored.

use serde::Serialize;

use crate::ledger::DailyLedger;
use crate::settings::SettingsConfig;

/// Whether a distributor still owes money for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BalanceStatus {
    /// Balance is positive: part of the due amount is unpaid.
    Outstanding,
    /// Balance is zero or negative: fully settled, possibly overpaid.
    Settled,
}

/// One distributor's settled-up view for the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributorLine {
    pub name: String,
    pub delivered: u32,
    pub returned: u32,
    pub net: i64,
    pub unit_price: f64,
    pub total_due: f64,
    pub paid: f64,
    pub balance: f64,
    pub status: BalanceStatus,
}

/// The full day sheet: production, sales, money in, money owed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub expected_production: i64,
    pub units_sold: i64,
    /// Expected production minus units sold. Negative means the bakery
    /// sold more than the flour count predicts.
    pub deficit: i64,
    pub revenue_distributors: f64,
    pub revenue_other: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub average_distributor_price: f64,
    /// Estimated value of unsold units, never negative.
    pub loss_value: f64,
    pub net_profit: f64,
    pub total_cash_collected: f64,
    pub new_debt_today: f64,
    pub lines: Vec<DistributorLine>,
}

impl DailySummary {
    /// Computes the day sheet. Total for every input: missing ledger rows
    /// count as zero and an empty price list falls back to the default
    /// unit price, so this never fails.
    pub fn compute(settings: &SettingsConfig, ledger: &DailyLedger) -> Self {
        let expected_production =
            i64::from(ledger.flour_bags) * i64::from(settings.units_per_bag);

        let mut lines = Vec::with_capacity(settings.distributors.len());
        let mut units_sold = 0_i64;
        let mut revenue_distributors = 0.0;
        let mut paid_total = 0.0;
        for name in &settings.distributors {
            let entry = ledger.entry(name).copied().unwrap_or_default();
            let net = entry.net();
            let unit_price = settings.price_for(name);
            let total_due = net as f64 * unit_price;
            let balance = total_due - entry.paid;
            let status = if balance > 0.0 {
                BalanceStatus::Outstanding
            } else {
                BalanceStatus::Settled
            };
            units_sold += net;
            revenue_distributors += total_due;
            paid_total += entry.paid;
            lines.push(DistributorLine {
                name: name.clone(),
                delivered: entry.delivered,
                returned: entry.returned,
                net,
                unit_price,
                total_due,
                paid: entry.paid,
                balance,
                status,
            });
        }

        let revenue_other: f64 = settings
            .other_prices
            .iter()
            .map(|(item, price)| f64::from(ledger.quantity(item)) * price)
            .sum();
        let total_revenue = revenue_distributors + revenue_other;
        let total_expenses = settings.costs.labor
            + settings.costs.wood
            + f64::from(ledger.flour_bags) * settings.costs.misc_per_bag;
        let deficit = expected_production - units_sold;
        let average_distributor_price = settings.average_distributor_price();
        let loss_value = (deficit as f64 * average_distributor_price).max(0.0);

        Self {
            expected_production,
            units_sold,
            deficit,
            revenue_distributors,
            revenue_other,
            total_revenue,
            total_expenses,
            average_distributor_price,
            loss_value,
            net_profit: total_revenue - total_expenses - loss_value,
            total_cash_collected: paid_total + revenue_other,
            new_debt_today: revenue_distributors - paid_total,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::settings::CostConfig;

    fn day() -> DailyLedger {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).expect("valid date");
        DailyLedger::for_settings(date, &SettingsConfig::default())
    }

    #[test]
    fn expected_production_is_exact() {
        let settings = SettingsConfig::default();
        let mut ledger = day();
        ledger.record_production(10);
        let summary = DailySummary::compute(&settings, &ledger);
        assert_eq!(summary.expected_production, 16_000, "10 bags at 1600 units each");
    }

    #[test]
    fn distributor_line_carries_due_paid_and_balance() {
        let settings = SettingsConfig::default();
        let mut ledger = day();
        ledger.record_distribution("هيثم", 100, 10, 1_000.0);
        let summary = DailySummary::compute(&settings, &ledger);

        let line = summary
            .lines
            .iter()
            .find(|line| line.name == "هيثم")
            .expect("rostered distributor has a line");
        assert_eq!(line.net, 90);
        assert_eq!(line.total_due, 1_440.0, "90 units at the default 16");
        assert_eq!(line.balance, 440.0);
        assert_eq!(line.status, BalanceStatus::Outstanding);
    }

    #[test]
    fn overpaid_line_counts_as_settled() {
        let settings = SettingsConfig::default();
        let mut ledger = day();
        ledger.record_distribution("وجيه", 10, 0, 200.0);
        let summary = DailySummary::compute(&settings, &ledger);

        let line = summary
            .lines
            .iter()
            .find(|line| line.name == "وجيه")
            .expect("line exists");
        assert_eq!(line.balance, -40.0, "due 160, paid 200");
        assert_eq!(line.status, BalanceStatus::Settled, "negative balance is settled");
    }

    #[test]
    fn empty_price_list_falls_back_to_the_default_average() {
        let settings = SettingsConfig {
            distributor_prices: BTreeMap::new(),
            distributors: vec!["A".to_string()],
            ..SettingsConfig::default()
        };
        let mut ledger = DailyLedger::for_settings(
            NaiveDate::from_ymd_opt(2024, 5, 3).expect("valid date"),
            &settings,
        );
        ledger.record_production(1);
        let summary = DailySummary::compute(&settings, &ledger);
        assert_eq!(summary.average_distributor_price, 16.0);
        assert_eq!(summary.loss_value, 1_600.0 * 16.0, "whole bag unsold at the fallback price");
    }

    #[test]
    fn overselling_never_counts_as_loss() {
        let settings = SettingsConfig::default();
        let mut ledger = day();
        ledger.record_distribution("هيثم", 100, 0, 0.0);
        // No production recorded, so every sold unit is beyond expectation.
        let summary = DailySummary::compute(&settings, &ledger);
        assert_eq!(summary.deficit, -100, "deficit keeps its sign");
        assert_eq!(summary.loss_value, 0.0, "negative deficit never becomes a loss");
    }

    #[test]
    fn shortage_is_priced_at_the_roster_average() {
        let mut settings = SettingsConfig {
            units_per_bag: 100,
            distributor_prices: BTreeMap::new(),
            other_prices: BTreeMap::new(),
            costs: CostConfig::default(),
            distributors: Vec::new(),
        };
        settings.distributor_prices.insert("A".to_string(), 10.0);
        settings.distributor_prices.insert("B".to_string(), 30.0);
        settings.distributors.push("A".to_string());

        let date = NaiveDate::from_ymd_opt(2024, 5, 3).expect("valid date");
        let mut ledger = DailyLedger::for_settings(date, &settings);
        ledger.record_production(1);
        ledger.record_distribution("A", 40, 0, 0.0);

        let summary = DailySummary::compute(&settings, &ledger);
        assert_eq!(summary.average_distributor_price, 20.0, "stale entry still averaged");
        assert_eq!(summary.deficit, 60);
        assert_eq!(summary.loss_value, 1_200.0);
    }

    #[test]
    fn cash_and_debt_split_cleanly() {
        let settings = SettingsConfig::default();
        let mut ledger = day();
        ledger.record_production(10);
        ledger.record_distribution("هيثم", 100, 10, 1_000.0);
        ledger.record_distribution("وجيه", 50, 0, 800.0);
        ledger.record_other_sale("كيك", 3);

        let summary = DailySummary::compute(&settings, &ledger);
        assert_eq!(summary.revenue_distributors, 2_240.0);
        assert_eq!(summary.revenue_other, 300.0);
        assert_eq!(summary.total_cash_collected, 2_100.0, "paid amounts plus side sales");
        assert_eq!(summary.new_debt_today, 440.0, "due minus paid across the roster");
        assert_eq!(summary.total_expenses, 83_000.0, "labor, wood, and per-bag misc");
        assert_eq!(summary.units_sold, 140);
    }

    #[test]
    fn missing_rows_count_as_zero() {
        let settings = SettingsConfig::default();
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).expect("valid date");
        // A bare day with no seeded rows at all.
        let ledger = DailyLedger::new(date);
        let summary = DailySummary::compute(&settings, &ledger);
        assert_eq!(summary.units_sold, 0);
        assert_eq!(summary.lines.len(), settings.distributors.len());
        assert!(summary.lines.iter().all(|line| line.net == 0 && line.paid == 0.0));
    }
}
