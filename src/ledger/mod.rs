//! In-memory day records: production, per-distributor movement, side sales.

mod daily;

pub use daily::{DailyLedger, DistributionEntry};
