mod common;

use std::fs;

use bakery_core::errors::StorageError;
use bakery_core::settings::{PriceKind, SettingsStore, DEFAULT_UNIT_PRICE};
use serde_json::Value;

#[test]
fn missing_file_starts_from_defaults() {
    let path = common::settings_path();
    let store = SettingsStore::open(&path).expect("open with no file");
    assert!(!path.exists(), "open must not create the file");
    let config = store.config();
    assert_eq!(config.units_per_bag, 1_600);
    assert_eq!(config.distributors.len(), 6);
    assert_eq!(config.price_for("هيثم"), DEFAULT_UNIT_PRICE);
}

#[test]
fn malformed_file_surfaces_error() {
    let path = common::settings_path();
    fs::write(&path, "{ not json").expect("write malformed file");
    let err = SettingsStore::open(&path).expect_err("malformed settings must not fall back");
    assert!(
        matches!(err, StorageError::Malformed { .. }),
        "expected Malformed, got {err:?}"
    );
}

#[test]
fn save_then_open_round_trips() {
    let path = common::settings_path();
    let mut store = SettingsStore::open(&path).expect("open");
    store
        .set_price(PriceKind::Distributor, "هيثم", 18.0)
        .expect("set price");
    store.set_units_per_bag(1_500).expect("set units");

    let reopened = SettingsStore::open(&path).expect("reopen");
    assert_eq!(
        reopened.config(),
        store.config(),
        "disk state should match memory"
    );
    assert_eq!(reopened.config().distributor_prices["هيثم"], 18.0);
    assert_eq!(reopened.config().units_per_bag, 1_500);
}

#[test]
fn resave_without_changes_is_byte_identical() {
    let path = common::settings_path();
    let mut store = SettingsStore::open(&path).expect("open");
    store
        .set_price(PriceKind::OtherItem, "كيك", 120.0)
        .expect("seed a change");
    let first = fs::read_to_string(&path).expect("read first save");
    store.save().expect("resave unchanged state");
    let second = fs::read_to_string(&path).expect("read resave");
    assert_eq!(first, second, "identical state must produce identical bytes");
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let path = common::settings_path();
    let mut store = SettingsStore::open(&path).expect("open");
    store.set_units_per_bag(1_600).expect("initial save");
    let original = fs::read_to_string(&path).expect("read original file");

    // Create a directory that collides with the staging file name to force
    // the write to fail before the rename.
    let tmp_path = path.with_extension("json.tmp");
    fs::create_dir_all(&tmp_path).unwrap();

    let result = store.set_units_per_bag(999);
    assert!(
        result.is_err(),
        "expected save to fail when the staging path is a directory"
    );

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(
        current, original,
        "atomic save failure must not corrupt the original file"
    );

    // With the collision gone the same change saves cleanly.
    fs::remove_dir_all(&tmp_path).unwrap();
    store.set_units_per_bag(999).expect("save after cleanup");
    let recovered: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(recovered["units_per_bag"], 999);
}

#[test]
fn save_creates_missing_parent_directories() {
    let path = common::settings_path();
    let nested = path
        .parent()
        .expect("settings path has a parent")
        .join("nested/deeper/settings.json");
    let mut store = SettingsStore::open(&nested).expect("open");
    store.set_units_per_bag(800).expect("save into missing dirs");
    assert!(nested.exists(), "save should create parent directories");
}

#[test]
fn roster_update_keeps_stale_prices_and_seeds_new_names() {
    let path = common::settings_path();
    let mut store = SettingsStore::open(&path).expect("open");
    store.update_roster(["A", "B"]).expect("set roster");
    store
        .set_price(PriceKind::Distributor, "B", 20.0)
        .expect("price B");

    store.update_roster(["A", "C"]).expect("replace roster");
    let config = store.config();
    assert_eq!(config.distributors, ["A", "C"]);
    assert_eq!(
        config.distributor_prices["B"], 20.0,
        "departed name keeps its price entry"
    );
    assert_eq!(
        config.distributor_prices["C"], DEFAULT_UNIT_PRICE,
        "new name is seeded at the default price"
    );

    let reopened = SettingsStore::open(&path).expect("reopen");
    assert_eq!(
        reopened.config().distributor_prices.len(),
        config.distributor_prices.len()
    );
}

#[test]
fn non_ascii_names_round_trip() {
    let path = common::settings_path();
    let store = SettingsStore::open(&path).expect("open");
    store.save().expect("write defaults");
    let text = fs::read_to_string(&path).expect("read file");
    assert!(
        text.contains("هيثم"),
        "names should be stored verbatim, not escaped"
    );
    let reopened = SettingsStore::open(&path).expect("reopen");
    assert!(reopened.config().distributor_prices.contains_key("هيثم"));
}
