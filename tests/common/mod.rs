#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Instant every CLI scenario is evaluated at: Thursday 2025-07-17 15:30 UTC.
pub const NOW: &str = "2025-07-17T15:30:00Z";

/// A document in the app's older export layout: vehicle nested under the
/// profile, rides under `expenses`, split ancillary costs, Mongo-style ids.
///
/// Mileage 20 km/L and 10 L bought at 100/L, so every km costs 5.
pub const LEGACY_DOCUMENT: &str = r#"{
  "profile": {
    "name": "Ravi",
    "vehicle": {
      "_id": {"$oid": "64f1c2a9e13b4b0012a4c9d1"},
      "name": "Dzire",
      "mileage": "20",
      "fuelEntries": [{"type": "Petrol", "litres": 10, "pricePerLitre": 100}]
    }
  },
  "expenses": [
    {"_id": "e1", "title": "Uber", "amount": 500, "distance": 100,
     "date": {"$date": "2025-07-17T09:00:00.000Z"}, "extraExpenses": 30, "otherExpenses": 20},
    {"_id": "e2", "title": "Ola", "amount": "300", "distance": 40,
     "date": "2025-07-14T18:45:00Z"},
    {"_id": "e3", "title": "Uber", "amount": 1000, "distance": 20,
     "date": "2025-06-02", "others": 100},
    {"_id": "e4", "amount": 50, "date": "not a date"}
  ]
}"#;

/// Creates a fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Writes `contents` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

/// Home directory with the legacy document under `rides.json` and config
/// pointing the data root at `<home>/snapshots`.
pub fn seeded_home() -> (PathBuf, PathBuf) {
    let home = temp_dir();
    let snapshot = write_file(&home, "rides.json", LEGACY_DOCUMENT);
    fs::create_dir_all(home.join("config")).expect("config dir");
    let config = serde_json::json!({
        "locale": "en-IN",
        "currency": "INR",
        "default_data_root": home.join("snapshots"),
    });
    fs::write(home.join("config").join("config.json"), config.to_string()).expect("write config");
    (home, snapshot)
}

/// The CLI binary with an isolated home and no colour or log noise.
pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("triplytics_cli").expect("binary exists");
    cmd.env("TRIPLYTICS_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}
