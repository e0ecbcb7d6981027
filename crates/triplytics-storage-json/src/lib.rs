//! triplytics-storage-json
//!
//! Filesystem-backed JSON snapshots. Reading goes through the layout adapter,
//! so documents exported by any revision of the app load into the canonical
//! shape; writing always produces the canonical shape.

pub mod adapter;
pub mod error;

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{info, warn};
use triplytics_domain::TripSnapshot;

pub use adapter::{adapt_document, AdaptReport};
pub use error::StorageError;

const SNAPSHOT_EXTENSION: &str = "json";
const STAGING_SUFFIX: &str = "partial";

/// Directory of named snapshots, one JSON file each.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    root: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(root: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(name), SNAPSHOT_EXTENSION))
    }

    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn load(&self, name: &str) -> Result<TripSnapshot, StorageError> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        load_snapshot(&path)
    }

    pub fn save(&self, name: &str, snapshot: &TripSnapshot) -> Result<PathBuf, StorageError> {
        let path = self.snapshot_path(name);
        save_snapshot(snapshot, &path)?;
        Ok(path)
    }
}

/// Parses snapshot JSON in any supported layout.
pub fn parse_snapshot(data: &str) -> Result<TripSnapshot, StorageError> {
    let document: serde_json::Value = serde_json::from_str(data)?;
    let (snapshot, report) = adapt_document(&document)?;
    if report.coerced_fields > 0 || report.undated_trips > 0 {
        warn!(
            trips = report.trips,
            coerced = report.coerced_fields,
            undated = report.undated_trips,
            "snapshot contained malformed records"
        );
    }
    Ok(snapshot)
}

/// Loads a snapshot from the provided filesystem path.
pub fn load_snapshot(path: &Path) -> Result<TripSnapshot, StorageError> {
    let data = fs::read_to_string(path)?;
    let snapshot = parse_snapshot(&data)?;
    info!(
        path = %path.display(),
        trips = snapshot.trips.len(),
        has_vehicle = snapshot.vehicle.is_some(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Saves a snapshot in canonical form to an arbitrary path on disk.
///
/// The document is staged beside `path` and renamed over it, so readers never
/// observe a half-written file.
pub fn save_snapshot(snapshot: &TripSnapshot, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = staging_path(path);
    {
        let mut writer = BufWriter::new(File::create(&staging)?);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
    }
    fs::rename(&staging, path)?;
    Ok(())
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "snapshot".into()
    } else {
        sanitized
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::canonical_name;

    #[test]
    fn canonical_names_are_filesystem_safe() {
        assert_eq!(canonical_name("July Rides"), "july_rides");
        assert_eq!(canonical_name("week-29"), "week-29");
        assert_eq!(canonical_name("../"), "snapshot");
    }
}
