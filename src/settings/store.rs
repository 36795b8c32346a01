use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::errors::StorageError;
use crate::utils;

use super::{CostKind, PriceKind, SettingsConfig};

const TMP_SUFFIX: &str = "tmp";

/// Owns the persistent [`SettingsConfig`] and its backing file.
///
/// A missing file yields defaults; a present but unparseable file is an
/// error. Every mutating operation writes the full record back to disk
/// before returning, staging to a sibling temp file and renaming so a
/// failed write leaves the previous contents intact.
#[derive(Debug)]
pub struct SettingsStore {
    config: SettingsConfig,
    path: PathBuf,
}

impl SettingsStore {
    /// Opens the store backed by `path`, starting from defaults when the
    /// file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let config = if path.exists() {
            let data = fs::read_to_string(&path).map_err(|source| StorageError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&data).map_err(|source| StorageError::Malformed {
                path: path.clone(),
                source,
            })?
        } else {
            tracing::debug!("no settings file at {}, using defaults", path.display());
            SettingsConfig::default()
        };
        Ok(Self { config, path })
    }

    /// Opens the store at the canonical location under the app data
    /// directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(utils::settings_file())
    }

    pub fn config(&self) -> &SettingsConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the current settings and replaces the file atomically.
    /// Saving unchanged state reproduces the file byte for byte.
    pub fn save(&self) -> Result<(), StorageError> {
        let json =
            serde_json::to_string_pretty(&self.config).map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, source),
            })?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("settings saved to {}", self.path.display());
        Ok(())
    }

    /// Sets a unit price in the chosen list and persists immediately.
    /// Inserting a name absent from the roster is allowed and simply
    /// creates a standing entry.
    pub fn set_price(
        &mut self,
        kind: PriceKind,
        name: impl Into<String>,
        value: f64,
    ) -> Result<(), StorageError> {
        let list = match kind {
            PriceKind::Distributor => &mut self.config.distributor_prices,
            PriceKind::OtherItem => &mut self.config.other_prices,
        };
        list.insert(name.into(), value);
        self.save()
    }

    /// Sets the flour-bag conversion factor and persists immediately.
    pub fn set_units_per_bag(&mut self, value: u32) -> Result<(), StorageError> {
        self.config.units_per_bag = value;
        self.save()
    }

    /// Sets one fixed cost line and persists immediately.
    pub fn set_cost(&mut self, kind: CostKind, value: f64) -> Result<(), StorageError> {
        match kind {
            CostKind::Labor => self.config.costs.labor = value,
            CostKind::Wood => self.config.costs.wood = value,
            CostKind::MiscPerBag => self.config.costs.misc_per_bag = value,
        }
        self.save()
    }

    /// Replaces the distributor roster (see
    /// [`SettingsConfig::update_roster`]) and persists immediately.
    pub fn update_roster<I, S>(&mut self, names: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.update_roster(names);
        tracing::info!("roster updated: {} distributors", self.config.distributors.len());
        self.save()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
