//! Saved locations and where they are persisted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::{Coordinates, LocationKey, LocationQuery};

/// One saved location. Serialized as `{"type":"city","name":..}` or
/// `{"type":"coords","lat":..,"lon":..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Favorite {
    City { name: String },
    Coords { lat: f64, lon: f64 },
}

impl Favorite {
    pub fn city(name: impl Into<String>) -> Self {
        Favorite::City { name: name.into() }
    }

    pub fn coords(coords: Coordinates) -> Self {
        Favorite::Coords {
            lat: coords.lat,
            lon: coords.lon,
        }
    }

    pub fn query(&self) -> LocationQuery {
        match self {
            Favorite::City { name } => LocationQuery::City(name.clone()),
            Favorite::Coords { lat, lon } => LocationQuery::Coords(Coordinates::new(*lat, *lon)),
        }
    }

    /// The key that removes this entry.
    pub fn key(&self) -> LocationKey {
        match self {
            Favorite::City { name } => LocationKey::City(name.clone()),
            Favorite::Coords { .. } => LocationKey::CurrentLocation,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Favorite::City { name } => name,
            Favorite::Coords { .. } => "Current Location",
        }
    }

    fn matches(&self, key: &LocationKey) -> bool {
        match (self, key) {
            (Favorite::City { name }, LocationKey::City(target)) => name == target,
            (Favorite::Coords { .. }, LocationKey::CurrentLocation) => true,
            _ => false,
        }
    }
}

/// Append a city unless an entry with that name already exists.
pub fn add_city(favorites: &mut Vec<Favorite>, name: &str) -> bool {
    let exists = favorites
        .iter()
        .any(|f| matches!(f, Favorite::City { name: n } if n == name));
    if exists {
        return false;
    }
    favorites.push(Favorite::city(name));
    true
}

/// Coordinates are appended unconditionally.
pub fn add_coords(favorites: &mut Vec<Favorite>, coords: Coordinates) {
    favorites.push(Favorite::coords(coords));
}

/// Drop every entry matching `key`; returns how many were removed.
///
/// `LocationKey::CurrentLocation` removes coordinate entries whatever their values.
pub fn remove(favorites: &mut Vec<Favorite>, key: &LocationKey) -> usize {
    let before = favorites.len();
    favorites.retain(|f| !f.matches(key));
    before - favorites.len()
}

/// Persistence for the favorites list.
pub trait FavoriteStore: Send + Sync + std::fmt::Debug {
    fn load(&self) -> Result<Vec<Favorite>>;
    fn save(&self, favorites: &[Favorite]) -> Result<()>;
}

/// Stores favorites as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoriteStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Favorite>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read favorites file: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse favorites file: {}", self.path.display()))
    }

    fn save(&self, favorites: &[Favorite]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create favorites directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(favorites)
            .context("Failed to serialize favorites to JSON")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write favorites file: {}", self.path.display()))
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct InMemoryStore {
    pub entries: std::sync::Mutex<Vec<Favorite>>,
}

#[cfg(test)]
impl InMemoryStore {
    pub fn with(entries: Vec<Favorite>) -> Self {
        Self {
            entries: std::sync::Mutex::new(entries),
        }
    }

    pub fn snapshot(&self) -> Vec<Favorite> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl FavoriteStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Favorite>> {
        Ok(self.snapshot())
    }

    fn save(&self, favorites: &[Favorite]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("store poisoned"))?;
        *entries = favorites.to_vec();
        Ok(())
    }
}
