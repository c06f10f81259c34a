//! Local persistence of saved insights and the remembered income.
//!
//! Both stores are plain JSON files owned by the caller; nothing here
//! is shared between users or sent anywhere.

use crate::engine::round_to_cents;
use crate::models::{IncomeDescription, Presentation, SavedInsight, TimeCostBreakdown};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info};

pub const INSIGHTS_FILE: &str = "saved-items.json";
pub const PROFILE_FILE: &str = "income.json";

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("an insight needs a name before it can be saved")]
    MissingName,

    #[error("insight {field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl InsightError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        InsightError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        InsightError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightError>;

/// The ordered list of insights a user has saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsightStore {
    items: Vec<SavedInsight>,
}

impl InsightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the store from `path`.  A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved insights yet");
                return Ok(Self::new());
            }
            Err(err) => return Err(InsightError::io(path, err)),
        };
        let store: Self = serde_json::from_str(&data).map_err(|e| InsightError::json(path, e))?;
        debug!(path = %path.display(), count = store.items.len(), "loaded saved insights");
        Ok(store)
    }

    /// Writes the store to `path` as pretty-printed JSON, creating the
    /// parent directory if needed.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).map_err(|e| InsightError::json(path, e))?;
        write_file(path, &data)
    }

    /// Saves a named insight and returns its id.
    ///
    /// Price and rate are kept rounded to cents.  Ids are derived from
    /// the current time but always exceed every id already stored.
    pub fn save(
        &mut self,
        name: &str,
        price: f64,
        time_cost: TimeCostBreakdown,
        hourly_rate: f64,
    ) -> Result<u64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InsightError::MissingName);
        }
        check_finite("price", price)?;
        check_finite("hourly rate", hourly_rate)?;
        check_finite("total hours", time_cost.total_hours)?;
        check_finite("workday hours", time_cost.workday_hours_used)?;
        if let Presentation::DaysAndHours {
            remaining_hours, ..
        } = time_cost.presentation
        {
            check_finite("remaining hours", remaining_hours)?;
        }
        let next = self.items.iter().map(|i| i.id + 1).max().unwrap_or(0);
        let id = now_millis().max(next);
        self.items.push(SavedInsight {
            id,
            name: name.to_string(),
            price: round_to_cents(price),
            time_cost,
            hourly_rate: round_to_cents(hourly_rate),
        });
        info!(id, name, "saved insight");
        Ok(id)
    }

    /// Removes the insight with `id`.  Returns whether one was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before != self.items.len()
    }

    pub fn get(&self, id: u64) -> Option<&SavedInsight> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[SavedInsight] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The "remember me" income snapshot.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn remember(&self, income: &IncomeDescription) -> Result<()> {
        let data =
            serde_json::to_string_pretty(income).map_err(|e| InsightError::json(&self.path, e))?;
        write_file(&self.path, &data)
    }

    /// The remembered income, or `None` if nothing is remembered.
    pub fn recall(&self) -> Result<Option<IncomeDescription>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data)
                .map(Some)
                .map_err(|e| InsightError::json(&self.path, e)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(InsightError::io(&self.path, err)),
        }
    }

    pub fn forget(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InsightError::io(&self.path, err)),
        }
    }
}

// JSON has no representation for NaN or infinity; such a record would
// make the whole file unreadable.
fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InsightError::NonFinite { field })
    }
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| InsightError::io(parent, e))?;
    }
    std::fs::write(path, data).map_err(|e| InsightError::io(path, e))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
