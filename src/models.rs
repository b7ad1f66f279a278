use crate::categories::{self, CATEGORIES};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::warn;

/// One completed orbital within a day, persisted as `"{category}:{orbital}"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityKey {
    pub category_id: String,
    pub orbital: String,
}

impl ActivityKey {
    pub fn new(category_id: impl Into<String>, orbital: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            orbital: orbital.into(),
        }
    }
}

impl fmt::Display for ActivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category_id, self.orbital)
    }
}

impl From<ActivityKey> for String {
    fn from(key: ActivityKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ActivityKey {
    type Error = String;

    // Category ids never contain ':', orbital names may.
    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.split_once(':') {
            Some((category_id, orbital)) if !category_id.is_empty() => {
                Ok(Self::new(category_id, orbital))
            }
            _ => Err(format!("activity key `{raw}` is not `category:orbital`")),
        }
    }
}

/// Completion timestamps (epoch milliseconds) for a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DayLog {
    pub entries: BTreeMap<ActivityKey, i64>,
}

// A malformed key drops only that entry, never the rest of the history.
impl<'de> Deserialize<'de> for DayLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, i64>::deserialize(deserializer)?;
        let entries = raw
            .into_iter()
            .filter_map(|(key, timestamp)| match ActivityKey::try_from(key) {
                Ok(key) => Some((key, timestamp)),
                Err(err) => {
                    warn!("skipping stored log entry: {err}");
                    None
                }
            })
            .collect();
        Ok(Self { entries })
    }
}

impl DayLog {
    /// Distinct registered categories with at least one entry.
    pub fn logged_categories(&self) -> BTreeSet<&'static str> {
        self.entries
            .keys()
            .filter_map(|key| categories::find(&key.category_id).map(|category| category.id))
            .collect()
    }

    pub fn orbital_count(&self, category_id: &str) -> u32 {
        self.entries
            .keys()
            .filter(|key| key.category_id == category_id)
            .count() as u32
    }
}

/// Every logged day, keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogStore {
    pub days: BTreeMap<String, DayLog>,
}

impl LogStore {
    pub fn day(&self, date: &str) -> Option<&DayLog> {
        self.days.get(date)
    }

    /// Last write wins: re-logging the same orbital on the same day only moves the timestamp.
    pub fn upsert(&mut self, date: &str, key: ActivityKey, timestamp_ms: i64) {
        self.days
            .entry(date.to_string())
            .or_default()
            .entries
            .insert(key, timestamp_ms);
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// User-editable orbital names per category id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrbitalConfig {
    pub orbitals: BTreeMap<String, Vec<String>>,
}

impl Default for OrbitalConfig {
    fn default() -> Self {
        let orbitals = CATEGORIES
            .iter()
            .map(|category| {
                let names = category.orbitals.iter().map(|name| name.to_string()).collect();
                (category.id.to_string(), names)
            })
            .collect();
        Self { orbitals }
    }
}

impl OrbitalConfig {
    /// Falls back to the registry defaults for categories missing from a stored config.
    pub fn orbitals_for(&self, category_id: &str) -> Vec<String> {
        if let Some(names) = self.orbitals.get(category_id) {
            return names.clone();
        }
        categories::find(category_id)
            .map(|category| category.orbitals.iter().map(|name| name.to_string()).collect())
            .unwrap_or_default()
    }

    /// Drops retired category ids and categories holding a blank name; those read as defaults.
    pub fn sanitized(self) -> Self {
        let orbitals = self
            .orbitals
            .into_iter()
            .filter(|(category_id, names)| {
                if !categories::is_registered(category_id) {
                    warn!(category = %category_id, "dropping orbitals for unknown category");
                    return false;
                }
                if names.is_empty() || names.iter().any(|name| name.trim().is_empty()) {
                    warn!(category = %category_id, "dropping orbitals with blank names");
                    return false;
                }
                true
            })
            .collect();
        Self { orbitals }
    }

    pub fn contains(&self, category_id: &str, orbital: &str) -> bool {
        self.orbitals_for(category_id).iter().any(|name| name == orbital)
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub id: &'static str,
    pub label: &'static str,
    pub orbitals: Vec<String>,
    pub lit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrbital {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeView {
    pub category_id: String,
    pub orbital: String,
}

/// Everything the page needs to draw the ritual screen.
#[derive(Debug, Serialize)]
pub struct RitualSnapshot {
    pub date: String,
    pub categories: Vec<CategoryView>,
    pub completed: usize,
    pub total: usize,
    pub gesture: &'static str,
    pub pressing_slice: Option<usize>,
    pub active_slice: Option<usize>,
    pub orbital_positions: Vec<PlacedOrbital>,
    pub view: usize,
    pub notice: Option<NoticeView>,
    pub settings_open: bool,
    pub haptics: Vec<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub categories: Vec<String>,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyRow {
    pub date: String,
    pub weekday: String,
    pub counts: Vec<u32>,
    pub total: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyTable {
    pub categories: Vec<String>,
    pub rows: Vec<WeeklyRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: String,
    pub categories: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeatmapMonth {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub first_weekday: u32,
    pub days: Vec<HeatmapCell>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub months: Vec<HeatmapMonth>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub open: bool,
    pub draft: OrbitalConfig,
    pub saved_flash: bool,
    pub clear_pending: bool,
}

#[derive(Debug, Deserialize)]
pub struct LogRequest {
    pub category: String,
    pub orbital: String,
}

#[derive(Debug, Deserialize)]
pub struct DraftEditRequest {
    pub category: String,
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureInput {
    PointerDown { slice: usize },
    PointerUp,
    PointerLeave,
    PointerCancel,
    BackdropTap,
    SelectOrbital { orbital: String },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewInput {
    Tab { index: usize },
    Swipe { dx: f64 },
}
