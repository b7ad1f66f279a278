use crate::controller::RitualController;
use crate::errors::AppError;
use crate::models::{LogStore, OrbitalConfig};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

/// The two persisted keys, one JSON file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Logs,
    Orbitals,
}

impl StorageKey {
    pub fn name(self) -> &'static str {
        match self {
            StorageKey::Logs => "ritual_logs",
            StorageKey::Orbitals => "ritual_orbitals",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.name()))
    }

    pub async fn prepare(&self) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.dir).await
    }

    /// Missing or unreadable logs start from an empty store.
    pub async fn load_logs(&self) -> LogStore {
        self.load(StorageKey::Logs).await.unwrap_or_default()
    }

    /// Missing or unreadable orbitals start from the registry defaults.
    pub async fn load_orbitals(&self) -> OrbitalConfig {
        self.load::<OrbitalConfig>(StorageKey::Orbitals)
            .await
            .map(OrbitalConfig::sanitized)
            .unwrap_or_default()
    }

    async fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let path = self.path(key);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    error!("failed to parse {}: {err}", key.name());
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no stored {} at {}", key.name(), path.display());
                None
            }
            Err(err) => {
                error!("failed to read {}: {err}", key.name());
                None
            }
        }
    }

    pub async fn persist(&self, key: StorageKey, controller: &RitualController) -> Result<(), AppError> {
        match key {
            StorageKey::Logs => self.write(key, controller.logs()).await,
            StorageKey::Orbitals => self.write(key, controller.orbitals()).await,
        }
    }

    /// Replaces the whole value: write beside the target, then rename over it.
    pub async fn write<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(value).map_err(AppError::internal)?;
        let path = self.path(key);
        let staging = path.with_extension("json.tmp");
        if let Err(err) = fs::write(&staging, payload).await {
            warn!("failed to write {}: {err}", key.name());
            return Err(AppError::internal(err));
        }
        fs::rename(&staging, &path).await.map_err(AppError::internal)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityKey;

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("ritual_storage_{tag}_{}_{}", std::process::id(), nanos));
        path
    }

    #[tokio::test]
    async fn missing_files_fall_back_to_defaults() {
        let storage = Storage::new(scratch_dir("missing"));
        assert!(storage.load_logs().await.is_empty());
        assert_eq!(storage.load_orbitals().await, OrbitalConfig::default());
    }

    #[tokio::test]
    async fn malformed_files_fall_back_to_defaults() {
        let storage = Storage::new(scratch_dir("malformed"));
        storage.prepare().await.unwrap();
        fs::write(storage.path(StorageKey::Logs), b"{ not json").await.unwrap();
        fs::write(storage.path(StorageKey::Orbitals), b"[1, 2, 3]").await.unwrap();

        assert!(storage.load_logs().await.is_empty());
        assert_eq!(storage.load_orbitals().await, OrbitalConfig::default());
        let _ = fs::remove_dir_all(storage.dir()).await;
    }

    #[tokio::test]
    async fn written_values_load_back() {
        let storage = Storage::new(scratch_dir("roundtrip"));
        storage.prepare().await.unwrap();

        let mut logs = LogStore::default();
        logs.upsert("2024-06-10", ActivityKey::new("finance", "Track"), 42);
        let mut orbitals = OrbitalConfig::default();
        orbitals
            .orbitals
            .insert("body".into(), vec!["Run".into(), "Lift".into(), "Walk".into()]);

        storage.write(StorageKey::Logs, &logs).await.unwrap();
        storage.write(StorageKey::Orbitals, &orbitals).await.unwrap();

        assert_eq!(storage.load_logs().await, logs);
        assert_eq!(storage.load_orbitals().await, orbitals);
        assert!(storage.path(StorageKey::Logs).ends_with("ritual_logs.json"));
        let _ = fs::remove_dir_all(storage.dir()).await;
    }

    #[tokio::test]
    async fn stored_orbitals_drop_retired_categories() {
        let storage = Storage::new(scratch_dir("retired"));
        storage.prepare().await.unwrap();
        fs::write(
            storage.path(StorageKey::Orbitals),
            br#"{ "body": ["Run", "Lift", "Walk"], "chores": ["Dishes", "Laundry", "Trash"] }"#,
        )
        .await
        .unwrap();

        let orbitals = storage.load_orbitals().await;
        assert!(!orbitals.orbitals.contains_key("chores"));
        assert_eq!(orbitals.orbitals_for("body"), ["Run", "Lift", "Walk"]);
        let _ = fs::remove_dir_all(storage.dir()).await;
    }
}
