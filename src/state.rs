use crate::controller::{Effect, RitualController, TimerKind};
use crate::errors::AppError;
use crate::storage::{Storage, StorageKey};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex, PoisonError},
    time::Duration,
};
use tokio::{sync::Mutex, task::AbortHandle, time::sleep};
use tracing::{error, warn};

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub controller: Arc<Mutex<RitualController>>,
    timers: Arc<StdMutex<HashMap<TimerKind, AbortHandle>>>,
}

impl AppState {
    pub fn new(storage: Storage, controller: RitualController) -> Self {
        Self {
            storage,
            controller: Arc::new(Mutex::new(controller)),
            timers: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Carries out controller effects while the caller still holds the controller lock.
    /// Timers are always armed or cancelled; the first persist failure is reported afterwards.
    pub async fn apply(&self, controller: &RitualController, effects: Vec<Effect>) -> Result<(), AppError> {
        let mut failure = None;
        for effect in effects {
            match effect {
                Effect::Persist(key) => {
                    if let Err(err) = self.storage.persist(key, controller).await {
                        error!("failed to persist {}: {}", key.name(), err.message);
                        failure.get_or_insert(err);
                    }
                }
                Effect::Schedule { timer, token, after } => self.schedule(timer, token, after),
                Effect::Cancel(timer) => self.cancel(timer),
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// At most one live task per timer kind; a new one replaces the old.
    fn schedule(&self, timer: TimerKind, token: u64, after: Duration) {
        let state = self.clone();
        let task = tokio::spawn(async move {
            sleep(after).await;
            state.fire(timer, token).await;
        });
        let previous = self
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(timer, task.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel(&self, timer: TimerKind) {
        let pending = self
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&timer);
        if let Some(pending) = pending {
            pending.abort();
        }
    }

    async fn fire(&self, timer: TimerKind, token: u64) {
        let mut controller = self.controller.lock().await;
        let effects = controller.on_timer(timer, token);
        if let Err(err) = self.apply(&controller, effects).await {
            warn!(?timer, "timer effects failed: {}", err.message);
        }
    }

    pub async fn persist_all(&self) -> Result<(), AppError> {
        let controller = self.controller.lock().await;
        for key in [StorageKey::Logs, StorageKey::Orbitals] {
            self.storage.persist(key, &controller).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NOTICE_TTL;

    fn unwritable_dir() -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut blocker = std::env::temp_dir();
        blocker.push(format!("ritual_state_blocker_{}_{}", std::process::id(), nanos));
        std::fs::write(&blocker, b"").unwrap();
        blocker.join("data")
    }

    #[tokio::test]
    async fn notice_expires_even_when_persisting_fails() {
        let data_dir = unwritable_dir();
        let state = AppState::new(Storage::new(data_dir.clone()), RitualController::default());

        {
            let mut controller = state.controller.lock().await;
            let effects = controller.log_orbital("body", "Move").unwrap();
            assert!(state.apply(&controller, effects).await.is_err());
            assert!(controller.notice().is_some());
        }

        sleep(NOTICE_TTL + Duration::from_millis(300)).await;
        assert!(state.controller.lock().await.notice().is_none());
        let _ = std::fs::remove_file(data_dir.parent().unwrap());
    }
}
