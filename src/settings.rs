use crate::categories;
use crate::errors::RitualError;
use crate::models::OrbitalConfig;

/// Draft editing of orbital names plus the two-step "clear all data" prompt.
#[derive(Debug, Clone, Default)]
pub struct SettingsEditor {
    open: bool,
    draft: OrbitalConfig,
    saved_flash: Option<u64>,
    clear_pending: bool,
}

impl SettingsEditor {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &OrbitalConfig {
        &self.draft
    }

    pub fn saved_flash(&self) -> bool {
        self.saved_flash.is_some()
    }

    pub fn clear_pending(&self) -> bool {
        self.clear_pending
    }

    /// Opening always starts from a fresh copy of the live configuration.
    pub fn open(&mut self, current: &OrbitalConfig) {
        self.open = true;
        self.draft = current.clone();
        self.clear_pending = false;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.clear_pending = false;
    }

    pub fn rename(&mut self, category_id: &str, index: usize, name: &str) -> Result<(), RitualError> {
        self.ensure_open()?;
        if !categories::is_registered(category_id) {
            return Err(RitualError::UnknownCategory(category_id.to_string()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(RitualError::EmptyOrbitalName);
        }

        let mut names = self.draft.orbitals_for(category_id);
        let slot = names
            .get_mut(index)
            .ok_or_else(|| RitualError::OrbitalIndexOutOfRange {
                category_id: category_id.to_string(),
                index,
            })?;
        *slot = name.to_string();
        self.draft.orbitals.insert(category_id.to_string(), names);
        Ok(())
    }

    /// Starts the confirmation flash under `token`; call only once the draft is committed.
    pub fn mark_saved(&mut self, token: u64) -> Result<(), RitualError> {
        self.ensure_open()?;
        self.saved_flash = Some(token);
        Ok(())
    }

    pub fn flash_elapsed(&mut self, token: u64) {
        if self.saved_flash == Some(token) {
            self.saved_flash = None;
        }
    }

    pub fn request_clear(&mut self) -> Result<(), RitualError> {
        self.ensure_open()?;
        self.clear_pending = true;
        Ok(())
    }

    pub fn cancel_clear(&mut self) {
        self.clear_pending = false;
    }

    /// Consumes the pending prompt; the caller clears the logs only on `Ok`.
    pub fn confirm_clear(&mut self) -> Result<(), RitualError> {
        if !std::mem::take(&mut self.clear_pending) {
            return Err(RitualError::ClearNotRequested);
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), RitualError> {
        if self.open {
            Ok(())
        } else {
            Err(RitualError::SettingsClosed)
        }
    }
}
