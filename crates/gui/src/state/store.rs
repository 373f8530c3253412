//! The single authoritative configuration, with debounced persistence and
//! change notification.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use shared::{ConfigField, ConfigPatch, Configuration, FieldError};

use crate::persistence::{merge_over_default, PersistError, Persistence};

/// Delay between the last update and the write to storage
pub const SAVE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Update,
    Reset,
    Load,
    Import,
}

/// Sent to subscribers after the configuration changed
#[derive(Debug, Clone)]
pub struct ConfigChange {
    pub cause: ChangeCause,
    /// Fields whose value differs from the previous configuration
    pub changed: Vec<ConfigField>,
    pub config: Configuration,
}

pub struct ConfigStore {
    config: Configuration,
    persistence: Persistence,
    /// Deadline of the scheduled write, if any
    pending_save: Option<Instant>,
    /// Monotonically increasing version counter, bumped on every effective change
    version: u64,
    subscribers: Vec<Sender<ConfigChange>>,
}

impl ConfigStore {
    /// Store holding the default configuration. Call [`ConfigStore::load`] to
    /// restore the persisted one.
    pub fn new(persistence: Persistence) -> Self {
        Self {
            config: Configuration::default(),
            persistence,
            pending_save: None,
            version: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &Configuration {
        &self.config
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn has_pending_save(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Receive a [`ConfigChange`] for every subsequent change
    pub fn subscribe(&mut self) -> Receiver<ConfigChange> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Merge `patch` into the configuration. Rejected fields are logged and
    /// returned; the rest of the patch applies.
    pub fn update(&mut self, patch: &ConfigPatch) -> Vec<FieldError> {
        let before = self.config.clone();
        let errors = self.config.apply(patch);
        for err in &errors {
            tracing::warn!("Rejected configuration field: {err}");
        }

        self.schedule_save();
        let changed = before.diff(&self.config);
        if !changed.is_empty() {
            tracing::debug!("Configuration updated: {:?}", changed);
        }
        self.commit(ChangeCause::Update, changed);
        errors
    }

    /// [`ConfigStore::update`] from a loose JSON object
    pub fn update_json(&mut self, value: &serde_json::Value) -> Result<Vec<FieldError>, FieldError> {
        let (patch, mut errors) = ConfigPatch::from_json(value)?;
        for err in &errors {
            tracing::warn!("Rejected configuration field: {err}");
        }
        errors.extend(self.update(&patch));
        Ok(errors)
    }

    /// Restore the default and persist it immediately
    pub fn reset(&mut self) {
        let before = std::mem::take(&mut self.config);
        let changed = before.diff(&self.config);
        tracing::info!("Configuration reset to defaults");
        self.pending_save = None;
        self.save_now();
        self.commit(ChangeCause::Reset, changed);
    }

    /// Restore the persisted configuration. Returns `false` (and leaves the
    /// current configuration in place) when nothing usable is stored.
    pub fn load(&mut self) -> bool {
        match self.persistence.load() {
            Ok(loaded) => {
                for err in &loaded.rejected {
                    tracing::warn!("Ignoring stored field: {err}");
                }
                tracing::info!("Loaded configuration from '{}'", self.persistence.key());
                self.replace(loaded.config, ChangeCause::Load);
                true
            }
            Err(PersistError::NotFound(key)) => {
                tracing::info!("No stored configuration under '{key}', using defaults");
                false
            }
            Err(e) => {
                tracing::warn!("Failed to load configuration: {e}");
                false
            }
        }
    }

    /// Replace the whole configuration from an external JSON document, merged
    /// field by field over the default, and schedule a save.
    pub fn import_json(&mut self, value: &serde_json::Value) -> Result<Vec<FieldError>, PersistError> {
        let loaded = merge_over_default(value)?;
        for err in &loaded.rejected {
            tracing::warn!("Ignoring imported field: {err}");
        }
        self.replace(loaded.config, ChangeCause::Import);
        self.schedule_save();
        Ok(loaded.rejected)
    }

    /// Write the configuration once its save deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if self.pending_save.is_some_and(|due| now >= due) {
            self.pending_save = None;
            self.save_now();
        }
    }

    /// Write a scheduled save immediately
    pub fn flush(&mut self) {
        if self.pending_save.take().is_some() {
            self.save_now();
        }
    }

    fn replace(&mut self, config: Configuration, cause: ChangeCause) {
        let changed = self.config.diff(&config);
        self.config = config;
        self.commit(cause, changed);
    }

    fn schedule_save(&mut self) {
        self.pending_save = Some(Instant::now() + SAVE_DELAY);
    }

    fn save_now(&mut self) {
        if let Err(e) = self.persistence.save(&self.config) {
            tracing::warn!("Failed to save configuration: {e}");
        }
    }

    fn commit(&mut self, cause: ChangeCause, changed: Vec<ConfigField>) {
        if !changed.is_empty() {
            self.version += 1;
        }
        let change = ConfigChange {
            cause,
            changed,
            config: self.config.clone(),
        };
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }
}

impl Drop for ConfigStore {
    fn drop(&mut self) {
        self.flush();
    }
}
