use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::preferences::{JsonPreference, KeyValueStorage, PreferenceStore, StorageError};

/// Upper bound of the relevance scale.
pub const MAX_MIN_RELEVANCE: f64 = 10.0;

/// Display settings. Keys missing from a stored object take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub hide_old_papers: bool,
    pub min_relevance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hide_old_papers: true,
            min_relevance: 0.0,
        }
    }
}

fn clamp_relevance(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_MIN_RELEVANCE)
    }
}

pub struct SettingsStore<S> {
    preference: JsonPreference<Settings, S>,
    current: RwLock<Settings>,
}

impl<S: KeyValueStorage> SettingsStore<S> {
    pub fn open(storage: Arc<S>, key: impl Into<String>) -> Self {
        let preference = JsonPreference::new(storage, key);
        let mut settings: Settings = preference.load();
        settings.min_relevance = clamp_relevance(settings.min_relevance);
        Self {
            preference,
            current: RwLock::new(settings),
        }
    }

    pub fn settings(&self) -> Settings {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn hide_old_papers(&self) -> bool {
        self.settings().hide_old_papers
    }

    pub fn min_relevance(&self) -> f64 {
        self.settings().min_relevance
    }

    pub fn set_hide_old_papers(&self, hide: bool) -> Result<(), StorageError> {
        self.update(|s| s.hide_old_papers = hide)
    }

    /// Returns the new value.
    pub fn toggle_hide_old_papers(&self) -> Result<bool, StorageError> {
        let mut hide = false;
        self.update(|s| {
            s.hide_old_papers = !s.hide_old_papers;
            hide = s.hide_old_papers;
        })?;
        Ok(hide)
    }

    /// Clamped to `0..=10`.
    pub fn set_min_relevance(&self, value: f64) -> Result<(), StorageError> {
        self.update(|s| s.min_relevance = clamp_relevance(value))
    }

    fn update(&self, change: impl FnOnce(&mut Settings)) -> Result<(), StorageError> {
        let mut settings = self.current.write().unwrap_or_else(PoisonError::into_inner);
        change(&mut settings);
        self.preference.save(&settings)
    }
}
