use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::preferences::{JsonPreference, KeyValueStorage, PreferenceStore, StorageError};
use crate::types::identifiers::Slug;

/// Persisted form of the dismissed set: a JSON array of slugs.
///
/// Reading keeps every string element of the array and skips the rest, so
/// one bad entry does not discard the whole set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
struct DismissedSlugs(BTreeSet<Slug>);

impl<'de> Deserialize<'de> for DismissedSlugs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Value>::deserialize(deserializer)?;
        Ok(DismissedSlugs(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(slug) => Some(Slug::new(slug)),
                    _ => None,
                })
                .collect(),
        ))
    }
}

/// The set of benchmarks a reviewer has dismissed, persisted as a JSON
/// array of slugs.
///
/// Mutations update the in-memory set first and then persist it. A failed
/// write is returned to the caller but the in-memory change stands.
pub struct DismissalStore<S> {
    preference: JsonPreference<DismissedSlugs, S>,
    dismissed: RwLock<DismissedSlugs>,
}

impl<S: KeyValueStorage> DismissalStore<S> {
    pub fn open(storage: Arc<S>, key: impl Into<String>) -> Self {
        let preference = JsonPreference::new(storage, key);
        let dismissed: DismissedSlugs = preference.load();
        tracing::debug!(key = %preference.key(), count = dismissed.0.len(), "dismissals loaded");
        Self {
            preference,
            dismissed: RwLock::new(dismissed),
        }
    }

    /// A snapshot of the current set.
    pub fn dismissed(&self) -> BTreeSet<Slug> {
        self.read().0.clone()
    }

    pub fn count(&self) -> usize {
        self.read().0.len()
    }

    pub fn is_dismissed(&self, slug: &Slug) -> bool {
        self.read().0.contains(slug)
    }

    pub fn dismiss(&self, slug: Slug) -> Result<(), StorageError> {
        self.update(|set| {
            set.insert(slug);
        })
    }

    pub fn restore(&self, slug: &Slug) -> Result<(), StorageError> {
        self.update(|set| {
            set.remove(slug);
        })
    }

    /// Returns whether `slug` is dismissed after the toggle.
    pub fn toggle(&self, slug: Slug) -> Result<bool, StorageError> {
        let mut now_dismissed = false;
        self.update(|set| {
            if !set.remove(&slug) {
                set.insert(slug);
                now_dismissed = true;
            }
        })?;
        Ok(now_dismissed)
    }

    pub fn clear_all(&self) -> Result<(), StorageError> {
        self.update(BTreeSet::clear)
    }

    /// Pretty-printed JSON array of the dismissed slugs, sorted.
    pub fn export_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(&*self.read())?)
    }

    fn read(&self) -> RwLockReadGuard<'_, DismissedSlugs> {
        self.dismissed.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, change: impl FnOnce(&mut BTreeSet<Slug>)) -> Result<(), StorageError> {
        let mut slugs = self.dismissed.write().unwrap_or_else(PoisonError::into_inner);
        change(&mut slugs.0);
        self.preference.save(&slugs)
    }
}
