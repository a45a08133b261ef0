//! Namespaced key-value store with expiry
//!
//! Small JSON-file backed store for session state such as the last editor
//! text and the scroll sync toggle. Entries past their expiry read as
//! absent and are dropped on the next write.

use crate::Result;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the store inside the data directory
pub const KV_STORE_FILE: &str = "storage.json";

/// Namespace of every key the preview writes
pub const NAMESPACE: &str = "com.markdownlivepreview";

/// Key of the last editor text
pub const LAST_STATE_KEY: &str = "last_state";

/// Key of the scroll sync toggle
pub const SCROLL_BAR_SETTINGS_KEY: &str = "scroll_bar_settings";

/// Expiry used for session state: 2099-02-01
pub fn default_expiry() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2099, 2, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A stored value and when it stops being visible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    pub value: Value,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }
}

type Namespaces = BTreeMap<String, BTreeMap<String, StoredEntry>>;

pub struct KvStore {
    path: PathBuf,
    namespaces: Namespaces,
}

impl KvStore {
    /// Open the store in `data_dir`. A missing file is an empty store; an
    /// unreadable one is discarded with a warning.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let path = data_dir.as_ref().join(KV_STORE_FILE);
        let namespaces = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<Namespaces>(&content) {
                Ok(namespaces) => namespaces,
                Err(e) => {
                    tracing::warn!("Failed to parse key-value store, starting empty: {}", e);
                    Namespaces::new()
                }
            }
        } else {
            Namespaces::new()
        };

        let mut store = Self { path, namespaces };
        let pruned = store.prune_expired(Utc::now());
        if pruned > 0 {
            tracing::debug!(pruned, "Dropped expired entries");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value under `namespace`/`key`, absent when missing or expired
    pub fn get(&self, namespace: &str, key: &str) -> Option<&Value> {
        self.get_at(namespace, key, Utc::now())
    }

    fn get_at(&self, namespace: &str, key: &str, now: DateTime<Utc>) -> Option<&Value> {
        self.namespaces
            .get(namespace)?
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.value)
    }

    /// Typed read. A value of the wrong shape reads as absent.
    pub fn get_as<T: DeserializeOwned>(&self, namespace: &str, key: &str) -> Option<T> {
        let value = self.get(namespace, key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Store a value and persist the store
    pub fn set<T: Serialize>(
        &mut self,
        namespace: &str,
        key: &str,
        value: &T,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let entry = StoredEntry {
            value: serde_json::to_value(value)?,
            expires_at,
        };
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), entry);
        self.prune_expired(Utc::now());
        self.save()
    }

    /// Remove a value and persist the store. Returns whether it existed.
    pub fn remove(&mut self, namespace: &str, key: &str) -> Result<bool> {
        let removed = self
            .namespaces
            .get_mut(namespace)
            .and_then(|entries| entries.remove(key))
            .is_some();
        if removed {
            self.namespaces.retain(|_, entries| !entries.is_empty());
            self.save()?;
        }
        Ok(removed)
    }

    /// Drop entries expired at `now`, returning how many were removed
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let mut pruned = 0;
        for entries in self.namespaces.values_mut() {
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            pruned += before - entries.len();
        }
        self.namespaces.retain(|_, entries| !entries.is_empty());
        pruned
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.namespaces)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Last editor text, if any was saved
    pub fn last_state(&self) -> Option<String> {
        self.get_as(NAMESPACE, LAST_STATE_KEY)
    }

    pub fn save_last_state(&mut self, text: &str) -> Result<()> {
        self.set(NAMESPACE, LAST_STATE_KEY, &text, Some(default_expiry()))
    }

    /// Whether editor and preview scroll together. Off unless saved.
    pub fn scroll_sync(&self) -> bool {
        self.get_as(NAMESPACE, SCROLL_BAR_SETTINGS_KEY).unwrap_or(false)
    }

    pub fn save_scroll_sync(&mut self, enabled: bool) -> Result<()> {
        self.set(NAMESPACE, SCROLL_BAR_SETTINGS_KEY, &enabled, Some(default_expiry()))
    }
}
