//! Best-effort persistence for the dashboard collections.
//!
//! `StoreAdapter` is the only code that talks to the storage medium. Reads
//! that fail for any reason yield the caller's fallback and writes that fail
//! are dropped; both are logged and neither reaches the caller.

mod keys;
mod memory;

use std::sync::Arc;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::db::Database;

pub use keys::{StoreKeys, DEFAULT_NAMESPACE};
pub use memory::MemoryStore;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Raw string storage addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` means the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl KeyValueStore for Database {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_entry(key)?.map(|entry| entry.value))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.put_value(key, value)
    }
}

#[derive(Debug, Error)]
pub enum StoreFault {
    #[error("store unavailable for key {key}: {reason}")]
    Unavailable { key: String, reason: String },
    #[error("value under key {key} could not be (de)serialized: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct StoreAdapter {
    backend: Option<Arc<dyn KeyValueStore>>,
}

impl StoreAdapter {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// An adapter with no storage medium behind it: every load yields the
    /// fallback and every save is dropped.
    pub fn detached() -> Self {
        Self { backend: None }
    }

    pub fn is_attached(&self) -> bool {
        self.backend.is_some()
    }

    /// Returns the value stored under `key`, or `fallback` when the key is
    /// absent, unreadable or does not deserialize into `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(fault) => {
                log_warn!("load fell back to default: {fault}");
                fallback
            }
        }
    }

    /// Persists `value` under `key`. Failures are logged and dropped; the
    /// next user action is the retry.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(fault) = self.try_save(key, value) {
            log_warn!("save dropped: {fault}");
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreFault> {
        let Some(backend) = &self.backend else {
            log::debug!("no store attached; {key} reads as absent");
            return Ok(None);
        };

        let raw = backend.read(key).map_err(|err| StoreFault::Unavailable {
            key: key.to_string(),
            reason: format!("{err:#}"),
        })?;

        raw.map(|raw| {
            serde_json::from_str(&raw).map_err(|source| StoreFault::Corrupt {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreFault> {
        let serialized = serde_json::to_string(value).map_err(|source| StoreFault::Corrupt {
            key: key.to_string(),
            source,
        })?;

        match &self.backend {
            Some(backend) => backend
                .write(key, &serialized)
                .map_err(|err| StoreFault::Unavailable {
                    key: key.to_string(),
                    reason: format!("{err:#}"),
                }),
            None => Err(StoreFault::Unavailable {
                key: key.to_string(),
                reason: "no store attached".into(),
            }),
        }
    }
}
