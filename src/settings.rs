use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use crate::models::DEFAULT_TASK_MINUTES;
use crate::store::DEFAULT_NAMESPACE;
use crate::timer::TimerDurations;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskDefaults {
    pub default_minutes: u32,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            default_minutes: DEFAULT_TASK_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSettings {
    pub timer: TimerDurations,
    pub tasks: TaskDefaults,
    pub store_namespace: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            timer: TimerDurations::default(),
            tasks: TaskDefaults::default(),
            store_namespace: DEFAULT_NAMESPACE.into(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<DashboardSettings>,
}

impl SettingsStore {
    /// Reads `path` if it exists. A file that does not parse is replaced by
    /// defaults on the next update.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            DashboardSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn with_defaults(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(DashboardSettings::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> DashboardSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update_timer_defaults(&self, durations: TimerDurations) -> Result<()> {
        self.update(|settings| settings.timer = durations.clamped())
    }

    pub fn update_task_defaults(&self, tasks: TaskDefaults) -> Result<()> {
        self.update(|settings| settings.tasks = tasks)
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut DashboardSettings),
    {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
        self.persist(&guard)
    }

    fn persist(&self, data: &DashboardSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: DashboardSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = data;
        Ok(())
    }
}
