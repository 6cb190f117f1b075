use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};

use crate::db::Database;
use crate::habits::HabitTracker;
use crate::projects::ProjectBoard;
use crate::settings::{DashboardSettings, SettingsStore};
use crate::store::{StoreAdapter, StoreKeys};
use crate::tasks::TaskList;
use crate::timer::TimerController;

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

const DB_FILE_NAME: &str = "focusboard.sqlite3";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Everything one dashboard page needs: the three lists and the timer, all
/// sharing one store. Created at startup, dropped on teardown.
pub struct Dashboard {
    settings: Option<SettingsStore>,
    store: StoreAdapter,
    keys: StoreKeys,
    tasks: TaskList,
    projects: ProjectBoard,
    habits: HabitTracker,
    timer: TimerController,
}

impl Dashboard {
    /// Opens (or creates) the dashboard under `data_dir`.
    ///
    /// A database that cannot be opened does not stop the dashboard: it
    /// runs on a detached store and behaves as if storage were empty.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir).with_context(|| {
            format!("failed to create data directory {}", data_dir.display())
        })?;

        let settings_path = data_dir.join(SETTINGS_FILE_NAME);
        let settings = SettingsStore::new(settings_path.clone()).unwrap_or_else(|err| {
            log_warn!("using default settings: {err:#}");
            SettingsStore::with_defaults(settings_path)
        });

        let store = match Database::new(data_dir.join(DB_FILE_NAME)) {
            Ok(database) => StoreAdapter::new(Arc::new(database)),
            Err(err) => {
                log_error!("database unavailable, running without persistence: {err:#}");
                StoreAdapter::detached()
            }
        };

        let mut dashboard = Self::with_store(store, &settings.current());
        dashboard.settings = Some(settings);
        log_info!("dashboard opened at {}", data_dir.display());
        Ok(dashboard)
    }

    /// Dashboard over an arbitrary store, without a settings file.
    pub fn with_store(store: StoreAdapter, settings: &DashboardSettings) -> Self {
        let keys = StoreKeys::namespaced(&settings.store_namespace);

        Self {
            settings: None,
            tasks: TaskList::new(
                store.clone(),
                keys.tasks.clone(),
                settings.tasks.default_minutes,
            ),
            projects: ProjectBoard::new(store.clone(), keys.projects.clone()),
            habits: HabitTracker::new(store.clone(), keys.habits.clone()),
            timer: TimerController::new(settings.timer),
            store,
            keys,
        }
    }

    pub fn settings(&self) -> Option<&SettingsStore> {
        self.settings.as_ref()
    }

    pub fn store(&self) -> &StoreAdapter {
        &self.store
    }

    pub fn keys(&self) -> &StoreKeys {
        &self.keys
    }

    pub fn tasks(&mut self) -> &mut TaskList {
        &mut self.tasks
    }

    pub fn projects(&mut self) -> &mut ProjectBoard {
        &mut self.projects
    }

    pub fn habits(&mut self) -> &mut HabitTracker {
        &mut self.habits
    }

    pub fn timer(&self) -> &TimerController {
        &self.timer
    }

    /// Initial paint of every list from storage.
    pub fn render_all(&mut self) {
        self.tasks.render();
        self.projects.render();
        self.habits.render();
    }

    /// Stops the ticker. Lists need no teardown.
    pub async fn shutdown(&self) {
        self.timer.pause().await;
        log_info!("dashboard shut down");
    }
}
