mod dashboard;
mod db;
mod habits;
mod lists;
pub mod models;
mod projects;
mod settings;
pub mod store;
mod tasks;
pub mod timer;
mod utils;

pub use dashboard::Dashboard;
pub use db::{Database, KvEntry};
pub use habits::HabitTracker;
pub use lists::{Change, ListStore, ListView};
pub use projects::ProjectBoard;
pub use settings::{DashboardSettings, SettingsStore, TaskDefaults};
pub use store::{KeyValueStore, MemoryStore, StoreAdapter, StoreFault, StoreKeys};
pub use tasks::{TaskList, TaskSummary};
pub use timer::{TimerController, TimerSnapshot};
pub use utils::logging::init_logging;
