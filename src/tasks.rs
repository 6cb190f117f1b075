use serde::Serialize;

use crate::lists::{Change, ListStore, ListView};
use crate::models::{ItemId, Task};
use crate::store::StoreAdapter;

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Planned versus completed focus time across the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub done: usize,
    pub planned_minutes: u64,
    pub completed_minutes: u64,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut summary, task| {
            summary.total += 1;
            summary.planned_minutes += u64::from(task.minutes);
            if task.done {
                summary.done += 1;
                summary.completed_minutes += u64::from(task.minutes);
            }
            summary
        })
    }
}

pub struct TaskList {
    list: ListStore<Task>,
    default_minutes: u32,
}

impl TaskList {
    pub fn new(store: StoreAdapter, key: impl Into<String>, default_minutes: u32) -> Self {
        Self {
            list: ListStore::new(store, key),
            default_minutes,
        }
    }

    pub fn attach_view(&mut self, view: Box<dyn ListView<Task>>) {
        self.list.attach_view(view);
    }

    pub fn items(&self) -> Vec<Task> {
        self.list.load()
    }

    pub fn render(&mut self) -> Vec<Task> {
        self.list.render()
    }

    /// Adds a task at the front of the list. `minutes` falls back to the
    /// configured default; blank text is ignored.
    pub fn add(&mut self, text: &str, minutes: Option<u32>) -> Vec<Task> {
        let text = text.trim();
        if text.is_empty() {
            log_info!("ignoring task with empty text");
            return self.list.render();
        }
        let minutes = minutes.unwrap_or(self.default_minutes);
        self.list.insert_front(Task::new(text, minutes))
    }

    pub fn toggle_done(&mut self, id: ItemId) -> Vec<Task> {
        self.list.update(id, |task| {
            task.done = !task.done;
            Change::Applied
        })
    }

    pub fn clear_completed(&mut self) -> Vec<Task> {
        self.list.clear(|task| task.done)
    }

    pub fn clear<P>(&mut self, predicate: P) -> Vec<Task>
    where
        P: FnMut(&Task) -> bool,
    {
        self.list.clear(predicate)
    }

    pub fn wipe_all(&mut self) -> Vec<Task> {
        self.list.wipe_all()
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::from_tasks(&self.list.load())
    }
}
