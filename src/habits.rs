use chrono::{Local, NaiveDate};

use crate::lists::{Change, ListStore, ListView};
use crate::models::{Habit, ItemId};
use crate::store::StoreAdapter;

const ENABLE_LOGS: bool = true;

use crate::log_info;

pub struct HabitTracker {
    list: ListStore<Habit>,
}

impl HabitTracker {
    pub fn new(store: StoreAdapter, key: impl Into<String>) -> Self {
        Self {
            list: ListStore::new(store, key),
        }
    }

    pub fn attach_view(&mut self, view: Box<dyn ListView<Habit>>) {
        self.list.attach_view(view);
    }

    pub fn items(&self) -> Vec<Habit> {
        self.list.load()
    }

    pub fn render(&mut self) -> Vec<Habit> {
        self.list.render()
    }

    pub fn add(&mut self, name: &str) -> Vec<Habit> {
        let name = name.trim();
        if name.is_empty() {
            log_info!("ignoring habit with empty name");
            return self.list.render();
        }
        self.list.insert_front(Habit::new(name))
    }

    /// "Done today" against the local wall-clock date.
    pub fn mark_done_today(&mut self, id: ItemId) -> Vec<Habit> {
        self.mark_done_on(id, Local::now().date_naive())
    }

    /// Idempotent per calendar day: a second call for the same `date`
    /// neither bumps the streak nor writes.
    pub fn mark_done_on(&mut self, id: ItemId, date: NaiveDate) -> Vec<Habit> {
        self.list.update(id, |habit| {
            if habit.mark_done(date) {
                Change::Applied
            } else {
                Change::Skipped
            }
        })
    }

    pub fn clear<P>(&mut self, predicate: P) -> Vec<Habit>
    where
        P: FnMut(&Habit) -> bool,
    {
        self.list.clear(predicate)
    }

    pub fn wipe_all(&mut self) -> Vec<Habit> {
        self.list.wipe_all()
    }
}
