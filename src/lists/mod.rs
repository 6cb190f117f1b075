//! Read-modify-write protocol shared by the task, project and habit lists.
//!
//! Every mutation loads the whole collection, applies one change, saves the
//! whole collection and then renders from a fresh load. A save that the
//! store dropped therefore shows up as "nothing changed" rather than as an
//! update that never reached storage.

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::models::{Identified, ItemId};
use crate::store::StoreAdapter;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// View collaborator that projects a collection somewhere visible.
pub trait ListView<T>: Send {
    fn show(&mut self, items: &[T]) -> Result<()>;
}

/// Whether a mutation touched the collection. Skipped mutations are not
/// written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    Skipped,
}

pub struct ListStore<T> {
    store: StoreAdapter,
    key: String,
    view: Option<Box<dyn ListView<T>>>,
}

impl<T> ListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: StoreAdapter, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            view: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn attach_view(&mut self, view: Box<dyn ListView<T>>) {
        self.view = Some(view);
    }

    pub fn detach_view(&mut self) -> Option<Box<dyn ListView<T>>> {
        self.view.take()
    }

    /// Current stored collection; an absent or unreadable key is empty.
    ///
    /// Entries that needed filling in on the way in (older entries without
    /// an id, say) are written back at once so the ids handed to a view
    /// match what the next load sees.
    pub fn load(&self) -> Vec<T> {
        let raw: Value = self.store.load(&self.key, Value::Null);
        if raw.is_null() {
            return Vec::new();
        }

        let items: Vec<T> = match serde_json::from_value(raw.clone()) {
            Ok(items) => items,
            Err(err) => {
                log_warn!("{} holds an unexpected shape, reading as empty: {err}", self.key);
                return Vec::new();
            }
        };

        if serde_json::to_value(&items).ok().as_ref() != Some(&raw) {
            log::debug!("normalizing stored entries under {}", self.key);
            self.store.save(&self.key, &items);
        }
        items
    }

    /// Loads the stored collection and hands it to the attached view, if
    /// any. View failures are logged, never propagated.
    pub fn render(&mut self) -> Vec<T> {
        let items = self.load();
        if let Some(view) = self.view.as_mut() {
            if let Err(err) = view.show(&items) {
                log_warn!("render of {} failed: {err:#}", self.key);
            }
        }
        items
    }

    /// Runs one load → mutate → save cycle and returns what a fresh load
    /// sees afterwards.
    pub fn mutate<F>(&mut self, mutation: F) -> Vec<T>
    where
        F: FnOnce(&mut Vec<T>) -> Change,
    {
        let mut items = self.load();
        if mutation(&mut items) == Change::Applied {
            self.store.save(&self.key, &items);
        }
        self.render()
    }

    pub fn insert_front(&mut self, item: T) -> Vec<T> {
        self.mutate(|items| {
            items.insert(0, item);
            Change::Applied
        })
    }

    /// Removes every item matching `predicate`.
    pub fn clear<P>(&mut self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.mutate(|items| {
            let before = items.len();
            items.retain(|item| !predicate(item));
            if items.len() == before {
                Change::Skipped
            } else {
                Change::Applied
            }
        })
    }

    pub fn wipe_all(&mut self) -> Vec<T> {
        self.mutate(|items| {
            items.clear();
            Change::Applied
        })
    }
}

impl<T> ListStore<T>
where
    T: Serialize + DeserializeOwned + Identified,
{
    /// Applies `update` to the item with `id`. An unknown id changes
    /// nothing but still re-renders.
    pub fn update<F>(&mut self, id: ItemId, update: F) -> Vec<T>
    where
        F: FnOnce(&mut T) -> Change,
    {
        self.mutate(|items| match items.iter_mut().find(|item| item.id() == id) {
            Some(item) => update(item),
            None => {
                log::debug!("no item with id {id}");
                Change::Skipped
            }
        })
    }
}
