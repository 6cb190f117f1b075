use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Identified, ItemId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub streak: u32,
    /// Local calendar date of the last completion, `YYYY-MM-DD` on disk.
    #[serde(default)]
    pub last_done: Option<NaiveDate>,
}

impl Habit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            streak: 0,
            last_done: None,
        }
    }

    /// Records a completion on `date`. At most one per calendar day; returns
    /// whether anything changed.
    pub fn mark_done(&mut self, date: NaiveDate) -> bool {
        if self.last_done == Some(date) {
            return false;
        }
        self.streak = self.streak.saturating_add(1);
        self.last_done = Some(date);
        true
    }

    pub fn done_on(&self, date: NaiveDate) -> bool {
        self.last_done == Some(date)
    }
}

impl Identified for Habit {
    fn id(&self) -> ItemId {
        self.id
    }
}
