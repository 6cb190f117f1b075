use serde::{Deserialize, Serialize};

use super::{Identified, ItemId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default)]
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Milestone {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            text: text.into(),
            done: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    /// Newest first.
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            milestones: Vec::new(),
        }
    }

    pub fn add_milestone(&mut self, milestone: Milestone) {
        self.milestones.insert(0, milestone);
    }

    /// `(done, total)` milestone counts.
    pub fn progress(&self) -> (usize, usize) {
        let done = self.milestones.iter().filter(|m| m.done).count();
        (done, self.milestones.len())
    }
}

impl Identified for Project {
    fn id(&self) -> ItemId {
        self.id
    }
}
