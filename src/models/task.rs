use serde::{Deserialize, Serialize};

use super::{Identified, ItemId};

pub const DEFAULT_TASK_MINUTES: u32 = 25;

fn default_minutes() -> u32 {
    DEFAULT_TASK_MINUTES
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Entries written before ids existed get a fresh one on load.
    #[serde(default)]
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default = "default_minutes")]
    pub minutes: u32,
}

impl Task {
    pub fn new(text: impl Into<String>, minutes: u32) -> Self {
        Self {
            id: ItemId::new(),
            text: text.into(),
            done: false,
            minutes,
        }
    }
}

impl Identified for Task {
    fn id(&self) -> ItemId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_entry_gets_defaults() {
        let task: Task = serde_json::from_str(r#"{"text":"write report"}"#).unwrap();
        assert_eq!(task.text, "write report");
        assert!(!task.done);
        assert_eq!(task.minutes, DEFAULT_TASK_MINUTES);
    }
}
