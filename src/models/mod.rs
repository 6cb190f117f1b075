pub mod habit;
pub mod id;
pub mod project;
pub mod task;

pub use habit::Habit;
pub use id::{Identified, ItemId};
pub use project::{Milestone, Project};
pub use task::{Task, DEFAULT_TASK_MINUTES};
