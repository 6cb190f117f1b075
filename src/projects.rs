use crate::lists::{Change, ListStore, ListView};
use crate::models::{ItemId, Milestone, Project};
use crate::store::StoreAdapter;

const ENABLE_LOGS: bool = true;

use crate::log_info;

pub struct ProjectBoard {
    list: ListStore<Project>,
}

impl ProjectBoard {
    pub fn new(store: StoreAdapter, key: impl Into<String>) -> Self {
        Self {
            list: ListStore::new(store, key),
        }
    }

    pub fn attach_view(&mut self, view: Box<dyn ListView<Project>>) {
        self.list.attach_view(view);
    }

    pub fn items(&self) -> Vec<Project> {
        self.list.load()
    }

    pub fn render(&mut self) -> Vec<Project> {
        self.list.render()
    }

    pub fn add(&mut self, name: &str) -> Vec<Project> {
        let name = name.trim();
        if name.is_empty() {
            log_info!("ignoring project with empty name");
            return self.list.render();
        }
        self.list.insert_front(Project::new(name))
    }

    /// Prepends a milestone to the project with `project_id`.
    pub fn add_milestone(&mut self, project_id: ItemId, text: &str) -> Vec<Project> {
        let text = text.trim();
        if text.is_empty() {
            log_info!("ignoring empty milestone for project {project_id}");
            return self.list.render();
        }
        let milestone = Milestone::new(text);
        self.list.update(project_id, |project| {
            project.add_milestone(milestone);
            Change::Applied
        })
    }

    pub fn clear<P>(&mut self, predicate: P) -> Vec<Project>
    where
        P: FnMut(&Project) -> bool,
    {
        self.list.clear(predicate)
    }

    pub fn wipe_all(&mut self) -> Vec<Project> {
        self.list.wipe_all()
    }
}
