use std::sync::Arc;

use chrono::NaiveDate;
use focusboard::{
    Dashboard, DashboardSettings, Database, MemoryStore, StoreAdapter, StoreKeys, TaskList,
};
use proptest::prelude::*;

#[test]
fn collections_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut dashboard = Dashboard::open(dir.path()).unwrap();
        assert!(dashboard.store().is_attached());
        dashboard.tasks().add("write summary", Some(40));
        let project = dashboard.projects().add("garden")[0].id;
        dashboard.projects().add_milestone(project, "buy seeds");
        let habit = dashboard.habits().add("stretch")[0].id;
        dashboard
            .habits()
            .mark_done_on(habit, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    }

    let mut dashboard = Dashboard::open(dir.path()).unwrap();
    let tasks = dashboard.tasks().render();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].minutes, 40);

    let projects = dashboard.projects().render();
    assert_eq!(projects[0].milestones[0].text, "buy seeds");

    let habits = dashboard.habits().render();
    assert_eq!(habits[0].streak, 1);
}

#[test]
fn sequential_writers_see_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let mut tab_a = Dashboard::open(dir.path()).unwrap();
    let mut tab_b = Dashboard::open(dir.path()).unwrap();

    tab_a.tasks().add("from a", None);
    let tasks = tab_b.tasks().add("from b", None);

    let texts: Vec<_> = tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["from b", "from a"]);
}

#[test]
fn interleaved_writers_last_save_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.sqlite3");
    let tab_a = StoreAdapter::new(Arc::new(Database::new(path.clone()).unwrap()));
    let tab_b = StoreAdapter::new(Arc::new(Database::new(path).unwrap()));
    let key = StoreKeys::default().tasks;

    let mut seen_by_a: Vec<String> = tab_a.load(&key, Vec::new());
    let mut seen_by_b: Vec<String> = tab_b.load(&key, Vec::new());
    seen_by_a.push("a".into());
    seen_by_b.push("b".into());
    tab_a.save(&key, &seen_by_a);
    tab_b.save(&key, &seen_by_b);

    let stored: Vec<String> = tab_a.load(&key, Vec::new());
    assert_eq!(stored, vec!["b".to_string()]);
}

#[test]
fn corrupt_row_reads_as_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = Dashboard::open(dir.path()).unwrap();
    let key = dashboard.keys().tasks.clone();

    let raw = Database::new(dir.path().join("focusboard.sqlite3")).unwrap();
    raw.put_value(&key, "{{{ definitely not json").unwrap();

    assert!(dashboard.tasks().render().is_empty());
    let tasks = dashboard.tasks().add("fresh start", None);
    assert_eq!(tasks.len(), 1);
    assert!(raw.get_entry(&key).unwrap().unwrap().value.contains("fresh start"));
}

#[test]
fn unopenable_database_degrades_to_detached_store() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("focusboard.sqlite3")).unwrap();

    let mut dashboard = Dashboard::open(dir.path()).unwrap();
    assert!(!dashboard.store().is_attached());
    assert!(dashboard.tasks().add("goes nowhere", None).is_empty());
    assert!(dashboard.habits().add("nor this").is_empty());
}

#[test]
fn namespace_from_settings_prefixes_keys() {
    let store = Arc::new(MemoryStore::new());
    let settings = DashboardSettings {
        store_namespace: "work".into(),
        ..DashboardSettings::default()
    };
    let mut dashboard = Dashboard::with_store(StoreAdapter::new(store.clone()), &settings);

    dashboard.tasks().add("ship it", None);
    assert!(store.raw("work.tasks").is_some());
    assert!(store.raw("focusboard.tasks").is_none());
}

#[test]
fn settings_default_minutes_apply_to_new_tasks() {
    let mut settings = DashboardSettings::default();
    settings.tasks.default_minutes = 15;
    let mut dashboard =
        Dashboard::with_store(StoreAdapter::new(Arc::new(MemoryStore::new())), &settings);

    let tasks = dashboard.tasks().add("short one", None);
    assert_eq!(tasks[0].minutes, 15);
}

#[test]
fn wipe_all_clears_regardless_of_content() {
    let mut dashboard = Dashboard::with_store(
        StoreAdapter::new(Arc::new(MemoryStore::new())),
        &DashboardSettings::default(),
    );
    for i in 0..5 {
        dashboard.tasks().add(&format!("task {i}"), Some(i * 10));
    }

    dashboard.tasks().wipe_all();
    assert!(dashboard.tasks().items().is_empty());
    dashboard.render_all();
}

#[test]
fn entries_saved_before_ids_existed_accept_updates() {
    let store = Arc::new(MemoryStore::new());
    store.insert_raw("focusboard.tasks", r#"[{"text":"A","done":false,"minutes":25}]"#);
    store.insert_raw("focusboard.habits", r#"[{"name":"read","streak":2}]"#);
    store.insert_raw(
        "focusboard.projects",
        r#"[{"name":"garden","milestones":[{"text":"dig"}]}]"#,
    );
    let mut dashboard =
        Dashboard::with_store(StoreAdapter::new(store.clone()), &DashboardSettings::default());

    let task = dashboard.tasks().render()[0].id;
    let tasks = dashboard.tasks().toggle_done(task);
    assert_eq!(tasks[0].id, task);
    assert!(tasks[0].done);
    assert!(store.raw("focusboard.tasks").unwrap().contains("\"done\":true"));

    let habit = dashboard.habits().render()[0].id;
    let habits = dashboard
        .habits()
        .mark_done_on(habit, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    assert_eq!(habits[0].id, habit);
    assert_eq!(habits[0].streak, 3);

    let project = dashboard.projects().render()[0].id;
    let projects = dashboard.projects().add_milestone(project, "plant");
    let texts: Vec<_> = projects[0].milestones.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["plant", "dig"]);

    // a fresh dashboard over the same store sees the same ids
    let mut reopened =
        Dashboard::with_store(StoreAdapter::new(store), &DashboardSettings::default());
    assert_eq!(reopened.tasks().render()[0].id, task);
    assert_eq!(reopened.habits().render()[0].id, habit);
    assert_eq!(reopened.projects().render()[0].id, project);
}

#[derive(Debug, Clone)]
enum TaskOp {
    Add(String, u32),
    Toggle(usize),
    ClearCompleted,
    WipeAll,
}

fn task_op() -> impl Strategy<Value = TaskOp> {
    prop_oneof![
        4 => ("[a-z]{1,8}", 1u32..120).prop_map(|(text, minutes)| TaskOp::Add(text, minutes)),
        3 => any::<usize>().prop_map(TaskOp::Toggle),
        1 => Just(TaskOp::ClearCompleted),
        1 => Just(TaskOp::WipeAll),
    ]
}

type Visible = Vec<(String, bool, u32)>;

fn visible(tasks: &[focusboard::models::Task]) -> Visible {
    tasks
        .iter()
        .map(|t| (t.text.clone(), t.done, t.minutes))
        .collect()
}

proptest! {
    #[test]
    fn failed_writes_never_change_what_is_visible(
        ops in prop::collection::vec((task_op(), any::<bool>()), 1..40)
    ) {
        let store = Arc::new(MemoryStore::new());
        let mut tasks = TaskList::new(StoreAdapter::new(store.clone()), "prop.tasks", 25);

        for (op, fail_write) in ops {
            let before = tasks.items();
            let mut expected = visible(&before);

            store.set_fail_writes(fail_write);
            let after = match op {
                TaskOp::Add(text, minutes) => {
                    expected.insert(0, (text.clone(), false, minutes));
                    tasks.add(&text, Some(minutes))
                }
                TaskOp::Toggle(_) if before.is_empty() => tasks.render(),
                TaskOp::Toggle(index) => {
                    let index = index % before.len();
                    expected[index].1 = !expected[index].1;
                    tasks.toggle_done(before[index].id)
                }
                TaskOp::ClearCompleted => {
                    expected.retain(|(_, done, _)| !done);
                    tasks.clear_completed()
                }
                TaskOp::WipeAll => {
                    expected.clear();
                    tasks.wipe_all()
                }
            };
            store.set_fail_writes(false);

            if fail_write {
                prop_assert_eq!(&after, &before);
            } else {
                prop_assert_eq!(visible(&after), expected);
            }
            prop_assert_eq!(tasks.items(), after);
        }
    }
}
