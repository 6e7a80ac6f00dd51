use hooklab::domain::todo::{Filter, TodoAction, TodoReducer, TodoState};
use hooklab::hooks::{PersistedCell, Reducer};
use hooklab::scheduler::ManualScheduler;
use hooklab::storage::{share, JsonFileStorage, MemoryStorage, StorageBackend};
use hooklab::{initialize, Config, HookError};
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn value_survives_recreating_the_cell() {
    let storage = share(MemoryStorage::new());

    let mut cell = PersistedCell::new("username", "guest".to_string(), storage.clone()).unwrap();
    cell.set("ada".to_string()).unwrap();
    drop(cell);

    let restarted = PersistedCell::new("username", "anything".to_string(), storage).unwrap();
    assert_eq!(restarted.get(), "ada");
}

#[test]
fn updater_form_applies_sequentially() {
    let storage = share(MemoryStorage::new());
    let mut counter = PersistedCell::new("counter", 0_i64, storage.clone()).unwrap();

    for _ in 0..3 {
        counter.update(|prev| prev + 1).unwrap();
    }

    assert_eq!(*counter.get(), 3);
    assert_eq!(storage.borrow().get_item("counter").unwrap().as_deref(), Some("3"));
}

/// Accepts reads, refuses every write.
struct ReadOnlyStorage(MemoryStorage);

impl StorageBackend for ReadOnlyStorage {
    fn get_item(&self, key: &str) -> hooklab::Result<Option<String>> {
        self.0.get_item(key)
    }

    fn set_item(&mut self, _key: &str, _value: String) -> hooklab::Result<()> {
        Err(HookError::Storage("storage is read-only".to_string()))
    }

    fn remove_item(&mut self, _key: &str) -> hooklab::Result<()> {
        Err(HookError::Storage("storage is read-only".to_string()))
    }
}

#[test]
fn failed_write_does_not_roll_back() {
    let storage = share(ReadOnlyStorage(MemoryStorage::new()));
    let mut theme = PersistedCell::new("app-theme", "light".to_string(), storage).unwrap();

    assert!(theme.set("dark".to_string()).is_err());
    assert_eq!(theme.get(), "dark");

    // The caller retries by setting again; the value still holds.
    assert!(theme.update(|prev| prev.clone()).is_err());
    assert_eq!(theme.get(), "dark");
}

#[test]
fn file_backed_cells_survive_process_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    {
        let storage = share(JsonFileStorage::open(&path).unwrap());
        let mut todos = PersistedCell::new("todos", TodoState::default(), storage).unwrap();
        let reducer = TodoReducer;
        for action in [
            TodoAction::add("pack bags"),
            TodoAction::add("check in"),
            TodoAction::Toggle(0),
            TodoAction::SetFilter(Filter::Active),
        ] {
            todos.update(|state| reducer.reduce(state, action)).unwrap();
        }
    }

    let storage = share(JsonFileStorage::open(&path).unwrap());
    let todos = PersistedCell::new("todos", TodoState::default(), storage).unwrap();
    let visible: Vec<&str> = todos.get().visible().map(|t| t.text.as_str()).collect();
    assert_eq!(visible, vec!["check in"]);
    assert_eq!(todos.get().stats().completed, 1);
}

#[test]
fn externally_cleared_key_falls_back_to_initial() {
    let storage = share(MemoryStorage::new());
    let mut cell = PersistedCell::new("draft", String::new(), storage.clone()).unwrap();
    cell.set("hello".to_string()).unwrap();

    storage.borrow_mut().remove_item("draft").unwrap();

    let fresh = PersistedCell::new("draft", "empty".to_string(), storage).unwrap();
    assert_eq!(fresh.get(), "empty");
}

#[test]
fn initialized_context_wires_storage_and_debounce() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        storage_path: Some(dir.path().join("data").join("storage.json")),
        debounce_ms: 300,
        ..Config::default()
    };
    let scheduler = Rc::new(ManualScheduler::new());
    let hooks = initialize(&config, scheduler.clone()).unwrap();

    // Search box feeding a persisted to-do list.
    let mut todos = hooks.persisted("todos", TodoState::default()).unwrap();
    for text in ["buy milk", "book flights", "water plants"] {
        todos
            .update(|state| TodoReducer.reduce(state, TodoAction::add(text)))
            .unwrap();
    }

    let mut query = hooks.debounced(String::new());
    for partial in ["b", "bo", "boo", "book"] {
        query.update(partial.to_string());
        scheduler.advance(Duration::from_millis(50));
    }
    assert_eq!(todos.get().search(&query.read()).len(), 3);

    scheduler.advance(Duration::from_millis(250));
    let hits: Vec<&str> = todos
        .get()
        .search(&query.read())
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(hits, vec!["book flights"]);

    drop(todos);
    let reopened = JsonFileStorage::open(dir.path().join("data").join("storage.json")).unwrap();
    assert!(reopened.get_item("todos").unwrap().is_some());
}

#[test]
fn corrupt_storage_file_does_not_block_startup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ half written").unwrap();

    let config = Config {
        storage_path: Some(path.clone()),
        ..Config::default()
    };
    let hooks = initialize(&config, Rc::new(ManualScheduler::new())).unwrap();

    let mut theme = hooks.persisted("app-theme", "light".to_string()).unwrap();
    assert_eq!(theme.get(), "light");
    theme.set("dark".to_string()).unwrap();

    let reopened = JsonFileStorage::open(&path).unwrap();
    assert_eq!(reopened.get_item("app-theme").unwrap().as_deref(), Some("\"dark\""));

    let kept_aside = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().starts_with("storage.json.corrupt-"));
    assert!(kept_aside);
}

#[test]
fn negative_delay_from_context_is_invalid() {
    let hooks = initialize(&Config::default(), Rc::new(ManualScheduler::new())).unwrap();
    let err = hooks.debounced_with_delay(0, -10).unwrap_err();
    assert!(matches!(err, HookError::InvalidArgument(_)));
    assert!(matches!(
        hooks.persisted("", 0).unwrap_err(),
        HookError::InvalidArgument(_)
    ));
}
