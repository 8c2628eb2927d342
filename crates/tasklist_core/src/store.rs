use crate::model::Task;
use crate::storage::KeyValueStore;
use log::{debug, error, warn};

/// Fixed storage key holding the serialized task list.
pub const TASKS_KEY: &str = "tasks";

type Subscriber = Box<dyn Fn(&[Task])>;

/// Sole owner of the task list. Every mutation replaces the in-memory
/// snapshot, writes it through to the backend, and then notifies
/// subscribers. Persistence failure never rolls a mutation back; the
/// in-memory list stays authoritative.
pub struct TaskListStore {
    tasks: Vec<Task>,
    backend: Box<dyn KeyValueStore>,
    subscribers: Vec<Subscriber>,
}

impl TaskListStore {
    /// Opens the store over `backend`, loading any previously persisted
    /// list. A missing or malformed stored value degrades to an empty
    /// list; this constructor never fails.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let tasks = load(backend.as_ref());
        debug!("event=store_open tasks={}", tasks.len());

        TaskListStore {
            tasks,
            backend,
            subscribers: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Registers a callback invoked with the full list after every
    /// mutation.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&[Task]) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Appends a new task. The id is one past the highest existing id,
    /// or 0 for the first task; ids are never reused within a single
    /// list, only after removal of the current maximum.
    pub fn add(&mut self, content: &str) -> Task {
        let task = Task::new(self.next_id(), content);
        self.tasks.push(task.clone());
        self.committed();
        task
    }

    /// Replaces the content of the task with `id`. Silent no-op when no
    /// such task exists; the placeholder fallback applies only at
    /// creation, not here.
    pub fn set_content(&mut self, id: u64, new_content: &str) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.content = new_content.to_string();
        let updated = task.clone();
        self.committed();
        Some(updated)
    }

    /// Flips the transient edit flag. Silent no-op when `id` is absent.
    pub fn toggle_edit_mode(&mut self, id: u64) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.edit_mode = !task.edit_mode;
        let updated = task.clone();
        self.committed();
        Some(updated)
    }

    /// Flips the completion flag. Silent no-op when `id` is absent.
    pub fn toggle_done(&mut self, id: u64) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.done = !task.done;
        let updated = task.clone();
        self.committed();
        Some(updated)
    }

    /// Removes the task with `id`, preserving the order of the rest.
    /// Silent no-op when `id` is absent.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(index);
        self.committed();
        Some(removed)
    }

    fn next_id(&self) -> u64 {
        self.tasks.iter().map(|task| task.id).max().map_or(0, |max| max + 1)
    }

    fn committed(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.tasks) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!("event=persist_failed key={TASKS_KEY} stage=serialize error={err}");
                return;
            }
        };

        if let Err(err) = self.backend.set(TASKS_KEY, &serialized) {
            error!("event=persist_failed key={TASKS_KEY} stage=write error={err}");
        }
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.tasks);
        }
    }
}

/// Reads the persisted list from `backend`. A missing key yields an
/// empty list; a value that does not parse as the expected layout is
/// treated as absent and logged, never surfaced.
pub fn load(backend: &dyn KeyValueStore) -> Vec<Task> {
    let raw = match backend.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=load_failed key={TASKS_KEY} error={err}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!("event=load_discarded key={TASKS_KEY} error={err}");
            Vec::new()
        }
    }
}
