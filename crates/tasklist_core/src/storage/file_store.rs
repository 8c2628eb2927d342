use crate::error::StoreError;
use crate::storage::KeyValueStore;
use std::path::{Path, PathBuf};

pub const STORE_DIR_ENV_VAR: &str = "TASKLIST_STORE_DIR";

/// File-backed key-value store: each key maps to `<dir>/<key>.json`.
/// The directory is created lazily on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(&path).map_err(|err| StoreError::io(err.to_string()))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|err| StoreError::io(err.to_string()))?;

        let path = self.entry_path(key);
        std::fs::write(&path, value).map_err(|err| StoreError::io(err.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)
                .map_err(|err| StoreError::io(err.to_string()))?;
        }

        Ok(())
    }
}

/// Platform config location for the persisted list. Callers that want
/// the `TASKLIST_STORE_DIR` override check the env var themselves and
/// fall back here.
pub fn default_store_dir() -> Result<PathBuf, StoreError> {
    if cfg!(windows) {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| StoreError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("tasklist"))
    } else {
        let home =
            std::env::var("HOME").map_err(|_| StoreError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join("tasklist"))
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::storage::KeyValueStore;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tasklist-{nanos}-{name}"))
    }

    #[test]
    fn get_on_missing_directory_returns_none() {
        let store = FileStore::new(temp_dir("missing"));
        assert_eq!(store.get("tasks").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips_the_value() {
        let dir = temp_dir("round-trip");
        let mut store = FileStore::new(&dir);

        store.set("tasks", "[{\"id\":0}]").unwrap();
        let loaded = store.get("tasks").unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.as_deref(), Some("[{\"id\":0}]"));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let dir = temp_dir("overwrite");
        let mut store = FileStore::new(&dir);

        store.set("tasks", "first").unwrap();
        store.set("tasks", "second").unwrap();
        let loaded = store.get("tasks").unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.as_deref(), Some("second"));
    }

    #[test]
    fn keys_map_to_separate_files() {
        let dir = temp_dir("keys");
        let mut store = FileStore::new(&dir);

        store.set("tasks", "a").unwrap();
        store.set("other", "b").unwrap();

        let tasks_file = dir.join("tasks.json");
        let other_file = dir.join("other.json");
        let both_exist = tasks_file.exists() && other_file.exists();
        std::fs::remove_dir_all(&dir).ok();

        assert!(both_exist);
    }
}
