use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Fixed keys for the persisted collections. Each key maps to one JSON
/// document holding the entire collection; every write replaces it whole.
pub const USERS_KEY: &str = "sb_users";
pub const SERVICES_KEY: &str = "sb_services";
pub const BOOKINGS_KEY: &str = "sb_bookings";
pub const AUTH_KEY: &str = "sb_auth";

/// Raw string storage underneath the typed [`Store`]. Implementations must
/// swallow their own I/O failures: a key that cannot be read is absent.
pub trait StorageBackend: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// One JSON file per key under a data directory. Writes overwrite the file
/// in place, so each save is immediately durable.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("could not create data dir {:?}: {}", dir, e);
        }
        FileBackend { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, value: &str) {
        if let Err(e) = fs::write(self.path_for(key), value) {
            warn!("could not persist key {key}: {e}");
        }
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

/// In-memory backend, the test substitute for [`FileBackend`].
#[derive(Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.map.lock().unwrap().remove(key);
    }
}

/// Typed JSON layer over a [`StorageBackend`]. Decode failures read as
/// "no data": callers see an empty collection, never an error.
pub struct Store {
    backend: Box<dyn StorageBackend>,
}

impl Store {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Store { backend }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.load(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("discarding undecodable value for key {key}: {e}");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.save(key, &raw),
            Err(e) => warn!("could not encode value for key {key}: {e}"),
        }
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }
}
