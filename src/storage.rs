//! Device key-value storage behind a small trait.
//!
//! The background tracker and persisted counter only need a string map with
//! durable backing. `FileStore` is the production implementation (a JSON map
//! under `~/.petsoft/`); `MemoryStore` backs tests and the simulator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Async-free key→string storage. All mutation happens on the single
/// cooperative thread, one writer per key, so no locking is needed.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Get the ~/.petsoft/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".petsoft");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Write-through JSON map file.
///
/// The whole map is held in memory and rewritten on every `set`/`remove`;
/// the stores built on top of this already debounce their writes, so the
/// file churn stays low.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens the default store at ~/.petsoft/storage.json.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::open(data_dir()?.join("storage.json")))
    }

    /// Opens a store at an explicit path. A missing or unreadable file is
    /// treated as an empty map.
    pub fn open(path: PathBuf) -> Self {
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    fn persist(&self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    write_count: usize,
    fail_writes: bool,
}

/// Shared in-memory store. Clones share the same map, so a test can hold
/// one handle for inspection while a tracker or counter owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls across all handles.
    pub fn write_count(&self) -> usize {
        self.inner.borrow().write_count
    }

    /// When set, every `set`/`remove` fails with a simulated I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Seeds a value without counting it as a write.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(io::Error::new(io::ErrorKind::Other, "simulated write failure"));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.write_count += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(io::Error::new(io::ErrorKind::Other, "simulated write failure"));
        }
        inner.entries.remove(key);
        Ok(())
    }
}
