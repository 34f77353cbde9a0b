/// Test utilities for storage-backed tests
///
/// `TestStorage` owns a fresh temporary mood directory per test and cleans it
/// up when dropped. `MemoryStore` shares its map between clones, so handing a
/// clone to a second `MoodStore` simulates reloading the page.
///
/// ## Usage Examples
///
/// ```rust
/// use crate::infrastructure::test_utils::test_harness::{MemoryStore, TestStorage};
///
/// #[test]
/// fn my_test() {
///     let test_storage = TestStorage::new();
///     let store = test_storage.file_store();
///     // Directory is removed when test_storage is dropped
///
///     let memory = MemoryStore::new();
///     let reloaded = memory.clone();
/// }
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::infrastructure::{
        DuckDbStore, FileSystemStore, HookRegistry, KeyValueStore, WriteLogHook,
    };
    use anyhow::Result;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Temporary mood directory with helpers for each real backend
    pub struct TestStorage {
        _temp_dir: TempDir,
    }

    impl TestStorage {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            Self {
                _temp_dir: temp_dir,
            }
        }

        pub fn mood_dir(&self) -> PathBuf {
            self._temp_dir.path().to_path_buf()
        }

        pub fn data_dir(&self) -> PathBuf {
            self.mood_dir().join("data")
        }

        pub fn file_store(&self) -> FileSystemStore {
            FileSystemStore::new(self.data_dir(), self.mood_dir())
        }

        pub fn file_store_with_write_log(&self) -> FileSystemStore {
            let mut hooks = HookRegistry::new();
            hooks.register(WriteLogHook);
            FileSystemStore::with_hooks(self.data_dir(), self.mood_dir(), hooks)
        }

        pub fn duckdb_store(&self) -> DuckDbStore {
            DuckDbStore::new(self.mood_dir().join("moods.db"))
                .expect("Failed to initialize test DuckDB storage")
        }
    }

    /// In-memory store; clones see the same data
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        values: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a raw value, bypassing any serialization
        pub fn with_value(self, key: &str, value: &str) -> Self {
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            self
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.values.borrow().get(key).cloned()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<()> {
            self.values.borrow_mut().remove(key);
            Ok(())
        }

        fn backend_info(&self) -> &str {
            "In-Memory Test Backend"
        }
    }

    /// Wraps a `MemoryStore` whose next `failures` reads error out
    pub struct FlakyReadStore {
        inner: MemoryStore,
        failures: Cell<usize>,
    }

    impl FlakyReadStore {
        pub fn new(inner: MemoryStore, failures: usize) -> Self {
            Self {
                inner,
                failures: Cell::new(failures),
            }
        }
    }

    impl KeyValueStore for FlakyReadStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            let remaining = self.failures.get();
            if remaining > 0 {
                self.failures.set(remaining - 1);
                anyhow::bail!("storage busy reading {}", key);
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<()> {
            self.inner.delete(key)
        }

        fn backend_info(&self) -> &str {
            "Flaky Test Backend"
        }
    }

    /// Reads succeed with nothing stored; every write fails
    pub struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("quota exceeded writing {}", key)
        }

        fn delete(&self, key: &str) -> Result<()> {
            anyhow::bail!("store unavailable deleting {}", key)
        }

        fn backend_info(&self) -> &str {
            "Failing Test Backend"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::infrastructure::KeyValueStore;

    #[test]
    fn memory_store_clones_share_data() {
        let store = MemoryStore::new();
        let reloaded = store.clone();

        store.set("selected-theme", "blue").unwrap();

        assert_eq!(reloaded.get("selected-theme").unwrap().as_deref(), Some("blue"));
    }

    #[test]
    fn test_storage_isolation() {
        let first = TestStorage::new();
        let second = TestStorage::new();

        first.file_store().set("mood-log", "{}").unwrap();

        assert!(second.file_store().get("mood-log").unwrap().is_none());
    }

    #[test]
    fn flaky_store_recovers_after_failed_reads() {
        let memory = MemoryStore::new().with_value("mood-log", "{}");
        let store = FlakyReadStore::new(memory, 1);

        assert!(store.get("mood-log").is_err());
        assert_eq!(store.get("mood-log").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn failing_store_rejects_writes() {
        assert!(FailingStore.set("mood-log", "{}").is_err());
        assert!(FailingStore.delete("mood-log").is_err());
        assert!(FailingStore.get("mood-log").unwrap().is_none());
    }
}
