use crate::infrastructure::{HookRegistry, KeyValueStore, WriteContext, WriteKind, validate_key};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// One JSON file per key under the data directory.
pub struct FileSystemStore {
    data_dir: PathBuf,
    mood_dir: PathBuf,
    hook_registry: HookRegistry,
}

impl FileSystemStore {
    pub fn new(data_dir: PathBuf, mood_dir: PathBuf) -> Self {
        Self {
            data_dir,
            mood_dir,
            hook_registry: HookRegistry::new(),
        }
    }

    pub fn with_hooks(data_dir: PathBuf, mood_dir: PathBuf, hook_registry: HookRegistry) -> Self {
        Self {
            data_dir,
            mood_dir,
            hook_registry,
        }
    }

    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileSystemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create {}", self.data_dir.display()))?;

        // Write then rename so a crash never leaves half a log behind
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        self.hook_registry.execute_write_hooks(&WriteContext {
            key: key.to_string(),
            kind: WriteKind::Set,
            path,
            mood_dir: self.mood_dir.clone(),
            content_len: value.len(),
        });

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to delete {}", path.display()));
            }
        }

        self.hook_registry.execute_write_hooks(&WriteContext {
            key: key.to_string(),
            kind: WriteKind::Delete,
            path,
            mood_dir: self.mood_dir.clone(),
            content_len: 0,
        });

        Ok(())
    }

    fn backend_info(&self) -> &str {
        "File System Storage Backend v1.0"
    }
}
