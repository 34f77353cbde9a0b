use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Set,
    Delete,
}

/// Context provided to write hooks
#[derive(Debug, Clone)]
pub struct WriteContext {
    pub key: String,
    pub kind: WriteKind,
    pub path: PathBuf,
    pub mood_dir: PathBuf,
    /// Bytes written; zero for deletes
    pub content_len: usize,
}

/// Trait for plugins that respond to persisted writes
pub trait WriteHook: Send + Sync {
    /// Called after a value has been successfully written or deleted
    fn on_write(&self, context: &WriteContext) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing write hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn WriteHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new write hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: WriteHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Execute all registered hooks. A failing hook never fails the write.
    pub fn execute_write_hooks(&self, context: &WriteContext) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_write(context) {
                log::warn!("hook '{}' failed for key {}: {:#}", hook.name(), context.key, e);
            }
        }
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
