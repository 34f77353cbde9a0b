use anyhow::Result;

/// String key-value persistence the mood store flushes into.
pub trait KeyValueStore {
    /// Read a value, `None` when the key was never written or was deleted
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Get storage backend information
    fn backend_info(&self) -> &str;
}

/// Keys end up in file names and SQL parameters; keep them boring.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        anyhow::bail!("invalid storage key '{}'", key);
    }
    Ok(())
}
