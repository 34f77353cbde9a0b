use crate::infrastructure::{KeyValueStore, validate_key};
use anyhow::{Context, Result, anyhow};
use duckdb::{Connection, OptionalExt, params};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Schema history, applied in order and recorded in `migrations`.
const MIGRATIONS: &[(i32, &str, &str)] = &[(
    1,
    "create_kv",
    r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
    "#,
)];

pub struct DuckDbStore {
    conn: Mutex<Connection>,
}

impl DuckDbStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open DuckDB connection")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .context("Failed to create in-memory DuckDB connection")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("DuckDB connection lock poisoned"))
    }

    fn initialize(&self) -> Result<()> {
        self.setup_migration_system()?;
        self.run_migrations()
    }

    fn setup_migration_system(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
        "#,
        )
        .context("Failed to create migrations table")?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<()> {
        let applied = self.get_applied_migrations()?;

        for (version, name, sql) in MIGRATIONS {
            if !applied.contains(version) {
                self.apply_migration(*version, name, sql)
                    .with_context(|| format!("Failed to apply migration {}: {}", version, name))?;
                log::info!("applied storage migration {} ({})", version, name);
            }
        }

        Ok(())
    }

    fn get_applied_migrations(&self) -> Result<HashSet<i32>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT version FROM migrations ORDER BY version")
            .context("Failed to prepare migration query")?;

        let rows = stmt.query_map([], |row| row.get::<_, i32>(0))?;

        let mut applied = HashSet::new();
        for version in rows {
            applied.insert(version?);
        }

        Ok(applied)
    }

    fn apply_migration(&self, version: i32, name: &str, sql: &str) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(sql)
            .with_context(|| format!("Failed to execute migration SQL for {}", name))?;

        conn.execute(
            "INSERT INTO migrations (version, name) VALUES (?, ?)",
            params![version, name],
        )
        .with_context(|| format!("Failed to record migration {} as applied", name))?;

        Ok(())
    }

    #[cfg(test)]
    fn applied_migration_count(&self) -> Result<usize> {
        Ok(self.get_applied_migrations()?.len())
    }
}

impl KeyValueStore for DuckDbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let conn = self.conn()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
            row.get::<_, String>(0)
        })
        .optional()
        .with_context(|| format!("Failed to read key {}", key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
            params![key, value],
        )
        .with_context(|| format!("Failed to write key {}", key))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv WHERE key = ?", params![key])
            .with_context(|| format!("Failed to delete key {}", key))?;
        Ok(())
    }

    fn backend_info(&self) -> &str {
        "DuckDB Storage Backend v1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::TestStorage;

    #[test]
    fn in_memory_set_get_delete() {
        let store = DuckDbStore::in_memory().unwrap();

        assert!(store.get("mood-log").unwrap().is_none());
        store.set("mood-log", "{}").unwrap();
        store.set("mood-log", "{\"x\":1}").unwrap();
        assert_eq!(store.get("mood-log").unwrap().as_deref(), Some("{\"x\":1}"));

        store.delete("mood-log").unwrap();
        store.delete("mood-log").unwrap();
        assert!(store.get("mood-log").unwrap().is_none());
    }

    #[test]
    fn migrations_apply_once_across_reopen() {
        let test_storage = TestStorage::new();
        {
            let store = test_storage.duckdb_store();
            store.set("selected-theme", "lavender").unwrap();
            assert_eq!(store.applied_migration_count().unwrap(), MIGRATIONS.len());
        }

        let reopened = test_storage.duckdb_store();
        assert_eq!(reopened.applied_migration_count().unwrap(), MIGRATIONS.len());
        assert_eq!(
            reopened.get("selected-theme").unwrap().as_deref(),
            Some("lavender")
        );
    }

    #[test]
    fn rejects_invalid_keys() {
        let store = DuckDbStore::in_memory().unwrap();
        assert!(store.set("'; DROP TABLE kv; --", "x").is_err());
    }
}
