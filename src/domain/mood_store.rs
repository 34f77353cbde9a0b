use crate::domain::{MoodRecord, TemporalKey, ThemeName, temporal_key};
use crate::infrastructure::KeyValueStore;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const MOOD_LOG_KEY: &str = "mood-log";
pub const THEME_KEY: &str = "selected-theme";

pub type MoodLog = BTreeMap<TemporalKey, MoodRecord>;

/// In-memory snapshot of the mood log and theme, flushed on every mutation.
pub struct MoodStore {
    log: MoodLog,
    theme: ThemeName,
    storage: Box<dyn KeyValueStore>,
    /// False while the persisted log could not be read; flushing then merges first.
    log_loaded: bool,
    warning: Option<String>,
    warned: bool,
}

impl MoodStore {
    /// Load both persisted values. Anything absent or malformed falls back
    /// to an empty log and the default theme; a log that could not be read
    /// is merged back in on the next flush.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            log: MoodLog::new(),
            theme: ThemeName::default(),
            storage,
            log_loaded: false,
            warning: None,
            warned: false,
        };

        match store.read_persisted_log() {
            Ok(log) => {
                store.log = log;
                store.log_loaded = true;
            }
            Err(e) => store.report_failure("load the mood log", &e),
        }
        store.theme = store.load_theme();

        log::debug!(
            "loaded {} mood entries and theme {} from {}",
            store.log.len(),
            store.theme,
            store.storage.backend_info()
        );
        store
    }

    pub fn temporal_key(date: NaiveDate) -> TemporalKey {
        temporal_key(date)
    }

    pub fn get(&self, key: &TemporalKey) -> Option<&MoodRecord> {
        self.log.get(key)
    }

    /// Overwrite the record for `key` and flush the whole log.
    pub fn set(&mut self, key: TemporalKey, record: MoodRecord) {
        log::info!("recording mood {} for {}", record.label, key);
        self.log.insert(key, record);
        self.flush_log();
    }

    /// Forget every mood, in memory and in storage. The theme is kept.
    pub fn reset_all(&mut self) {
        log::info!("resetting mood log ({} entries)", self.log.len());
        self.log.clear();
        match self.storage.delete(MOOD_LOG_KEY) {
            Ok(()) => self.log_loaded = true,
            Err(e) => self.report_failure("clear the mood log", &e),
        }
    }

    /// Persisted theme, or the default when absent or unrecognized.
    pub fn load_theme(&mut self) -> ThemeName {
        match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                log::warn!("ignoring stored theme: {:#}", e);
                ThemeName::default()
            }),
            Ok(None) => ThemeName::default(),
            Err(e) => {
                self.report_failure("load the theme", &e);
                ThemeName::default()
            }
        }
    }

    /// Theme currently in effect for this session.
    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        log::info!("switching theme to {}", theme);
        self.theme = theme;
        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
            self.report_failure("save the theme", &e);
        }
    }

    /// Entry point for untrusted names; rejects anything outside the catalog.
    pub fn set_theme_by_name(&mut self, name: &str) -> Result<ThemeName> {
        let theme: ThemeName = name.parse()?;
        self.set_theme(theme);
        Ok(theme)
    }

    /// Whole log, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = (&TemporalKey, &MoodRecord)> {
        self.log.iter()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn backend_info(&self) -> &str {
        self.storage.backend_info()
    }

    /// Pending user-facing storage warning. At most one is ever produced.
    pub fn take_warning(&mut self) -> Option<String> {
        self.warning.take()
    }

    /// Persisted log; malformed data counts as empty, read errors do not.
    fn read_persisted_log(&self) -> Result<MoodLog> {
        let log = match self.storage.get(MOOD_LOG_KEY)? {
            Some(raw) => serde_json::from_str::<MoodLog>(&raw).unwrap_or_else(|e| {
                log::warn!("ignoring malformed {}: {}", MOOD_LOG_KEY, e);
                MoodLog::new()
            }),
            None => MoodLog::new(),
        };
        Ok(log)
    }

    /// Pull in the stored history that failed to load, keeping this session's records.
    fn recover_unloaded_log(&mut self) -> Result<()> {
        if self.log_loaded {
            return Ok(());
        }

        let persisted = self.read_persisted_log()?;
        log::info!("recovered {} stored mood entries", persisted.len());
        for (key, record) in persisted {
            self.log.entry(key).or_insert(record);
        }
        self.log_loaded = true;
        Ok(())
    }

    fn flush_log(&mut self) {
        // Never overwrite a history we have not seen.
        if let Err(e) = self.recover_unloaded_log() {
            self.report_failure("save your mood", &e);
            return;
        }

        let result = serde_json::to_string(&self.log)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.storage.set(MOOD_LOG_KEY, &json));
        if let Err(e) = result {
            self.report_failure("save your mood", &e);
        }
    }

    fn report_failure(&mut self, action: &str, error: &anyhow::Error) {
        log::error!("failed to {}: {:#}", action, error);
        if !self.warned {
            self.warned = true;
            self.warning = Some(format!(
                "Could not {}; changes may not survive a restart",
                action
            ));
        }
    }
}
