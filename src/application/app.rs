use crate::application::{Backend, Config, WidgetController, WidgetTui};
use crate::domain::{DisplayWeek, Mood, MoodRecord, MoodStore, TemporalKey, ThemeName};
use crate::infrastructure::{
    DuckDbStore, FileSystemStore, HookRegistry, KeyValueStore, WriteLogHook, init_file_logger,
};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

pub struct MoodApp {
    store: MoodStore,
    config: Config,
}

impl MoodApp {
    pub fn new() -> Result<Self> {
        let config = Config::from_env();
        if let Err(e) = init_file_logger(&config.log_file(), config.log_level) {
            eprintln!("Warning: logging disabled: {:#}", e);
            for warning in &config.warnings {
                eprintln!("Warning: {}", warning);
            }
        }
        config.report_warnings();
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let storage = Self::open_storage(&config)?;
        log::info!("opened {}", storage.backend_info());
        let store = MoodStore::load(storage);

        Ok(Self { store, config })
    }

    fn open_storage(config: &Config) -> Result<Box<dyn KeyValueStore>> {
        std::fs::create_dir_all(&config.mood_dir)
            .with_context(|| format!("Failed to create {}", config.mood_dir.display()))?;

        let storage: Box<dyn KeyValueStore> = match config.backend {
            Backend::File => {
                // Set up hook registry with default plugins
                let mut hook_registry = HookRegistry::new();
                if config.hooks_enabled {
                    hook_registry.register(WriteLogHook);
                }
                Box::new(FileSystemStore::with_hooks(
                    config.data_dir.clone(),
                    config.mood_dir.clone(),
                    hook_registry,
                ))
            }
            Backend::DuckDb => Box::new(
                DuckDbStore::new(config.database_file())
                    .context("Failed to initialize DuckDB storage")?,
            ),
        };
        Ok(storage)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &MoodStore {
        &self.store
    }

    /// Run the interactive widget for the week containing `date`
    pub fn run_widget(&mut self, date: NaiveDate) -> Result<()> {
        let controller = WidgetController::new(&mut self.store, DisplayWeek::containing(date));
        let mut tui = WidgetTui::new(controller, date.weekday())?;
        tui.run()?;
        Ok(())
    }

    pub fn record_mood(&mut self, date: NaiveDate, mood: Mood) -> Result<TemporalKey> {
        let key = MoodStore::temporal_key(date);
        self.store.set(key, mood.record());
        self.fail_on_warning()?;
        Ok(key)
    }

    pub fn entries(&self) -> Vec<(TemporalKey, MoodRecord)> {
        self.store
            .entries()
            .map(|(key, record)| (*key, record.clone()))
            .collect()
    }

    pub fn theme(&self) -> ThemeName {
        self.store.theme()
    }

    pub fn set_theme(&mut self, name: &str) -> Result<ThemeName> {
        let theme = self.store.set_theme_by_name(name)?;
        self.fail_on_warning()?;
        Ok(theme)
    }

    pub fn reset(&mut self) -> Result<usize> {
        let cleared = self.store.len();
        self.store.reset_all();
        self.fail_on_warning()?;
        Ok(cleared)
    }

    /// Headless commands have no status line, so a storage warning becomes an error
    fn fail_on_warning(&mut self) -> Result<()> {
        match self.store.take_warning() {
            Some(warning) => Err(anyhow::anyhow!(warning)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::TestStorage;
    use log::LevelFilter;

    fn config_for(test_storage: &TestStorage, backend: Backend) -> Config {
        Config {
            mood_dir: test_storage.mood_dir(),
            data_dir: test_storage.data_dir(),
            backend,
            log_level: LevelFilter::Off,
            hooks_enabled: true,
            warnings: Vec::new(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn headless_commands_round_trip_on_file_backend() {
        let test_storage = TestStorage::new();
        {
            let mut app = MoodApp::with_config(config_for(&test_storage, Backend::File)).unwrap();
            app.record_mood(date(2024, 3, 15), Mood::Good).unwrap();
            app.record_mood(date(2024, 3, 14), Mood::Meh).unwrap();
            app.set_theme("green").unwrap();
        }

        let app = MoodApp::with_config(config_for(&test_storage, Backend::File)).unwrap();
        let dates: Vec<String> = app.entries().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(dates, ["2024-03-14", "2024-03-15"]);
        assert_eq!(app.theme(), ThemeName::Green);
        assert!(test_storage.mood_dir().join("write_log.txt").exists());
    }

    #[test]
    fn reset_reports_cleared_count_on_duckdb_backend() {
        let test_storage = TestStorage::new();
        let mut app = MoodApp::with_config(config_for(&test_storage, Backend::DuckDb)).unwrap();
        app.record_mood(date(2024, 3, 15), Mood::Calm).unwrap();
        app.record_mood(date(2024, 3, 16), Mood::Social).unwrap();

        assert_eq!(app.reset().unwrap(), 2);
        assert_eq!(app.reset().unwrap(), 0);
        assert!(app.entries().is_empty());
    }

    #[test]
    fn invalid_theme_is_an_error() {
        let test_storage = TestStorage::new();
        let mut app = MoodApp::with_config(config_for(&test_storage, Backend::File)).unwrap();
        assert!(app.set_theme("teal").is_err());
        assert_eq!(app.theme(), ThemeName::Pink);
    }
}
