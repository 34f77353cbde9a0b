use log::{Level, LevelFilter, Log, Record};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    File,
    DuckDb,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::File => "file",
            Backend::DuckDb => "duckdb",
        }
    }
}

pub struct Config {
    pub mood_dir: PathBuf,
    pub data_dir: PathBuf,
    pub backend: Backend,
    pub log_level: LevelFilter,
    pub hooks_enabled: bool,
    /// Problems found while reading variables, reported once logging is up
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unknown values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let mood_dir = lookup("MOOD_DIR").map(PathBuf::from).unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("moodweek")
        });

        let data_dir = mood_dir.join("data");

        let backend = match lookup("MOOD_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("file") => Backend::File,
            Some("duckdb") => Backend::DuckDb,
            Some(other) => {
                warnings.push(format!("unknown MOOD_BACKEND '{}', using file storage", other));
                Backend::File
            }
        };

        let log_level = match lookup("MOOD_LOG") {
            Some(level) => level.trim().parse().unwrap_or_else(|_| {
                warnings.push(format!("unknown MOOD_LOG '{}', using info", level));
                LevelFilter::Info
            }),
            None => LevelFilter::Info,
        };

        let hooks_enabled = lookup("MOOD_NO_HOOKS").is_none();

        Self {
            mood_dir,
            data_dir,
            backend,
            log_level,
            hooks_enabled,
            warnings,
        }
    }

    /// Send collected warnings to the installed logger
    pub fn report_warnings(&self) {
        self.report_warnings_to(log::logger());
    }

    pub fn report_warnings_to(&self, logger: &dyn Log) {
        for warning in &self.warnings {
            logger.log(
                &Record::builder()
                    .level(Level::Warn)
                    .target(module_path!())
                    .args(format_args!("{}", warning))
                    .build(),
            );
        }
        logger.flush();
    }

    pub fn log_file(&self) -> PathBuf {
        self.mood_dir.join("moodweek.log")
    }

    pub fn database_file(&self) -> PathBuf {
        self.mood_dir.join("moods.db")
    }
}
