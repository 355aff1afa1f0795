use crate::availability::AvailabilityConfig;
use crate::csv::ColumnNames;
use crate::error::ConfigError;
use crate::session::{AdvanceMode, ResetPolicy};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "TANGO_QUIZ_CONFIG";
pub const WORDLIST_DIR_ENV: &str = "TANGO_WORDLIST_DIR";
pub const EXPORT_DIR_ENV: &str = "TANGO_EXPORT_DIR";
const DEFAULT_CONFIG_FILE: &str = "tango-quiz.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub wordlist_dir: PathBuf,
    pub export_dir: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub log_file: PathBuf,
    pub word_column: String,
    pub meaning_column: String,
    pub reset_policy: ResetPolicy,
    /// Delay before the next question appears on its own. Manual when unset.
    pub auto_advance_ms: Option<u64>,
    pub exam_date: Option<NaiveDate>,
    pub availability: AvailabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let columns = ColumnNames::default();
        Self {
            wordlist_dir: PathBuf::from("wordlists"),
            export_dir: PathBuf::from("exports"),
            data_dir: None,
            log_file: PathBuf::from("tango_quiz.log"),
            word_column: columns.word,
            meaning_column: columns.meaning,
            reset_policy: ResetPolicy::default(),
            auto_advance_ms: None,
            exam_date: None,
            availability: AvailabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads the config file named by `TANGO_QUIZ_CONFIG`, else `./tango-quiz.json`
    /// when present, else defaults; then applies directory overrides from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path))?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_path(path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var_os(key).map(PathBuf::from));
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<PathBuf>) {
        if let Some(dir) = lookup(WORDLIST_DIR_ENV) {
            self.wordlist_dir = dir;
        }
        if let Some(dir) = lookup(EXPORT_DIR_ENV) {
            self.export_dir = dir;
        }
    }

    pub fn columns(&self) -> ColumnNames {
        ColumnNames {
            word: self.word_column.clone(),
            meaning: self.meaning_column.clone(),
        }
    }

    pub fn advance_mode(&self) -> AdvanceMode {
        match self.auto_advance_ms {
            Some(ms) => AdvanceMode::Auto(Duration::from_millis(ms)),
            None => AdvanceMode::Manual,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        let home_var = if cfg!(target_os = "windows") {
            "USERPROFILE"
        } else {
            "HOME"
        };
        match std::env::var_os(home_var) {
            Some(home) => PathBuf::from(home).join(".local").join("share").join("tango-quiz"),
            None => PathBuf::from(".tango-quiz"),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("results.db")
    }
}
