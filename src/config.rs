use crate::components::shift::WorkType;
use crate::error::{config_error, env_error, ScheduleResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default timezone used to decide what "today" is
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";
/// Default number of days added to the start of a new range
pub const DEFAULT_RANGE_DAYS: u32 = 6;
/// Optional file overriding environment settings
pub const CONFIG_FILE: &str = "config/schedule.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timezone for calendar dates
    pub timezone: String,
    /// UI locale (en, ko)
    pub locale: String,
    /// Work type assumed for users that never completed onboarding
    pub default_work_type: WorkType,
    /// Days added to the start date when proposing a range
    pub default_range_days: u32,
    /// Schedule snapshot used by the command line tool
    pub schedule_file: PathBuf,
}

/// Values a config file may override. Everything is optional.
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    timezone: Option<String>,
    locale: Option<String>,
    default_work_type: Option<String>,
    default_range_days: Option<u32>,
    schedule_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: "en".to_string(),
            default_work_type: WorkType::Irregular,
            default_range_days: DEFAULT_RANGE_DAYS,
            schedule_file: PathBuf::from("data/schedule.json"),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> ScheduleResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_env()?;

        if Path::new(CONFIG_FILE).exists() {
            let content = fs::read_to_string(CONFIG_FILE)?;
            config.apply_overrides(&content)?;
            debug!("Applied overrides from {}", CONFIG_FILE);
        }

        config.validate()?;
        Ok(config)
    }

    /// Build configuration from environment variables only
    pub fn from_env() -> ScheduleResult<Self> {
        let defaults = Self::default();

        let timezone = env::var("TIMEZONE").unwrap_or(defaults.timezone);
        let locale = env::var("APP_LOCALE").unwrap_or(defaults.locale);

        let default_work_type = env::var("DEFAULT_WORK_TYPE")
            .map(|s| WorkType::from_str_lenient(&s))
            .unwrap_or(defaults.default_work_type);

        let default_range_days = match env::var("DEFAULT_RANGE_DAYS") {
            Ok(value) => value
                .parse::<u32>()
                .map_err(|_| env_error("DEFAULT_RANGE_DAYS"))?,
            Err(_) => defaults.default_range_days,
        };

        let schedule_file = env::var("SCHEDULE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.schedule_file);

        Ok(Config {
            timezone,
            locale,
            default_work_type,
            default_range_days,
            schedule_file,
        })
    }

    /// Merge TOML overrides into this config
    pub fn apply_overrides(&mut self, toml_str: &str) -> ScheduleResult<()> {
        let overrides: FileOverrides = toml::from_str(toml_str)?;

        if let Some(timezone) = overrides.timezone {
            self.timezone = timezone;
        }
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        if let Some(work_type) = overrides.default_work_type {
            self.default_work_type = WorkType::from_str_lenient(&work_type);
        }
        if let Some(days) = overrides.default_range_days {
            self.default_range_days = days;
        }
        if let Some(path) = overrides.schedule_file {
            self.schedule_file = path;
        }
        Ok(())
    }

    fn validate(&self) -> ScheduleResult<()> {
        self.tz()?;
        Ok(())
    }

    /// Parsed timezone
    pub fn tz(&self) -> ScheduleResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}
