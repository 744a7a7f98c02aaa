use crate::database::Database;
use crate::date_provider::{DateProvider, OverrideDateProvider, SystemDateProvider};
use chrono::NaiveDate;
use rusqlite::Result;
use std::sync::Arc;

const DEFAULT_DB_PATH: &str = "survey_insights.db";

/// Database configuration
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// Whether to use an in-memory database
    pub is_test_mode: bool,
    /// Custom database file path (ignored in test mode)
    pub custom_path: Option<String>,
    /// Pinned "today" for reproducible reports
    pub override_date: Option<NaiveDate>,
}

impl DatabaseConfig {
    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }

    /// Gets the effective database path
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or(DEFAULT_DB_PATH)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    pub fn test_mode(mut self) -> Self {
        self.config.is_test_mode = true;
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.config.custom_path = Some(path.to_string());
        self
    }

    pub fn override_date(mut self, date: NaiveDate) -> Self {
        self.config.override_date = Some(date);
        self
    }

    pub fn date_ymd(self, year: i32, month: u32, day: u32) -> Self {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => self.override_date(date),
            None => self,
        }
    }

    pub fn build(self) -> DatabaseConfig {
        self.config
    }
}

/// Factory for creating Database instances
pub struct DatabaseFactory;

impl DatabaseFactory {
    /// Creates a database with the specified configuration
    pub fn create(config: DatabaseConfig) -> Result<Database> {
        let date_provider: Arc<dyn DateProvider> = match config.override_date {
            Some(date) => Arc::new(OverrideDateProvider::new(date)),
            None => Arc::new(SystemDateProvider),
        };
        Database::with_date_provider(config.get_path(), date_provider)
    }
}
