use std::path::PathBuf;

/// Engine configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        // .env is optional; a missing file is fine
        dotenv::dotenv().ok();
        Self {
            data_dir: std::env::var("FOH_DATA_DIR").unwrap_or_else(|_| "./data".into()),
            log_level: std::env::var("FOH_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("FOH_LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Path of the redb database file under the data directory
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("foh.redb")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
