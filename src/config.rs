use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::utils::error::{AppError, Result};

/// Environment prefix for overriding config file values (`PRICE_ALERT_PASSWORD`, ...).
pub const ENV_PREFIX: &str = "PRICE_ALERT";

pub const DEFAULT_TITLE_ID: &str = "productTitle";
pub const DEFAULT_PRICE_ID: &str = "priceblock_ourprice";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Run configuration, read once at startup and passed to every stage.
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// Path of the price log.
    pub file: String,
    pub url: String,
    pub sender: String,
    pub recipient: String,
    pub password: String,
    /// SMTP relay host.
    pub smtp: String,
    pub port: u16,
    pub lower: f64,
    pub upper: f64,

    #[serde(default = "default_title_id")]
    pub title_id: String,
    #[serde(default = "default_price_id")]
    pub price_id: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_title_id() -> String {
    DEFAULT_TITLE_ID.to_string()
}

fn default_price_id() -> String {
    DEFAULT_PRICE_ID.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_decimal_separator() -> char {
    ','
}

impl AppConfig {
    /// Loads the JSON config file at `path`, with `PRICE_ALERT_*` environment
    /// variables taking precedence over file values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let s = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Json))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;

        tracing::debug!(path = %path.display(), url = %config.url, "Loaded configuration");
        Ok(config)
    }

    /// Checks the fields whose type alone does not guarantee they are usable.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.url)
            .map_err(|e| AppError::InvalidConfig(format!("Invalid url '{}': {}", self.url, e)))?;

        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(AppError::InvalidConfig(
                "Price bounds lower and upper must be finite numbers".into(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "timeout_secs must be at least 1".into(),
            ));
        }

        if self.lower >= self.upper {
            tracing::warn!(
                lower = self.lower,
                upper = self.upper,
                "Price window is empty, no alert can ever be sent"
            );
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("file", &self.file)
            .field("url", &self.url)
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("password", &"<redacted>")
            .field("smtp", &self.smtp)
            .field("port", &self.port)
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("title_id", &self.title_id)
            .field("price_id", &self.price_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("decimal_separator", &self.decimal_separator)
            .finish()
    }
}
