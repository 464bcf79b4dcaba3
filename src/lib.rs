pub mod config;
pub mod models;
pub mod plugins;
pub mod price_check;
pub mod price_log;
pub mod scraper;
pub mod utils;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::price_check::{CheckOutcome, PriceCheck};
pub use crate::utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
