use thiserror::Error;

/// Process exit codes, one per failing stage.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const CONFIG: u8 = 1;
    pub const NETWORK: u8 = 2;
    pub const MAIL: u8 = 3;
    pub const LOG: u8 = 4;
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Invalid mail address: {0}")]
    MailAddress(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    MailBuild(#[from] lettre::error::Error),

    #[error("Failed to render email: {0}")]
    MailTemplate(#[from] askama::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Price log error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Maps the error to the exit code of the stage it belongs to.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::InvalidConfig(_) => exit_code::CONFIG,
            AppError::Http(_) | AppError::Scraping(_) | AppError::ElementNotFound { .. } => {
                exit_code::NETWORK
            }
            AppError::MailAddress(_)
            | AppError::MailBuild(_)
            | AppError::MailTemplate(_)
            | AppError::Smtp(_) => exit_code::MAIL,
            AppError::Csv(_) | AppError::Io(_) => exit_code::LOG,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
