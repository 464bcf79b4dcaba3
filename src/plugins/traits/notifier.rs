use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::ProductRecord;
use crate::utils::error::Result;

/// Everything an alert needs to describe a price that fell inside the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEvent {
    pub description: String,
    pub url: String,
    pub amount: Decimal,
}

impl AlertEvent {
    /// Returns `None` when the record carries no parsed amount.
    pub fn from_record(record: &ProductRecord, url: &str) -> Option<Self> {
        Some(AlertEvent {
            description: record.description.clone(),
            url: url.to_string(),
            amount: record.amount?,
        })
    }
}

/// Trait for implementing alert channels.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one alert. A delivery failure is an error, never a silent skip.
    async fn notify(&self, event: &AlertEvent) -> Result<()>;
}
