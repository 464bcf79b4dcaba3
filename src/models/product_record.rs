use chrono::{DateTime, Local, SecondsFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observation of the scrape target.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub description: String,
    /// Price text as shown on the page, `None` when no price is displayed.
    pub price: Option<String>,
    /// Parsed amount, `None` when the price is absent or unreadable.
    pub amount: Option<Decimal>,
    pub timestamp: DateTime<Local>,
}

impl ProductRecord {
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Fields in log column order: article, price, date.
    pub fn to_row(&self) -> [String; 3] {
        [
            self.description.clone(),
            self.price.clone().unwrap_or_default(),
            self.formatted_timestamp(),
        ]
    }
}

/// A row read back from the price log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRow {
    #[serde(rename = "ARTICLE")]
    pub article: String,
    #[serde(rename = "PRICE")]
    pub price: String,
    #[serde(rename = "DATE")]
    pub date: String,
}
