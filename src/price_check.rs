use chrono::Local;
use std::time::Instant;

use crate::config::AppConfig;
use crate::models::ProductRecord;
use crate::plugins::notifiers::EmailNotifier;
use crate::plugins::traits::{AlertEvent, Notifier};
use crate::plugins::trackers::{PriceTracker, PriceWindow};
use crate::price_log::PriceLog;
use crate::scraper::{ProductSelectors, WebScraper};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub record: ProductRecord,
    pub notified: bool,
}

/// One run: scrape the page, log the observation, alert when the price is in
/// the window.
pub struct PriceCheck {
    url: String,
    selectors: ProductSelectors,
    scraper: WebScraper,
    tracker: PriceTracker,
    window: PriceWindow,
    log: PriceLog,
    notifier: Box<dyn Notifier>,
}

impl PriceCheck {
    pub fn new(config: &AppConfig, notifier: Box<dyn Notifier>) -> Result<Self> {
        Ok(Self {
            url: config.url.clone(),
            selectors: ProductSelectors::from_config(config),
            scraper: WebScraper::from_config(config)?,
            tracker: PriceTracker::new(config.decimal_separator),
            window: PriceWindow::from_bounds(config.lower, config.upper)?,
            log: PriceLog::new(&config.file),
            notifier,
        })
    }

    /// Alerts go out by email.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config, Box::new(EmailNotifier::from_app_config(config)))
    }

    pub fn log(&self) -> &PriceLog {
        &self.log
    }

    pub async fn run(&self) -> Result<CheckOutcome> {
        let start_time = Instant::now();
        let timestamp = Local::now();

        tracing::info!(url = %self.url, "Checking product page");
        let scraped = self.scraper.scrape(&self.url, &self.selectors).await?;

        let amount = scraped.price.as_deref().and_then(|text| self.tracker.parse(text));
        match (&scraped.price, amount) {
            (Some(text), None) => {
                tracing::warn!(price = %text, "Price text could not be parsed, treating as absent")
            }
            (None, _) => tracing::info!(article = %scraped.description, "No price shown"),
            (Some(_), Some(amount)) => {
                tracing::info!(article = %scraped.description, %amount, "Found price")
            }
        }

        let record = ProductRecord {
            description: scraped.description,
            price: scraped.price,
            amount,
            timestamp,
        };
        self.log.append(&record)?;

        let notified = match AlertEvent::from_record(&record, &self.url) {
            Some(event) if self.window.should_notify(record.amount) => {
                self.notifier.notify(&event).await?;
                true
            }
            _ => {
                tracing::info!(
                    lower = %self.window.lower,
                    upper = %self.window.upper,
                    "No condition was met, no alert sent"
                );
                false
            }
        };

        tracing::info!(
            notified,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Price check finished"
        );

        Ok(CheckOutcome { record, notified })
    }
}
