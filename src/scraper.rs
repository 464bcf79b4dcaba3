use ::scraper::{ElementRef, Html, Selector};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::utils::error::{AppError, Result};

pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:91.0) Gecko/20100101 Firefox/91.0";
pub const TRACE_HEADER: &str = "x-amzn-trace-id";
pub const TRACE_ID: &str = "Root=1-612654ea-73fbcbc35fda58ec6038f08e";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Element ids of the two slots read from the product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSelectors {
    pub title_id: String,
    pub price_id: String,
}

impl ProductSelectors {
    pub fn from_config(config: &AppConfig) -> Self {
        ProductSelectors {
            title_id: config.title_id.clone(),
            price_id: config.price_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedProduct {
    pub description: String,
    /// `None` means the page shows no price, e.g. out of stock.
    pub price: Option<String>,
}

pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            HeaderName::from_static(TRACE_HEADER),
            HeaderValue::from_static(TRACE_ID),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.timeout())
    }

    /// Fetches the page body. Non-2xx responses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?.error_for_status()?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(
            url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Fetched product page"
        );

        Ok(body)
    }

    pub async fn scrape(&self, url: &str, selectors: &ProductSelectors) -> Result<ScrapedProduct> {
        let html = self.fetch(url).await?;
        extract_product(&html, selectors)
    }
}

/// Reads the title (required) and price (optional) slots from a product page.
pub fn extract_product(html: &str, selectors: &ProductSelectors) -> Result<ScrapedProduct> {
    let document = Html::parse_document(html);

    let title_selector = id_selector(&selectors.title_id)?;
    let description = document
        .select(&title_selector)
        .next()
        .map(element_text)
        .ok_or_else(|| AppError::ElementNotFound {
            selector: format!("#{}", selectors.title_id),
        })?;

    let price_selector = id_selector(&selectors.price_id)?;
    let price = document
        .select(&price_selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty());

    Ok(ScrapedProduct { description, price })
}

fn id_selector(id: &str) -> Result<Selector> {
    let selector = format!("[id=\"{}\"]", id.replace('\\', "\\\\").replace('"', "\\\""));
    Selector::parse(&selector)
        .map_err(|e| AppError::Scraping(format!("Invalid element id '{}': {:?}", id, e)))
}

/// Text content with runs of whitespace collapsed to single spaces.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}
