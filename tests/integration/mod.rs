// Shared fixtures for the integration tests: a mock product page, a config
// file pointing at it, and a recording notifier.

pub mod scraper_tests;

use async_trait::async_trait;
use mockall::mock;
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use price_alert::AppConfig;
use price_alert::plugins::traits::{AlertEvent, Notifier};

pub const PRODUCT_PATH: &str = "/dp/widget";

mock! {
    pub Mailer {}

    #[async_trait]
    impl Notifier for Mailer {
        async fn notify(&self, event: &AlertEvent) -> price_alert::Result<()>;
    }
}

/// Product page with the usual title and price slots.
pub fn product_page(title: &str, price: Option<&str>) -> String {
    let price_html = price
        .map(|p| format!(r#"<span id="priceblock_ourprice">{}</span>"#, p))
        .unwrap_or_else(|| r#"<div id="availability">Currently unavailable.</div>"#.to_string());

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body>
    <div id="centerCol">
        <h1><span id="productTitle">
            {title}
        </span></h1>
        {price_html}
    </div>
</body>
</html>"#
    )
}

pub async fn serve_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(PRODUCT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Temporary directory holding `config.json` and the price log.
pub struct TestEnv {
    _dir: TempDir,
    pub config_path: PathBuf,
    pub log_path: PathBuf,
}

impl TestEnv {
    pub fn new(server: &MockServer, lower: f64, upper: f64) -> anyhow::Result<Self> {
        let mut config = base_config(server, lower, upper);
        let dir = tempfile::tempdir()?;
        let log_path = dir.path().join("prices.csv");
        config["file"] = json!(log_path.to_string_lossy());

        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

        Ok(TestEnv {
            _dir: dir,
            config_path,
            log_path,
        })
    }

    pub fn load_config(&self) -> price_alert::Result<AppConfig> {
        AppConfig::load(&self.config_path)
    }
}

pub fn base_config(server: &MockServer, lower: f64, upper: f64) -> serde_json::Value {
    json!({
        "file": "prices.csv",
        "url": format!("{}{}", server.uri(), PRODUCT_PATH),
        "sender": "alerts@example.de",
        "recipient": "me@example.de",
        "password": "test_password",
        "smtp": "smtp.example.de",
        "port": 587,
        "lower": lower,
        "upper": upper,
        "timeout_secs": 5
    })
}

/// Notifier that records every event it is asked to send.
pub fn recording_mailer(times: usize) -> (MockMailer, Arc<Mutex<Vec<AlertEvent>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&sent);

    let mut mailer = MockMailer::new();
    mailer.expect_notify().times(times).returning(move |event| {
        recorded.lock().unwrap().push(event.clone());
        Ok(())
    });

    (mailer, sent)
}

pub fn silent_mailer() -> MockMailer {
    let mut mailer = MockMailer::new();
    mailer.expect_notify().never();
    mailer
}
