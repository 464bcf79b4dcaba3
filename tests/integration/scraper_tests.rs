// HTTP behaviour of the scraper against a local mock server.

use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use price_alert::AppError;
use price_alert::scraper::{BROWSER_USER_AGENT, TRACE_HEADER, TRACE_ID, ProductSelectors, WebScraper};

use super::*;

fn selectors() -> ProductSelectors {
    ProductSelectors {
        title_id: "productTitle".to_string(),
        price_id: "priceblock_ourprice".to_string(),
    }
}

#[tokio::test]
async fn test_request_carries_browser_headers() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_PATH))
        .and(header("user-agent", BROWSER_USER_AGENT))
        .and(header(TRACE_HEADER, TRACE_ID))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page("Widget X", Some("29,99 €"))))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = WebScraper::new(Duration::from_secs(5))?;
    let product = scraper
        .scrape(&format!("{}{}", server.uri(), PRODUCT_PATH), &selectors())
        .await?;

    assert_eq!(product.description, "Widget X");
    assert_eq!(product.price.as_deref(), Some("29,99 €"));

    Ok(())
}

#[tokio::test]
async fn test_not_found_is_http_error() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let scraper = WebScraper::new(Duration::from_secs(5))?;
    let err = scraper
        .fetch(&format!("{}{}", server.uri(), PRODUCT_PATH))
        .await
        .unwrap_err();

    match err {
        AppError::Http(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(404)),
        other => panic!("expected Http error, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_slow_page_times_out() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("Widget X", None))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let scraper = WebScraper::new(Duration::from_millis(500))?;
    let err = scraper
        .fetch(&format!("{}{}", server.uri(), PRODUCT_PATH))
        .await
        .unwrap_err();

    match err {
        AppError::Http(e) => assert!(e.is_timeout()),
        other => panic!("expected Http timeout, got {other:?}"),
    }

    Ok(())
}
