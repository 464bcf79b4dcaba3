use askama::Template;
use async_trait::async_trait;
use lettre::message::{header, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rust_decimal::Decimal;
use std::time::Duration;

use crate::config::AppConfig;
use crate::plugins::traits::{AlertEvent, Notifier};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub to_email: String,
    pub timeout: Duration,
}

impl EmailConfig {
    /// The sender address doubles as the SMTP login.
    pub fn from_app_config(config: &AppConfig) -> Self {
        EmailConfig {
            smtp_server: config.smtp.clone(),
            smtp_port: config.port,
            username: config.sender.clone(),
            password: config.password.clone(),
            from_email: config.sender.clone(),
            to_email: config.recipient.clone(),
            timeout: config.timeout(),
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"<p>Price check: <b>{{ description }} is now available</b> at a price of <b>{{ amount }} &euro;</b>.</p>
<p>See: <a href="{{ url }}">{{ url }}</a></p>"#,
    ext = "html"
)]
struct AlertBody<'a> {
    description: &'a str,
    amount: &'a Decimal,
    url: &'a str,
}

/// Sends alerts over one STARTTLS SMTP session per message.
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        EmailNotifier { config }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(EmailConfig::from_app_config(config))
    }

    pub fn format_subject(&self, event: &AlertEvent) -> String {
        format!(
            "{} is now available at {} for {} (EUR)",
            event.description, event.url, event.amount
        )
    }

    pub fn format_html_body(&self, event: &AlertEvent) -> Result<String> {
        let body = AlertBody {
            description: &event.description,
            amount: &event.amount,
            url: &event.url,
        };
        Ok(body.render()?)
    }

    pub fn build_message(&self, event: &AlertEvent) -> Result<Message> {
        let from: Mailbox = self.config.from_email.parse()?;
        let to: Mailbox = self.config.to_email.parse()?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(self.format_subject(event))
            .header(header::ContentType::TEXT_HTML)
            .body(self.format_html_body(event)?)?;

        Ok(email)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .timeout(Some(self.config.timeout))
            .build();

        Ok(mailer)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, event: &AlertEvent) -> Result<()> {
        let email = self.build_message(event)?;
        let mailer = self.transport()?;

        tracing::info!(
            server = %self.config.smtp_server,
            port = self.config.smtp_port,
            recipient = %self.config.to_email,
            "Sending price alert"
        );

        let response = mailer.send(email).await?;
        tracing::info!(
            recipient = %self.config.to_email,
            code = %response.code(),
            "Price alert sent"
        );

        Ok(())
    }
}
