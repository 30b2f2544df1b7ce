use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;
use tracing::{info, warn};

use super::{BaseMailer, OutgoingEmail};
use crate::common::SecretString;
use crate::config::EmailConfig;

/// SMTP relay with implicit TLS (Gmail on 465 by default).
pub struct SmtpMailer {
    host: String,
    port: u16,
    username: String,
    password: SecretString,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig, timeout: Duration) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username: config.username.clone(),
            password: config.password.clone(),
            timeout,
        }
    }
}

/// Build the MIME message: HTML body, one `To` header per recipient.
pub fn build_message(email: &OutgoingEmail) -> Result<Message> {
    let from: Mailbox = email
        .from
        .parse()
        .with_context(|| format!("EMAIL_FROM is not a valid address: {}", email.from))?;
    if email.to.is_empty() {
        anyhow::bail!("No email recipients");
    }

    let mut builder = Message::builder().from(from).subject(email.subject.as_str());
    for recipient in &email.to {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("EMAIL_TO entry is not a valid address: {}", recipient))?;
        builder = builder.to(to);
    }

    builder
        .header(ContentType::TEXT_HTML)
        .body(email.html_body.clone())
        .context("Failed to build email message")
}

#[async_trait]
impl BaseMailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let message = build_message(email)?;
        let transport = SmtpTransport::relay(&self.host)
            .with_context(|| format!("Failed to configure SMTP relay {}", self.host))?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.expose().to_string(),
            ))
            .timeout(Some(self.timeout))
            .build();

        // lettre's SmtpTransport is blocking.
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .context("SMTP send task panicked")?
            .context("SMTP send failed")?;

        info!(recipients = email.to.len(), subject = %email.subject, "Email sent");
        Ok(())
    }
}

/// Mailer used when email settings are absent. Logs and drops the message.
pub struct NoopMailer;

#[async_trait]
impl BaseMailer for NoopMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        warn!(subject = %email.subject, "NoopMailer: email not sent, no SMTP settings configured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &[&str]) -> OutgoingEmail {
        OutgoingEmail {
            from: "brief@example.com".into(),
            to: to.iter().map(|s| s.to_string()).collect(),
            subject: "Daily Research – Brief – 2026-10-18".into(),
            html_body: "<h2>Hi</h2>".into(),
        }
    }

    #[test]
    fn test_build_message_one_to_per_recipient() {
        let message = build_message(&email(&["a@example.com", "b@example.com"])).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("a@example.com"));
        assert!(formatted.contains("b@example.com"));
        assert!(formatted.contains("text/html"));
    }

    #[test]
    fn test_build_message_rejects_bad_addresses() {
        assert!(build_message(&email(&["not an address"])).is_err());
        assert!(build_message(&email(&[])).is_err());
    }

    #[tokio::test]
    async fn test_noop_mailer_succeeds() {
        assert!(NoopMailer.send(&email(&["a@example.com"])).await.is_ok());
    }
}
