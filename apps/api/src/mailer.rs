//! Outbound email through an HTTP mail relay.
//!
//! Handlers never talk to the relay directly: they hold an `Arc<dyn Mailer>`
//! from `AppState`, which is a `DisabledMailer` when no relay is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::MailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay error (status {status}): {message}")]
    Relay { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Posts messages as JSON to the relay with a bearer API key.
pub struct RelayMailer {
    client: Client,
    relay_url: String,
    api_key: String,
    from: String,
}

impl RelayMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()?,
            relay_url: config.relay_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.relay_url)
            .bearer_auth(&self.api_key)
            .json(&RelayRequest {
                from: &self.from,
                to: &message.to,
                subject: &message.subject,
                html: &message.html,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Relay {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Relayed email '{}' to {}", message.subject, message.to);
        Ok(())
    }
}

/// Used when no relay is configured: logs and drops every message.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        warn!(
            to = %message.to,
            "mail relay is not configured; skipping email send"
        );
        Ok(())
    }
}

/// A new-job notification for one subscriber.
#[derive(Debug, Clone)]
pub struct JobAlert {
    pub to: String,
    pub job_title: String,
    pub company_name: String,
    pub job_id: Uuid,
}

pub fn job_alert_email(alert: &JobAlert, app_base_url: &str) -> EmailMessage {
    let url = format!("{}/jobs/{}", app_base_url.trim_end_matches('/'), alert.job_id);
    let title = escape_html(&alert.job_title);
    let company = escape_html(&alert.company_name);

    EmailMessage {
        to: alert.to.clone(),
        subject: format!(
            "New RoleRocket match: {} at {}",
            alert.job_title, alert.company_name
        ),
        html: format!(
            "<p>You have a new job match on <strong>RoleRocket</strong>.</p>\
             <p><strong>{title}</strong> at <strong>{company}</strong></p>\
             <p>View details and apply here: <a href=\"{url}\">{url}</a></p>"
        ),
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> JobAlert {
        JobAlert {
            to: "dev@example.com".to_string(),
            job_title: "Backend SWE Intern".to_string(),
            company_name: "RoleRocket Labs".to_string(),
            job_id: Uuid::nil(),
        }
    }

    #[test]
    fn test_alert_subject() {
        let email = job_alert_email(&alert(), "http://localhost:3000");
        assert_eq!(
            email.subject,
            "New RoleRocket match: Backend SWE Intern at RoleRocket Labs"
        );
        assert_eq!(email.to, "dev@example.com");
    }

    #[test]
    fn test_alert_links_to_job() {
        let email = job_alert_email(&alert(), "https://rolerocket.app/");
        assert!(email
            .html
            .contains(&format!("https://rolerocket.app/jobs/{}", Uuid::nil())));
    }

    #[test]
    fn test_alert_body_escapes_markup() {
        let mut a = alert();
        a.job_title = "<script>x</script>".to_string();
        let email = job_alert_email(&a, "http://localhost:3000");
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_disabled_mailer_accepts_everything() {
        let email = job_alert_email(&alert(), "http://localhost:3000");
        assert!(DisabledMailer.send(email).await.is_ok());
    }
}
